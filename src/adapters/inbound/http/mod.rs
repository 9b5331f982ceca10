pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use dto::*;
pub use middleware::{REQUEST_ID_HEADER, RequestIdLayer};
pub use router::{AppState, create_router};
