//! Function handlers in the shape the Lambda runtime invokes them.

pub mod event;
pub mod handlers;
pub mod response;

pub use event::{encode_event_key, object_created_event, object_location};
pub use handlers::{handle_import, handle_replicate, handle_report};
pub use response::InvocationResponse;
