pub mod health_handlers;
pub mod invocation_handlers;

pub use health_handlers::*;
pub use invocation_handlers::*;
