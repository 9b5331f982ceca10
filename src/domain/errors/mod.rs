mod handler_errors;
mod record_errors;
mod storage_errors;
mod validation_errors;

pub use handler_errors::*;
pub use record_errors::*;
pub use storage_errors::*;
pub use validation_errors::*;
