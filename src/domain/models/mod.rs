pub mod object;
pub mod record;
pub mod report;

pub use object::*;
pub use record::Record;
pub use report::{Report, ReportEntry, ReportFilter, REPORT_PREFIX, to_indented_json};
