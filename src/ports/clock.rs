use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time for handlers that depend on "today"
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
