use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::ValidationError,
    models::ObjectSummary,
    value_objects::ObjectKey,
};

/// Folder under which generated reports are written
pub const REPORT_PREFIX: &str = "report";

/// Selects the objects that belong in a daily report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    extension: String,
}

impl ReportFilter {
    pub fn new(extension: impl Into<String>) -> Result<Self, ValidationError> {
        let extension = extension.into();
        if extension.trim_start_matches('.').is_empty() {
            return Err(ValidationError::EmptyExtension);
        }
        Ok(Self { extension })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// An object matches when its key ends with the extension and it was
    /// last modified on `day` (UTC calendar date).
    pub fn matches(&self, object: &ObjectSummary, day: NaiveDate) -> bool {
        object.key.has_suffix(&self.extension) && object.last_modified.date_naive() == day
    }

    /// Key of the report for `day`, e.g. `report/mp4_objects_2024-05-01.json`
    pub fn report_key(&self, day: NaiveDate) -> Result<ObjectKey, ValidationError> {
        ObjectKey::new(format!(
            "{}/{}_objects_{}.json",
            REPORT_PREFIX,
            self.extension.trim_start_matches('.'),
            day.format("%Y-%m-%d")
        ))
    }
}

/// One matching object in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "LastModified")]
    pub last_modified: String,
}

impl From<&ObjectSummary> for ReportEntry {
    fn from(object: &ObjectSummary) -> Self {
        Self {
            key: object.key.as_str().to_string(),
            last_modified: format_timestamp(&object.last_modified),
        }
    }
}

/// RFC 3339 with a numeric offset; a fraction appears only when there are
/// microseconds and then always has six digits
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let seconds = if timestamp.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(seconds, false)
}

/// Summary of the objects that matched a [`ReportFilter`] on one day.
///
/// Field order is part of the persisted format: `total_files` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub total_files: usize,
    pub files: Vec<ReportEntry>,
}

impl Report {
    pub fn new(files: Vec<ReportEntry>) -> Self {
        Self {
            total_files: files.len(),
            files,
        }
    }

    /// Render as 4-space indented JSON
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        to_indented_json(self)
    }
}

/// Serialize `value` with 4-space indentation, the layout used for every
/// document the reporter produces.
pub fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
