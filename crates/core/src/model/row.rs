use chrono::{DateTime, FixedOffset};
use commitscope_protocol::SharedStr;
use serde::{Deserialize, Serialize};

/// One historical line-of-code record — immutable once loaded.
///
/// A row describes a single line as it existed at a given commit, with
/// position metadata (`line`, `depth`, `length`) and provenance
/// (`author`, timestamp fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Commit identifier this line belongs to.
    pub commit: SharedStr,
    /// File path within the repository.
    pub file: SharedStr,
    /// Language/category tag derived upstream from the file extension.
    /// The CSV column is named `type`.
    #[serde(rename = "type")]
    pub kind: SharedStr,
    /// 1-based line number within the file at that commit.
    pub line: u32,
    /// Indentation level.
    pub depth: u32,
    /// Character count of the line.
    pub length: u32,
    pub author: SharedStr,
    /// Calendar date as written in the log (`YYYY-MM-DD`).
    pub date: SharedStr,
    /// Wall-clock time as written in the log (`HH:MM:SS`).
    pub time: SharedStr,
    /// UTC offset as written in the log (`+HHMM`).
    pub timezone: SharedStr,
    /// Absolute instant combining date, time, and timezone — the
    /// canonical ordering key for everything downstream.
    pub datetime: DateTime<FixedOffset>,
}

impl Row {
    /// The instant at local midnight of this row's calendar date,
    /// in the row's own timezone (`date` + `T00:00` + `timezone`).
    pub fn date_instant(&self) -> Option<DateTime<FixedOffset>> {
        let composed = format!("{}T00:00:00{}", self.date, self.timezone);
        DateTime::parse_from_str(&composed, "%Y-%m-%dT%H:%M:%S%z").ok()
    }
}
