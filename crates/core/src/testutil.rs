//! Shared fixtures for unit tests.

use chrono::DateTime;

use crate::model::{Commit, Row};

pub(crate) const REPO_URL: &str = "https://example.com/repo";

pub(crate) fn make_row(commit: &str, file: &str, kind: &str, rfc3339: &str) -> Row {
    let datetime = DateTime::parse_from_rfc3339(rfc3339).expect("fixture datetime");
    Row {
        commit: commit.into(),
        file: file.into(),
        kind: kind.into(),
        line: 1,
        depth: 0,
        length: 40,
        author: "Ada".into(),
        date: datetime.format("%Y-%m-%d").to_string().into(),
        time: datetime.format("%H:%M:%S").to_string().into(),
        timezone: datetime.format("%z").to_string().into(),
        datetime,
    }
}

/// Three single-row commits at distinct (datetime, hour) coordinates.
pub(crate) fn three_commits() -> Vec<Commit> {
    let rows = vec![
        make_row("aaa", "a.rs", "rust", "2025-01-01T08:00:00-08:00"),
        make_row("bbb", "b.rs", "rust", "2025-02-01T12:00:00-08:00"),
        make_row("ccc", "c.css", "css", "2025-03-01T20:00:00-08:00"),
    ];
    Commit::aggregate(rows, REPO_URL)
}
