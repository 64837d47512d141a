use chrono::{DateTime, FixedOffset};

use crate::model::{Commit, Row};

/// The loaded session: every commit in ascending `datetime` order, each
/// owning its rows. Built once per session and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct History {
    commits: Vec<Commit>,
}

impl History {
    /// Aggregate raw rows into a session. An empty row set yields an
    /// empty history — the contract for a failed load.
    pub fn from_rows(rows: Vec<Row>, repo_url: &str) -> Self {
        Self {
            commits: Commit::aggregate(rows, repo_url),
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// All rows across all commits, in commit order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.commits.iter().flat_map(|c| &c.rows)
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    pub fn row_count(&self) -> usize {
        self.commits.iter().map(|c| c.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Earliest commit instant, if any.
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.commits.first().map(|c| c.datetime)
    }

    /// Latest commit instant, if any.
    pub fn end_time(&self) -> Option<DateTime<FixedOffset>> {
        self.commits.last().map(|c| c.datetime)
    }
}
