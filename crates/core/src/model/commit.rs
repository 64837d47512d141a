use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Timelike};
use commitscope_protocol::SharedStr;
use serde::{Deserialize, Serialize};

use crate::model::Row;

/// Aggregated summary of all rows sharing a commit identifier —
/// immutable after construction.
///
/// Serialization contract: the default serde form is the *summary view*
/// and excludes `rows`. Full-object field access is the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: SharedStr,
    /// Deep link to the commit, `<repo-url>/commit/<id>`.
    pub url: SharedStr,
    pub author: SharedStr,
    pub date: SharedStr,
    pub time: SharedStr,
    pub timezone: SharedStr,
    pub datetime: DateTime<FixedOffset>,
    /// Fractional hour of day in [0, 24): hour + minute/60, in the
    /// commit's own timezone. Pure derivation of `datetime`.
    pub hour_frac: f64,
    /// Number of rows belonging to this commit. Always `rows.len()`.
    pub total_lines: usize,
    /// Owned back-reference to every row of this commit. Excluded from
    /// the serialized summary view.
    #[serde(skip)]
    pub rows: Vec<Row>,
}

impl Commit {
    /// Group rows by commit id and derive one summary per commit,
    /// sorted ascending by `datetime` regardless of input row order.
    ///
    /// All rows of one commit share author/date/time/timezone by
    /// construction, so the group's first row serves as the metadata
    /// template. Groups cannot be empty — they only exist for rows seen.
    pub fn aggregate(rows: Vec<Row>, repo_url: &str) -> Vec<Commit> {
        let mut order: Vec<SharedStr> = Vec::new();
        let mut groups: HashMap<SharedStr, Vec<Row>> = HashMap::new();

        for row in rows {
            let group = match groups.get_mut(&row.commit) {
                Some(group) => group,
                None => {
                    order.push(row.commit.clone());
                    groups.entry(row.commit.clone()).or_default()
                }
            };
            group.push(row);
        }

        let mut commits: Vec<Commit> = order
            .into_iter()
            .filter_map(|id| {
                let rows = groups.remove(&id)?;
                let first = rows.first()?.clone();
                Some(Commit {
                    url: SharedStr::from(format!(
                        "{}/commit/{}",
                        repo_url.trim_end_matches('/'),
                        id
                    )),
                    id,
                    author: first.author,
                    date: first.date,
                    time: first.time,
                    timezone: first.timezone,
                    datetime: first.datetime,
                    hour_frac: hour_frac(first.datetime),
                    total_lines: rows.len(),
                    rows,
                })
            })
            .collect();

        commits.sort_by_key(|c| c.datetime);
        commits
    }

    /// Count of distinct `file` values among this commit's rows.
    pub fn files_touched(&self) -> usize {
        let mut seen: Vec<&SharedStr> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&&row.file) {
                seen.push(&row.file);
            }
        }
        seen.len()
    }
}

fn hour_frac(datetime: DateTime<FixedOffset>) -> f64 {
    f64::from(datetime.hour()) + f64::from(datetime.minute()) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_row;

    #[test]
    fn groups_and_sorts_by_datetime() {
        // Rows arrive in non-chronological group order.
        let rows = vec![
            make_row("bbb", "a.rs", "rust", "2025-03-01T10:30:00-08:00"),
            make_row("aaa", "a.rs", "rust", "2025-02-01T09:00:00-08:00"),
            make_row("bbb", "b.css", "css", "2025-03-01T10:30:00-08:00"),
        ];
        let commits = Commit::aggregate(rows, "https://example.com/repo");

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "aaa");
        assert_eq!(commits[1].id, "bbb");
        assert_eq!(commits[1].total_lines, 2);
        assert_eq!(commits[1].rows.len(), 2);
        assert_eq!(commits[0].url, "https://example.com/repo/commit/aaa");
    }

    #[test]
    fn hour_frac_uses_local_clock() {
        let rows = vec![make_row("aaa", "a.rs", "rust", "2025-02-01T10:30:00-08:00")];
        let commits = Commit::aggregate(rows, "https://example.com/repo");
        assert!((commits[0].hour_frac - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn files_touched_counts_distinct_paths() {
        let rows = vec![
            make_row("aaa", "a.rs", "rust", "2025-02-01T09:00:00-08:00"),
            make_row("aaa", "a.rs", "rust", "2025-02-01T09:00:00-08:00"),
            make_row("aaa", "b.css", "css", "2025-02-01T09:00:00-08:00"),
        ];
        let commits = Commit::aggregate(rows, "https://example.com/repo");
        assert_eq!(commits[0].files_touched(), 2);
    }

    #[test]
    fn summary_serialization_excludes_rows() {
        let rows = vec![make_row("aaa", "a.rs", "rust", "2025-02-01T09:00:00-08:00")];
        let commits = Commit::aggregate(rows, "https://example.com/repo");
        let json = serde_json::to_value(&commits[0]).expect("serialize");
        assert!(json.get("rows").is_none());
        assert_eq!(json["total_lines"], 1);
    }
}
