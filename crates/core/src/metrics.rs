//! Corpus-wide descriptive statistics.
//!
//! Pure reductions over the full row and commit sets, computed once at
//! load. The stats panel is static — only the scatter and file views
//! react to filtering.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Weekday};
use commitscope_protocol::SharedStr;

use crate::model::History;

/// Coarse time-of-day bucket: night [0,6), morning [6,12),
/// afternoon [12,18), evening [18,24), in the row's own timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    fn of_hour(hour: u32) -> DayPeriod {
        match hour {
            0..=5 => DayPeriod::Night,
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Night => "night",
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

/// The corpus metrics panel. Derived-mode fields are `None` on an empty
/// dataset and render as "N/A".
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    pub total_rows: usize,
    pub total_commits: usize,
    pub file_count: usize,
    /// Mean of per-file maximum `line`, rounded to the nearest integer.
    pub avg_file_length: Option<u64>,
    /// File with the greatest maximum `line`. Ties break to the file
    /// first encountered in row-iteration order.
    pub longest_file: Option<(SharedStr, u32)>,
    /// Mean row `length`, rounded to the nearest integer.
    pub avg_line_length: Option<u64>,
    /// Greatest row `length`. Ties break to the row first encountered.
    pub longest_line: Option<u32>,
    pub max_depth: Option<u32>,
    /// Day period with the most rows. Ties break to the period first
    /// encountered during aggregation.
    pub busiest_period: Option<DayPeriod>,
    /// Weekday with the most rows, same tie-break.
    pub busiest_weekday: Option<Weekday>,
}

impl CorpusStats {
    pub fn compute(history: &History) -> CorpusStats {
        let mut file_order: Vec<SharedStr> = Vec::new();
        let mut file_max_line: HashMap<SharedStr, u32> = HashMap::new();
        let mut period_order: Vec<DayPeriod> = Vec::new();
        let mut period_counts: HashMap<DayPeriod, usize> = HashMap::new();
        let mut weekday_order: Vec<Weekday> = Vec::new();
        let mut weekday_counts: HashMap<Weekday, usize> = HashMap::new();

        let mut total_rows = 0usize;
        let mut length_sum = 0u64;
        let mut longest_line: Option<u32> = None;
        let mut max_depth: Option<u32> = None;

        for row in history.rows() {
            total_rows += 1;
            length_sum += u64::from(row.length);
            if longest_line.is_none_or(|best| row.length > best) {
                longest_line = Some(row.length);
            }
            if max_depth.is_none_or(|best| row.depth > best) {
                max_depth = Some(row.depth);
            }

            match file_max_line.get_mut(&row.file) {
                Some(max) => *max = (*max).max(row.line),
                None => {
                    file_order.push(row.file.clone());
                    file_max_line.insert(row.file.clone(), row.line);
                }
            }

            let period = DayPeriod::of_hour(row.datetime.hour());
            if !period_counts.contains_key(&period) {
                period_order.push(period);
            }
            *period_counts.entry(period).or_insert(0) += 1;

            let weekday = row.datetime.weekday();
            if !weekday_counts.contains_key(&weekday) {
                weekday_order.push(weekday);
            }
            *weekday_counts.entry(weekday).or_insert(0) += 1;
        }

        let avg_file_length = mean_rounded(
            file_order
                .iter()
                .filter_map(|f| file_max_line.get(f).copied().map(u64::from)),
        );
        // Strict `>` keeps the first-encountered file on ties.
        let longest_file = file_order
            .iter()
            .filter_map(|f| file_max_line.get(f).map(|&max| (f.clone(), max)))
            .fold(None::<(SharedStr, u32)>, |best, candidate| match best {
                Some(b) if candidate.1 > b.1 => Some(candidate),
                Some(b) => Some(b),
                None => Some(candidate),
            });

        let avg_line_length = if total_rows == 0 {
            None
        } else {
            Some(rounded_div(length_sum, total_rows as u64))
        };

        CorpusStats {
            total_rows,
            total_commits: history.commit_count(),
            file_count: file_order.len(),
            avg_file_length,
            longest_file,
            avg_line_length,
            longest_line,
            max_depth,
            busiest_period: most_frequent(&period_order, &period_counts),
            busiest_weekday: most_frequent(&weekday_order, &weekday_counts),
        }
    }

    /// Label/value pairs for the stats panel, with "N/A" for derived
    /// fields of an empty corpus.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let na = || "N/A".to_string();
        vec![
            ("Total LOC", self.total_rows.to_string()),
            ("Total commits", self.total_commits.to_string()),
            ("Number of files", self.file_count.to_string()),
            (
                "Average file length",
                self.avg_file_length
                    .map_or_else(na, |v| format!("{v} lines")),
            ),
            (
                "Longest file",
                self.longest_file
                    .as_ref()
                    .map_or_else(na, |(name, lines)| format!("{name} ({lines} lines)")),
            ),
            (
                "Average line length",
                self.avg_line_length
                    .map_or_else(na, |v| format!("{v} characters")),
            ),
            (
                "Longest line",
                self.longest_line
                    .map_or_else(na, |v| format!("{v} characters")),
            ),
            (
                "Maximum indentation",
                self.max_depth.map_or_else(na, |v| format!("{v} levels")),
            ),
            (
                "Most productive time",
                self.busiest_period
                    .map_or_else(na, |p| p.label().to_string()),
            ),
            (
                "Most productive day",
                self.busiest_weekday
                    .map_or_else(na, |d| weekday_label(d).to_string()),
            ),
        ]
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Key with the highest count; `order` fixes the first-encountered
/// tie-break explicitly.
fn most_frequent<K: Copy + Eq + std::hash::Hash>(
    order: &[K],
    counts: &HashMap<K, usize>,
) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for &key in order {
        let count = counts.get(&key).copied().unwrap_or(0);
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

fn mean_rounded(values: impl Iterator<Item = u64>) -> Option<u64> {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| rounded_div(sum, count))
}

fn rounded_div(sum: u64, count: u64) -> u64 {
    (sum + count / 2) / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{REPO_URL, make_row};
    use crate::model::{History, Row};

    fn history(rows: Vec<Row>) -> History {
        History::from_rows(rows, REPO_URL)
    }

    #[test]
    fn empty_dataset_yields_counts_of_zero_and_na() {
        let stats = CorpusStats::compute(&history(Vec::new()));
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.total_commits, 0);
        assert_eq!(stats.file_count, 0);
        assert!(stats.avg_file_length.is_none());
        assert!(stats.longest_file.is_none());
        assert!(stats.busiest_period.is_none());

        let entries = stats.entries();
        assert_eq!(entries[0], ("Total LOC", "0".to_string()));
        assert!(entries.iter().any(|(_, v)| v == "N/A"));
    }

    #[test]
    fn file_length_aggregates() {
        let mut a = make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00");
        a.line = 10;
        let mut b = make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00");
        b.line = 30;
        let mut c = make_row("c2", "b.css", "css", "2025-01-02T09:00:00-08:00");
        c.line = 20;

        let stats = CorpusStats::compute(&history(vec![a, b, c]));
        assert_eq!(stats.file_count, 2);
        // mean(max line per file) = mean(30, 20) = 25
        assert_eq!(stats.avg_file_length, Some(25));
        assert_eq!(
            stats.longest_file,
            Some((SharedStr::from("a.rs"), 30))
        );
    }

    #[test]
    fn longest_file_tie_breaks_to_first_encountered() {
        let mut a = make_row("c1", "first.rs", "rust", "2025-01-01T09:00:00-08:00");
        a.line = 50;
        let mut b = make_row("c1", "second.rs", "rust", "2025-01-01T09:00:00-08:00");
        b.line = 50;
        let stats = CorpusStats::compute(&history(vec![a, b]));
        assert_eq!(
            stats.longest_file,
            Some((SharedStr::from("first.rs"), 50))
        );
    }

    #[test]
    fn line_length_and_depth() {
        let mut a = make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00");
        a.length = 10;
        a.depth = 1;
        let mut b = make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00");
        b.length = 31;
        b.depth = 5;
        let stats = CorpusStats::compute(&history(vec![a, b]));
        // mean(10, 31) = 20.5, rounds to 21
        assert_eq!(stats.avg_line_length, Some(21));
        assert_eq!(stats.longest_line, Some(31));
        assert_eq!(stats.max_depth, Some(5));
    }

    #[test]
    fn busiest_period_and_weekday() {
        let rows = vec![
            // Two morning rows (Wednesday), one evening row (Thursday).
            make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00"),
            make_row("c1", "a.rs", "rust", "2025-01-01T10:00:00-08:00"),
            make_row("c2", "a.rs", "rust", "2025-01-02T20:00:00-08:00"),
        ];
        let stats = CorpusStats::compute(&history(rows));
        assert_eq!(stats.busiest_period, Some(DayPeriod::Morning));
        assert_eq!(stats.busiest_weekday, Some(Weekday::Wed));
    }

    #[test]
    fn day_period_buckets() {
        assert_eq!(DayPeriod::of_hour(0), DayPeriod::Night);
        assert_eq!(DayPeriod::of_hour(5), DayPeriod::Night);
        assert_eq!(DayPeriod::of_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::of_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::of_hour(18), DayPeriod::Evening);
        assert_eq!(DayPeriod::of_hour(23), DayPeriod::Evening);
    }
}
