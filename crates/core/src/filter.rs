//! Time-cutoff filter state.
//!
//! Two independent instances exist per session — one for the scatterplot,
//! one for the file-composition view. Each maps a slider position in
//! [0, 100] through the session's time scale to a `max_time` cutoff, and
//! the filtered commit set is the inclusive `datetime <= max_time`
//! prefix. Slider input and narrative step-enter both write the same
//! scatter instance; whichever fires last wins.

use chrono::{DateTime, FixedOffset};

use crate::model::Commit;
use crate::scale::TimeScale;

#[derive(Debug, Clone, Copy)]
pub struct FilterState {
    progress: f64,
    max_time: DateTime<FixedOffset>,
}

impl FilterState {
    /// Initial state: slider at 100, every commit visible.
    pub fn new(scale: &TimeScale) -> Self {
        Self {
            progress: 100.0,
            max_time: scale.invert(100.0),
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn max_time(&self) -> DateTime<FixedOffset> {
        self.max_time
    }

    /// Slider input: set the cutoff from a [0, 100] position.
    ///
    /// Returns `false` when the clamped position equals the current one,
    /// so callers can skip the dependent re-render — setting the same
    /// value twice is a single logical update.
    pub fn set_progress(&mut self, progress: f64, scale: &TimeScale) -> bool {
        let progress = progress.clamp(0.0, 100.0);
        if progress == self.progress {
            return false;
        }
        self.progress = progress;
        self.max_time = scale.invert(progress);
        true
    }

    /// Narrative step-enter: pin the cutoff to a commit's exact instant
    /// (not the inverse-then-forward rounded value) and back-fill the
    /// slider position through the forward map.
    pub fn enter_commit(&mut self, commit: &Commit, scale: &TimeScale) {
        self.max_time = commit.datetime;
        self.progress = scale.map(commit.datetime);
    }

    /// The order-preserving subsequence of commits at or before the
    /// cutoff. Commits are sorted ascending, so this is a prefix slice.
    pub fn filtered<'a>(&self, commits: &'a [Commit]) -> &'a [Commit] {
        let end = commits.partition_point(|c| c.datetime <= self.max_time);
        &commits[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::three_commits;

    fn scale_over(commits: &[Commit]) -> TimeScale {
        TimeScale::new(
            commits[0].datetime,
            commits[commits.len() - 1].datetime,
            (0.0, 100.0),
        )
    }

    #[test]
    fn initial_state_shows_everything() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let filter = FilterState::new(&scale);
        assert_eq!(filter.progress(), 100.0);
        assert_eq!(filter.filtered(&commits).len(), 3);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);
        filter.set_progress(scale.map(commits[1].datetime), &scale);
        let visible = filter.filtered(&commits);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].id, commits[1].id);
    }

    #[test]
    fn set_progress_is_idempotent() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);

        assert!(filter.set_progress(40.0, &scale));
        let first = filter.filtered(&commits).len();
        // Same value again: no change reported, same filtered set.
        assert!(!filter.set_progress(40.0, &scale));
        assert_eq!(filter.filtered(&commits).len(), first);
    }

    #[test]
    fn enter_commit_pins_exact_datetime() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);

        filter.enter_commit(&commits[1], &scale);
        assert_eq!(filter.max_time(), commits[1].datetime);
        // Prefix through index 1, inclusive.
        let visible = filter.filtered(&commits);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible.last().map(|c| c.id.clone()), Some(commits[1].id.clone()));
        // Slider display is synchronized through the forward map.
        assert!((filter.progress() - scale.map(commits[1].datetime)).abs() < 1e-9);
    }

    #[test]
    fn filtered_preserves_ascending_order() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let filter = FilterState::new(&scale);
        let visible = filter.filtered(&commits);
        assert!(visible.windows(2).all(|w| w[0].datetime <= w[1].datetime));
    }

    #[test]
    fn empty_commit_list() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let filter = FilterState::new(&scale);
        assert!(filter.filtered(&[]).is_empty());
    }
}
