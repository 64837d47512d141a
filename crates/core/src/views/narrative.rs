//! Narrative steps: one paragraph per commit, ascending, each bound to
//! the scatter filter so entering a step replays history up to that
//! commit.

use commitscope_protocol::{Point, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport};

use crate::filter::FilterState;
use crate::model::Commit;
use crate::scale::TimeScale;

const STEP_HEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeStep {
    /// Position in the ascending commit sequence.
    pub index: usize,
    pub commit_id: SharedStr,
    pub url: SharedStr,
    pub text: String,
}

/// Build one step per commit, in the same ascending-datetime order as
/// the commit sequence. The first commit gets its own phrasing.
pub fn build_steps(commits: &[Commit]) -> Vec<NarrativeStep> {
    commits
        .iter()
        .enumerate()
        .map(|(index, commit)| {
            let when = commit.datetime.format("%A, %B %-d, %Y, %H:%M");
            let deed = if index == 0 {
                "my first commit, and it was glorious"
            } else {
                "another glorious commit"
            };
            NarrativeStep {
                index,
                commit_id: commit.id.clone(),
                url: commit.url.clone(),
                text: format!(
                    "On {when}, I made {deed}. I edited {} lines across {} files. \
                     Then I looked over all I had made, and I saw that it was very good.",
                    commit.total_lines,
                    commit.files_touched(),
                ),
            }
        })
        .collect()
}

/// The scroll controller: tracks the active step and pushes each
/// step-enter into the scatter's `FilterState`. The slider and this
/// controller race on the same state, last write wins.
#[derive(Debug, Clone, Default)]
pub struct Story {
    steps: Vec<NarrativeStep>,
    current: Option<usize>,
}

impl Story {
    pub fn new(commits: &[Commit]) -> Self {
        Self {
            steps: build_steps(commits),
            current: None,
        }
    }

    pub fn steps(&self) -> &[NarrativeStep] {
        &self.steps
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Enter step `index`: pin the filter to that commit's exact instant
    /// and synchronize the slider through the forward map. Returns
    /// `false` for an out-of-range index (no-op).
    pub fn enter_step(
        &mut self,
        index: usize,
        commits: &[Commit],
        filter: &mut FilterState,
        scale: &TimeScale,
    ) -> bool {
        let Some(commit) = commits.get(index) else {
            return false;
        };
        self.current = Some(index);
        filter.enter_commit(commit, scale);
        true
    }

    /// Step forward, saturating at the last commit.
    pub fn next_step(
        &mut self,
        commits: &[Commit],
        filter: &mut FilterState,
        scale: &TimeScale,
    ) -> bool {
        let next = self.current.map_or(0, |i| i + 1);
        if next >= commits.len() {
            return false;
        }
        self.enter_step(next, commits, filter, scale)
    }

    /// Step backward, saturating at the first commit.
    pub fn prev_step(
        &mut self,
        commits: &[Commit],
        filter: &mut FilterState,
        scale: &TimeScale,
    ) -> bool {
        match self.current {
            Some(i) if i > 0 => self.enter_step(i - 1, commits, filter, scale),
            _ => false,
        }
    }

    /// Emit the step paragraphs, highlighting the active one.
    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        if self.steps.is_empty() {
            return Vec::new();
        }
        let mut commands = Vec::with_capacity(self.steps.len() + 2);
        commands.push(RenderCommand::BeginGroup {
            id: "scatter-story".into(),
            label: Some("Commit narrative".into()),
        });
        for step in &self.steps {
            let y = viewport.y + step.index as f64 * STEP_HEIGHT;
            let active = self.current == Some(step.index);
            commands.push(RenderCommand::DrawText {
                position: Point::new(viewport.x, y + STEP_HEIGHT * 0.75),
                text: step.text.as_str().into(),
                color: if active {
                    ThemeToken::SelectionHighlight
                } else {
                    ThemeToken::TextPrimary
                },
                font_size: 11.0,
                align: TextAlign::Left,
            });
        }
        commands.push(RenderCommand::EndGroup);
        commands
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
    fn first_step_has_distinct_phrasing() {
        let commits = three_commits();
        let steps = build_steps(&commits);
        assert_eq!(steps.len(), 3);
        assert!(steps[0].text.contains("my first commit, and it was glorious"));
        assert!(steps[1].text.contains("another glorious commit"));
        assert!(steps[0].text.contains("1 lines across 1 files"));
    }

    #[test]
    fn enter_step_filters_prefix_through_that_commit() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);
        let mut story = Story::new(&commits);

        assert!(story.enter_step(1, &commits, &mut filter, &scale));
        assert_eq!(story.current(), Some(1));
        assert_eq!(filter.max_time(), commits[1].datetime);
        assert_eq!(filter.filtered(&commits).len(), 2);
    }

    #[test]
    fn out_of_range_step_is_a_noop() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);
        let mut story = Story::new(&commits);

        assert!(!story.enter_step(9, &commits, &mut filter, &scale));
        assert!(story.current().is_none());
        assert_eq!(filter.filtered(&commits).len(), 3);
    }

    #[test]
    fn stepping_saturates_at_both_ends() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);
        let mut story = Story::new(&commits);

        assert!(!story.prev_step(&commits, &mut filter, &scale));
        assert!(story.next_step(&commits, &mut filter, &scale));
        assert_eq!(story.current(), Some(0));
        assert!(story.next_step(&commits, &mut filter, &scale));
        assert!(story.next_step(&commits, &mut filter, &scale));
        assert!(!story.next_step(&commits, &mut filter, &scale));
        assert_eq!(story.current(), Some(2));
    }

    #[test]
    fn render_marks_the_active_step() {
        let commits = three_commits();
        let scale = scale_over(&commits);
        let mut filter = FilterState::new(&scale);
        let mut story = Story::new(&commits);
        story.enter_step(0, &commits, &mut filter, &scale);

        let commands = story.render(&Viewport::new(400.0, 300.0));
        let highlighted = commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawText {
                        color: ThemeToken::SelectionHighlight,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(highlighted, 1);
    }
}
