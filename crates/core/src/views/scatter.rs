//! Time-vs-hour-of-day commit scatterplot with brush multi-select.
//!
//! The first `render` builds the fixed scaffold (hour gridlines, y-axis
//! labels, axis lines) exactly once. Every render — including the first —
//! recomputes the x-scale domain and the radius domain from the commits
//! currently passed in, so the visible time axis and the size encoding
//! track whatever set is on screen.

use chrono::{DateTime, FixedOffset};
use commitscope_protocol::{
    Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport,
};

use crate::model::Commit;
use crate::scale::{LinearScale, SqrtScale, TimeScale};
use crate::views::breakdown::{BreakdownEntry, language_breakdown};

const MARGIN_TOP: f64 = 10.0;
const MARGIN_RIGHT: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 30.0;
const MARGIN_LEFT: f64 = 40.0;
/// Radius range of the area-proportional dot encoding.
const R_RANGE: (f64, f64) = (2.0, 30.0);
/// Hour gridline/label interval.
const HOUR_STEP: u32 = 4;
/// Tick count target for the x axis.
const X_TICKS: usize = 5;

/// The drawable plot rectangle inside the margins.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl PlotArea {
    fn of(viewport: &Viewport) -> Self {
        Self {
            left: viewport.x + MARGIN_LEFT,
            right: viewport.x + viewport.width - MARGIN_RIGHT,
            top: viewport.y + MARGIN_TOP,
            bottom: viewport.y + viewport.height - MARGIN_BOTTOM,
        }
    }
}

/// Tooltip payload for a hovered dot. Built only from a real commit —
/// a missing/placeholder commit yields no tooltip at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub id: SharedStr,
    pub url: SharedStr,
    /// Full date, e.g. `Saturday, February 1, 2025`.
    pub date: String,
    /// Short time, e.g. `12:00`.
    pub time: String,
    pub author: SharedStr,
    pub total_lines: usize,
}

impl Tooltip {
    pub fn for_commit(commit: Option<&Commit>) -> Option<Tooltip> {
        let commit = commit?;
        Some(Tooltip {
            id: commit.id.clone(),
            url: commit.url.clone(),
            date: commit.datetime.format("%A, %B %-d, %Y").to_string(),
            time: commit.datetime.format("%H:%M").to_string(),
            author: commit.author.clone(),
            total_lines: commit.total_lines,
        })
    }
}

pub struct ScatterPlot {
    area: PlotArea,
    y_scale: LinearScale,
    x_scale: Option<TimeScale>,
    r_scale: Option<SqrtScale>,
    /// Built on the first render, reused verbatim afterwards.
    scaffold: Vec<RenderCommand>,
    /// Brush selection rectangle, in plot (pixel) coordinates.
    brush: Option<Rect>,
}

impl ScatterPlot {
    pub fn new(viewport: &Viewport) -> Self {
        let area = PlotArea::of(viewport);
        Self {
            area,
            y_scale: LinearScale::new((0.0, 24.0), (area.bottom, area.top)),
            x_scale: None,
            r_scale: None,
            scaffold: Vec::new(),
            brush: None,
        }
    }

    /// Whether the scaffold has been built (first render happened).
    pub fn is_initialized(&self) -> bool {
        !self.scaffold.is_empty()
    }

    /// Produce the full frame for the given commits.
    pub fn render(&mut self, commits: &[Commit]) -> Vec<RenderCommand> {
        if self.scaffold.is_empty() {
            self.scaffold = self.build_scaffold();
        }
        let mut commands = self.scaffold.clone();

        let Some(extent) = datetime_extent(commits) else {
            // Nothing to plot: scales are stale, dots absent.
            self.x_scale = None;
            self.r_scale = None;
            return commands;
        };

        let x_scale = TimeScale::new(extent.0, extent.1, (self.area.left, self.area.right));
        let (min_lines, max_lines) = lines_extent(commits);
        let r_scale = SqrtScale::new((min_lines as f64, max_lines as f64), R_RANGE);
        self.x_scale = Some(x_scale);
        self.r_scale = Some(r_scale);

        commands.extend(self.render_x_axis(&x_scale));
        commands.extend(self.render_dots(commits, &x_scale, &r_scale));

        if let Some(brush) = self.brush {
            commands.push(RenderCommand::DrawRect {
                rect: brush,
                color: ThemeToken::BrushOverlay,
                border_color: Some(ThemeToken::BrushBorder),
                label: None,
            });
        }

        commands
    }

    fn build_scaffold(&self) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(16);
        commands.push(RenderCommand::BeginGroup {
            id: "scatter-scaffold".into(),
            label: Some("Commits by time of day".into()),
        });

        // Hour gridlines with HH:00 labels on the left.
        let mut hour = 0u32;
        while hour <= 24 {
            let y = self.y_scale.map(f64::from(hour));
            commands.push(RenderCommand::DrawLine {
                from: Point::new(self.area.left, y),
                to: Point::new(self.area.right, y),
                color: ThemeToken::GridLine,
                width: 0.5,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(self.area.left - 6.0, y),
                text: format!("{:02}:00", hour % 24).into(),
                color: ThemeToken::TextSecondary,
                font_size: 10.0,
                align: TextAlign::Right,
            });
            hour += HOUR_STEP;
        }

        // Axis lines.
        commands.push(RenderCommand::DrawLine {
            from: Point::new(self.area.left, self.area.top),
            to: Point::new(self.area.left, self.area.bottom),
            color: ThemeToken::AxisLine,
            width: 1.0,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(self.area.left, self.area.bottom),
            to: Point::new(self.area.right, self.area.bottom),
            color: ThemeToken::AxisLine,
            width: 1.0,
        });

        commands.push(RenderCommand::EndGroup);
        commands
    }

    fn render_x_axis(&self, x_scale: &TimeScale) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(X_TICKS + 2);
        commands.push(RenderCommand::BeginGroup {
            id: "scatter-x-axis".into(),
            label: None,
        });

        let (start, end) = x_scale.domain();
        let span_ms = (end - start).num_milliseconds();
        for i in 0..=X_TICKS {
            let frac = i as f64 / X_TICKS as f64;
            let t = start + chrono::Duration::milliseconds((span_ms as f64 * frac) as i64);
            let x = x_scale.map(t);
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, self.area.bottom),
                to: Point::new(x, self.area.bottom + 4.0),
                color: ThemeToken::AxisLine,
                width: 1.0,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(x, self.area.bottom + 16.0),
                text: t.format("%b %-d").to_string().into(),
                color: ThemeToken::TextSecondary,
                font_size: 10.0,
                align: TextAlign::Center,
            });
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }

    fn render_dots(
        &self,
        commits: &[Commit],
        x_scale: &TimeScale,
        r_scale: &SqrtScale,
    ) -> Vec<RenderCommand> {
        // Largest dots first so small dots stay hoverable on top.
        let mut ordered: Vec<&Commit> = commits.iter().collect();
        ordered.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

        let mut commands = Vec::with_capacity(ordered.len() + 2);
        commands.push(RenderCommand::BeginGroup {
            id: "scatter-dots".into(),
            label: None,
        });

        for commit in ordered {
            let center = Point::new(x_scale.map(commit.datetime), self.y_scale.map(commit.hour_frac));
            let selected = self
                .brush
                .is_some_and(|brush| brush.contains(center));
            commands.push(RenderCommand::DrawCircle {
                center,
                radius: r_scale.map(commit.total_lines as f64),
                color: if selected {
                    ThemeToken::DotSelected
                } else {
                    ThemeToken::DotFill
                },
                label: Some(commit.id.clone()),
                commit_id: Some(commit.id.clone()),
                selected,
            });
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }

    /// Projected plot position of a commit under the current scales.
    /// `None` before the first non-empty render.
    pub fn project(&self, commit: &Commit) -> Option<Point> {
        let x_scale = self.x_scale.as_ref()?;
        Some(Point::new(
            x_scale.map(commit.datetime),
            self.y_scale.map(commit.hour_frac),
        ))
    }

    pub fn set_brush(&mut self, brush: Option<Rect>) {
        self.brush = brush;
    }

    pub fn brush(&self) -> Option<Rect> {
        self.brush
    }

    /// Inclusive point-in-rect test against the commit's projected
    /// position. Always false without a brush or before a render.
    pub fn is_selected(&self, commit: &Commit) -> bool {
        match (self.brush, self.project(commit)) {
            (Some(brush), Some(point)) => brush.contains(point),
            _ => false,
        }
    }

    /// Commits falling inside the brush rectangle.
    pub fn selected<'a>(&self, commits: &'a [Commit]) -> Vec<&'a Commit> {
        commits.iter().filter(|c| self.is_selected(c)).collect()
    }

    /// `N commits selected`, or `No commits selected` when none are.
    pub fn selection_count_label(&self, commits: &[Commit]) -> String {
        match self.selected(commits).len() {
            0 => "No commits selected".to_string(),
            n => format!("{n} commits selected"),
        }
    }

    /// Language breakdown over the brushed commits, falling back to the
    /// whole currently filtered set when the selection is empty.
    pub fn selection_breakdown(&self, commits: &[Commit]) -> Vec<BreakdownEntry> {
        let selected = self.selected(commits);
        if selected.is_empty() {
            language_breakdown(commits)
        } else {
            language_breakdown(selected.into_iter())
        }
    }
}

fn datetime_extent(commits: &[Commit]) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let mut iter = commits.iter();
    let first = iter.next()?;
    let mut min = first.datetime;
    let mut max = first.datetime;
    for c in iter {
        min = min.min(c.datetime);
        max = max.max(c.datetime);
    }
    Some((min, max))
}

fn lines_extent(commits: &[Commit]) -> (usize, usize) {
    commits.iter().fold((usize::MAX, 0), |(min, max), c| {
        (min.min(c.total_lines), max.max(c.total_lines))
    })
}
