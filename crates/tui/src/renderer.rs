//! Terminal renderer: paints `RenderCommand` lists into ratatui cells and
//! feeds key events into the core's filter and view state. Each input
//! event runs one complete state+render update before the next is read.

use std::io::stdout;

use anyhow::Result;
use commitscope_core::filter::FilterState;
use commitscope_core::metrics::CorpusStats;
use commitscope_core::model::History;
use commitscope_core::scale::TimeScale;
use commitscope_core::views::breakdown::render_breakdown;
use commitscope_core::views::files::FileComposition;
use commitscope_core::views::narrative::Story;
use commitscope_core::views::scatter::ScatterPlot;
use commitscope_core::views::stats::render_stats;
use commitscope_protocol::{
    CategoryPalette, RenderCommand, TextAlign, ThemeToken, Viewport, Rect as PlotRect,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

/// Logical pixels per terminal cell, horizontally and vertically.
const CELL_W: f64 = 7.0;
const CELL_H: f64 = 14.0;
/// Fixed logical size of the scatterplot, as on the source page.
const PLOT_W: f64 = 1000.0;
const PLOT_H: f64 = 600.0;
/// Slider step per keypress, in progress units.
const SLIDER_STEP: f64 = 2.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background | ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::AxisLine => Color::Gray,
        ThemeToken::GridLine => Color::DarkGray,
        ThemeToken::DotFill => Color::Blue,
        ThemeToken::DotSelected => Color::LightRed,
        ThemeToken::BrushOverlay => Color::Rgb(40, 60, 80),
        ThemeToken::BrushBorder => Color::Cyan,
        ThemeToken::SelectionHighlight => Color::LightYellow,
        ThemeToken::HoverHighlight => Color::Yellow,
        ThemeToken::Category0 => Color::Blue,
        ThemeToken::Category1 => Color::Yellow,
        ThemeToken::Category2 => Color::Red,
        ThemeToken::Category3 => Color::Cyan,
        ThemeToken::Category4 => Color::Green,
        ThemeToken::Category5 => Color::LightYellow,
        ThemeToken::Category6 => Color::Magenta,
        ThemeToken::Category7 => Color::LightRed,
        ThemeToken::Category8 => Color::Rgb(156, 117, 95),
        ThemeToken::Category9 => Color::Gray,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Stats,
    Scatter,
    Files,
    Story,
}

impl Pane {
    fn next(self) -> Pane {
        match self {
            Pane::Stats => Pane::Scatter,
            Pane::Scatter => Pane::Files,
            Pane::Files => Pane::Story,
            Pane::Story => Pane::Stats,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Pane::Stats => "Summary",
            Pane::Scatter => "Commits by time of day",
            Pane::Files => "Codebase evolution",
            Pane::Story => "Commit story",
        }
    }
}

struct App {
    history: History,
    stats: CorpusStats,
    scale: Option<TimeScale>,
    scatter_filter: Option<FilterState>,
    file_filter: Option<FilterState>,
    plot: ScatterPlot,
    files: FileComposition,
    palette: CategoryPalette,
    story: Story,
    pane: Pane,
    brush_on: bool,
}

impl App {
    fn new(history: History) -> Self {
        let stats = CorpusStats::compute(&history);
        let scale = TimeScale::from_extent(
            history.start_time().zip(history.end_time()),
            (0.0, 100.0),
        );
        let scatter_filter = scale.as_ref().map(FilterState::new);
        let file_filter = scale.as_ref().map(FilterState::new);
        let story = Story::new(history.commits());
        let mut app = Self {
            history,
            stats,
            scale,
            scatter_filter,
            file_filter,
            plot: ScatterPlot::new(&Viewport::new(PLOT_W, PLOT_H)),
            files: FileComposition::new(),
            palette: CategoryPalette::new(),
            story,
            pane: Pane::Scatter,
            brush_on: false,
        };
        app.refresh_files();
        app
    }

    fn scatter_commits(&self) -> &[commitscope_core::model::Commit] {
        match &self.scatter_filter {
            Some(filter) => filter.filtered(self.history.commits()),
            None => self.history.commits(),
        }
    }

    fn refresh_files(&mut self) {
        let visible = match &self.file_filter {
            Some(filter) => filter.filtered(self.history.commits()),
            None => self.history.commits(),
        };
        // filtered() borrows self, so copy before the mutable update.
        let commits: Vec<_> = visible.to_vec();
        self.files.update(&commits, &mut self.palette);
    }

    fn move_scatter_slider(&mut self, delta: f64) {
        let (Some(scale), Some(filter)) = (self.scale.as_ref(), self.scatter_filter.as_mut())
        else {
            return;
        };
        filter.set_progress(filter.progress() + delta, scale);
    }

    fn move_file_slider(&mut self, delta: f64) {
        let changed = {
            let (Some(scale), Some(filter)) = (self.scale.as_ref(), self.file_filter.as_mut())
            else {
                return;
            };
            filter.set_progress(filter.progress() + delta, scale)
        };
        if changed {
            self.refresh_files();
        }
    }

    fn step_story(&mut self, forward: bool) {
        let (Some(scale), Some(filter)) = (self.scale.as_ref(), self.scatter_filter.as_mut())
        else {
            return;
        };
        let commits = self.history.commits();
        if forward {
            self.story.next_step(commits, filter, scale);
        } else {
            self.story.prev_step(commits, filter, scale);
        }
    }

    fn toggle_brush(&mut self) {
        self.brush_on = !self.brush_on;
        if self.brush_on {
            // Start with the middle half of the plot selected.
            self.plot.set_brush(Some(PlotRect::new(
                PLOT_W * 0.25,
                PLOT_H * 0.25,
                PLOT_W * 0.5,
                PLOT_H * 0.5,
            )));
        } else {
            self.plot.set_brush(None);
        }
    }

    fn move_brush(&mut self, dx: f64, dy: f64) {
        if let Some(brush) = self.plot.brush() {
            self.plot.set_brush(Some(PlotRect::new(
                brush.x + dx,
                brush.y + dy,
                brush.w,
                brush.h,
            )));
        }
    }

    fn slider_line(filter: Option<&FilterState>, name: &str) -> String {
        match filter {
            Some(filter) => format!(
                "{name}: {:>3.0}%  up to {}",
                filter.progress(),
                filter.max_time().format("%Y-%m-%d %H:%M"),
            ),
            None => format!("{name}: no data"),
        }
    }
}

pub fn run(history: History) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(history);

    loop {
        // One full state+render update per iteration.
        let header = format!(
            " commitscope — {} commits, {} lines | Tab pane | ←→ slider | [ ] files | j/k story | b brush | q quit ",
            app.history.commit_count(),
            app.history.row_count(),
        );

        let (commands, logical, footers) = build_frame(&mut app);

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header_block = Block::default()
                .title(format!("{header}| {}", app.pane.title()))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header_block, header_area);

            let footer_rows = footers.len() as u16;
            let content_area = Rect::new(
                0,
                1,
                area.width,
                area.height.saturating_sub(1 + footer_rows),
            );
            paint(frame, content_area, &commands, logical);

            for (i, line) in footers.iter().enumerate() {
                let y = area.height.saturating_sub(footer_rows - i as u16);
                let footer_area = Rect::new(0, y, area.width, 1);
                let footer = Block::default()
                    .title(line.as_str())
                    .style(Style::default().fg(Color::Gray).bg(Color::Black));
                frame.render_widget(footer, footer_area);
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Tab => app.pane = app.pane.next(),
                    KeyCode::Left => app.move_scatter_slider(-SLIDER_STEP),
                    KeyCode::Right => app.move_scatter_slider(SLIDER_STEP),
                    KeyCode::Char('[') => app.move_file_slider(-SLIDER_STEP),
                    KeyCode::Char(']') => app.move_file_slider(SLIDER_STEP),
                    KeyCode::Char('j') => app.step_story(true),
                    KeyCode::Char('k') => app.step_story(false),
                    KeyCode::Char('b') => app.toggle_brush(),
                    KeyCode::Char('h') => app.move_brush(-PLOT_W * 0.05, 0.0),
                    KeyCode::Char('l') => app.move_brush(PLOT_W * 0.05, 0.0),
                    KeyCode::Char('u') => app.move_brush(0.0, -PLOT_H * 0.05),
                    KeyCode::Char('d') => app.move_brush(0.0, PLOT_H * 0.05),
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Render the active pane into commands plus its logical size and footer
/// lines.
fn build_frame(app: &mut App) -> (Vec<RenderCommand>, (f64, f64), Vec<String>) {
    match app.pane {
        Pane::Stats => {
            let viewport = Viewport::new(420.0, 260.0);
            let commands = render_stats(&app.stats, &viewport);
            (commands, (viewport.width, viewport.height), Vec::new())
        }
        Pane::Scatter => {
            let visible: Vec<_> = app.scatter_commits().to_vec();
            let commands = app.plot.render(&visible);
            let selection = app.plot.selection_count_label(&visible);
            let breakdown = app.plot.selection_breakdown(&visible);
            let languages = if breakdown.is_empty() {
                "no lines in range".to_string()
            } else {
                breakdown
                    .iter()
                    .map(|e| e.label())
                    .collect::<Vec<_>>()
                    .join("  ·  ")
            };
            let footers = vec![
                format!(" {}", App::slider_line(app.scatter_filter.as_ref(), "commits")),
                format!(" {selection}  |  {languages}"),
            ];
            (commands, (PLOT_W, PLOT_H), footers)
        }
        Pane::Files => {
            let viewport = Viewport::new(420.0, 600.0);
            let commands = app.files.render(&viewport);
            let footers = vec![format!(
                " {}",
                App::slider_line(app.file_filter.as_ref(), "files")
            )];
            (commands, (viewport.width, viewport.height), footers)
        }
        Pane::Story => {
            let viewport = Viewport::new(840.0, 600.0);
            let mut commands = app.story.render(&viewport);
            // The story pane shows the scatter alongside in spirit: the
            // breakdown legend of the current scatter cutoff.
            let visible: Vec<_> = app.scatter_commits().to_vec();
            let entries = commitscope_core::views::breakdown::language_breakdown(&visible);
            commands.extend(render_breakdown(&entries, &mut app.palette));
            (commands, (viewport.width, viewport.height), Vec::new())
        }
    }
}

/// Map floating-point command coordinates to terminal cells.
fn paint(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    commands: &[RenderCommand],
    logical: (f64, f64),
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let sx = f64::from(area.width) * CELL_W / logical.0;
    let sy = f64::from(area.height) * CELL_H / logical.1;
    let to_cell = |x: f64, y: f64| -> Option<(u16, u16)> {
        let col = (x * sx / CELL_W) as i64;
        let row = (y * sy / CELL_H) as i64;
        if col < 0 || row < 0 || col >= i64::from(area.width) || row >= i64::from(area.height) {
            return None;
        }
        Some((area.x + col as u16, area.y + row as u16))
    };

    let buf = frame.buffer_mut();
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let fg = theme_to_color(*color);
                let Some((x0, y0)) = to_cell(rect.x, rect.y) else {
                    continue;
                };
                let (x1, y1) = to_cell(rect.x + rect.w, rect.y + rect.h).unwrap_or((
                    area.x + area.width - 1,
                    area.y + area.height - 1,
                ));
                for y in y0..=y1.min(area.y + area.height - 1) {
                    for x in x0..=x1.min(area.x + area.width - 1) {
                        buf[(x, y)].set_char('▪').set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawCircle {
                center,
                color,
                selected,
                ..
            } => {
                if let Some((x, y)) = to_cell(center.x, center.y) {
                    let fg = theme_to_color(*color);
                    let glyph = if *selected { '◉' } else { '●' };
                    buf[(x, y)].set_char(glyph).set_fg(fg);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let shift = match align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => text.len() as f64 / 2.0,
                    TextAlign::Right => text.len() as f64,
                };
                let fg = theme_to_color(*color);
                for (i, ch) in text.chars().enumerate() {
                    let x = position.x + (i as f64 - shift) * CELL_W * logical.0
                        / (f64::from(area.width) * CELL_W);
                    if let Some((cx, cy)) = to_cell(x, position.y) {
                        buf[(cx, cy)].set_char(ch).set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let fg = theme_to_color(*color);
                if (from.y - to.y).abs() < f64::EPSILON {
                    // Horizontal
                    let (a, b) = if from.x <= to.x { (from, to) } else { (to, from) };
                    let mut x = a.x;
                    while x <= b.x {
                        if let Some((cx, cy)) = to_cell(x, a.y) {
                            buf[(cx, cy)].set_char('─').set_fg(fg);
                        }
                        x += logical.0 / f64::from(area.width);
                    }
                } else if (from.x - to.x).abs() < f64::EPSILON {
                    // Vertical
                    let (a, b) = if from.y <= to.y { (from, to) } else { (to, from) };
                    let mut y = a.y;
                    while y <= b.y {
                        if let Some((cx, cy)) = to_cell(a.x, y) {
                            buf[(cx, cy)].set_char('│').set_fg(fg);
                        }
                        y += logical.1 / f64::from(area.height);
                    }
                }
                // Diagonals don't occur in these views.
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}
