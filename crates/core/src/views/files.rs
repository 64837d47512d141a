//! File-composition view: one block per file, one colored marker per
//! line, driven by the file slider's independent cutoff.

use std::collections::HashMap;

use commitscope_protocol::{
    CategoryPalette, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport,
};

use crate::model::Commit;

const LABEL_HEIGHT: f64 = 16.0;
const MARKER: f64 = 5.0;
const MARKER_GAP: f64 = 2.0;
const GROUP_GAP: f64 = 8.0;

/// One file block: the path plus one color token per line, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    pub name: SharedStr,
    pub line_colors: Vec<ThemeToken>,
}

impl FileGroup {
    pub fn line_count(&self) -> usize {
        self.line_colors.len()
    }
}

/// The per-file listing, reconciled across updates by file identity so
/// the view animates smoothly as the slider moves: existing groups are
/// updated in place, vanished files removed, new files appended, then
/// the whole list is re-sorted descending by line count.
#[derive(Debug, Clone, Default)]
pub struct FileComposition {
    groups: Vec<FileGroup>,
}

impl FileComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[FileGroup] {
        &self.groups
    }

    pub fn update(&mut self, commits: &[Commit], palette: &mut CategoryPalette) {
        let mut order: Vec<SharedStr> = Vec::new();
        let mut fresh: HashMap<SharedStr, Vec<ThemeToken>> = HashMap::new();

        for row in commits.iter().flat_map(|c| &c.rows) {
            let colors = match fresh.get_mut(&row.file) {
                Some(colors) => colors,
                None => {
                    order.push(row.file.clone());
                    fresh.entry(row.file.clone()).or_default()
                }
            };
            colors.push(palette.token(&row.kind));
        }

        // Remove files no longer present, update survivors in place.
        self.groups.retain(|g| fresh.contains_key(&g.name));
        for group in &mut self.groups {
            if let Some(colors) = fresh.remove(&group.name) {
                group.line_colors = colors;
            }
        }
        // Append files appearing for the first time, in first-seen order.
        for name in order {
            if let Some(line_colors) = fresh.remove(&name) {
                self.groups.push(FileGroup { name, line_colors });
            }
        }

        // Largest file first; stable, so equal counts keep their order.
        self.groups.sort_by(|a, b| b.line_count().cmp(&a.line_count()));
    }

    /// Emit the listing: a `name — N lines` label per file, then one
    /// marker per line, wrapped to the viewport width.
    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        if self.groups.is_empty() {
            return Vec::new();
        }

        let per_row = (((viewport.width) / (MARKER + MARKER_GAP)).floor() as usize).max(1);
        let mut commands = Vec::with_capacity(self.groups.len() * 4);
        commands.push(RenderCommand::BeginGroup {
            id: "files".into(),
            label: Some("Codebase evolution".into()),
        });

        let mut y = viewport.y;
        for group in &self.groups {
            commands.push(RenderCommand::DrawText {
                position: Point::new(viewport.x, y + LABEL_HEIGHT * 0.75),
                text: format!("{} — {} lines", group.name, group.line_count()).into(),
                color: ThemeToken::TextPrimary,
                font_size: 11.0,
                align: TextAlign::Left,
            });
            y += LABEL_HEIGHT;

            for (i, &color) in group.line_colors.iter().enumerate() {
                let col = i % per_row;
                let row = i / per_row;
                commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(
                        viewport.x + col as f64 * (MARKER + MARKER_GAP),
                        y + row as f64 * (MARKER + MARKER_GAP),
                        MARKER,
                        MARKER,
                    ),
                    color,
                    border_color: None,
                    label: None,
                });
            }
            let marker_rows = group.line_colors.len().div_ceil(per_row);
            y += marker_rows as f64 * (MARKER + MARKER_GAP) + GROUP_GAP;
        }

        commands.push(RenderCommand::EndGroup);
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{REPO_URL, make_row};

    fn commits_with(files: &[(&str, &str, usize)]) -> Vec<Commit> {
        // (file, kind, row count), all in one commit.
        let mut rows = Vec::new();
        for &(file, kind, count) in files {
            for _ in 0..count {
                rows.push(make_row("c1", file, kind, "2025-01-01T09:00:00-08:00"));
            }
        }
        Commit::aggregate(rows, REPO_URL)
    }

    #[test]
    fn sorts_files_descending_by_line_count() {
        let commits = commits_with(&[("small.css", "css", 2), ("big.rs", "rust", 5)]);
        let mut view = FileComposition::new();
        let mut palette = CategoryPalette::new();
        view.update(&commits, &mut palette);

        let names: Vec<_> = view.groups().iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec![SharedStr::from("big.rs"), SharedStr::from("small.css")]);
        assert_eq!(view.groups()[0].line_count(), 5);
    }

    #[test]
    fn reconciles_across_updates() {
        let mut view = FileComposition::new();
        let mut palette = CategoryPalette::new();

        let first = commits_with(&[("a.rs", "rust", 3), ("b.css", "css", 1)]);
        view.update(&first, &mut palette);
        assert_eq!(view.groups().len(), 2);

        // b.css disappears, c.js appears, a.rs grows.
        let second = commits_with(&[("a.rs", "rust", 4), ("c.js", "js", 2)]);
        view.update(&second, &mut palette);

        let names: Vec<_> = view.groups().iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec![SharedStr::from("a.rs"), SharedStr::from("c.js")]);
        assert_eq!(view.groups()[0].line_count(), 4);
    }

    #[test]
    fn language_colors_are_stable_across_updates() {
        let mut view = FileComposition::new();
        let mut palette = CategoryPalette::new();

        view.update(&commits_with(&[("a.rs", "rust", 1)]), &mut palette);
        let rust_color = view.groups()[0].line_colors[0];

        // Another language arriving later must not shift rust's slot.
        view.update(
            &commits_with(&[("b.css", "css", 2), ("a.rs", "rust", 1)]),
            &mut palette,
        );
        let rust_group = view
            .groups()
            .iter()
            .find(|g| g.name == "a.rs")
            .expect("a.rs present");
        assert_eq!(rust_group.line_colors[0], rust_color);
    }

    #[test]
    fn render_emits_label_and_marker_per_line() {
        let commits = commits_with(&[("a.rs", "rust", 3)]);
        let mut view = FileComposition::new();
        let mut palette = CategoryPalette::new();
        view.update(&commits, &mut palette);

        let commands = view.render(&Viewport::new(400.0, 300.0));
        let labels = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        let markers = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .count();
        assert_eq!(labels, 1);
        assert_eq!(markers, 3);
    }

    #[test]
    fn empty_update_clears_the_listing() {
        let mut view = FileComposition::new();
        let mut palette = CategoryPalette::new();
        view.update(&commits_with(&[("a.rs", "rust", 1)]), &mut palette);
        view.update(&[], &mut palette);
        assert!(view.groups().is_empty());
        assert!(view.render(&Viewport::new(400.0, 300.0)).is_empty());
    }
}
