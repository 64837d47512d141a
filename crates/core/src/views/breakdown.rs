//! Language breakdown: rows-per-language counts over a commit set.

use std::collections::HashMap;

use commitscope_protocol::{
    CategoryPalette, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken,
};

use crate::model::Commit;

const ROW_HEIGHT: f64 = 18.0;
const SWATCH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    pub kind: SharedStr,
    pub count: usize,
    /// Fraction of the set's rows, in [0, 1].
    pub share: f64,
}

impl BreakdownEntry {
    /// Display form: `js: 6 lines (60.0%)`.
    pub fn label(&self) -> String {
        format!(
            "{}: {} lines ({:.1}%)",
            self.kind,
            self.count,
            self.share * 100.0
        )
    }
}

/// Count rows per language `kind` across the given commits, in
/// first-encountered order. An empty set short-circuits to an empty
/// breakdown — the percentage denominator is never zero.
pub fn language_breakdown<'a>(commits: impl IntoIterator<Item = &'a Commit>) -> Vec<BreakdownEntry> {
    let mut order: Vec<SharedStr> = Vec::new();
    let mut counts: HashMap<SharedStr, usize> = HashMap::new();
    let mut total = 0usize;

    for row in commits.into_iter().flat_map(|c| &c.rows) {
        if !counts.contains_key(&row.kind) {
            order.push(row.kind.clone());
        }
        *counts.entry(row.kind.clone()).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    order
        .into_iter()
        .map(|kind| {
            let count = counts.get(&kind).copied().unwrap_or(0);
            BreakdownEntry {
                kind,
                count,
                share: count as f64 / total as f64,
            }
        })
        .collect()
}

/// Emit the breakdown as a legend list: one color swatch + label per
/// language, colors assigned through the shared ordinal palette.
pub fn render_breakdown(
    entries: &[BreakdownEntry],
    palette: &mut CategoryPalette,
) -> Vec<RenderCommand> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(entries.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "language-breakdown".into(),
        label: Some("Language breakdown".into()),
    });

    for (i, entry) in entries.iter().enumerate() {
        let y = i as f64 * ROW_HEIGHT;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, y + (ROW_HEIGHT - SWATCH) / 2.0, SWATCH, SWATCH),
            color: palette.token(&entry.kind),
            border_color: Some(ThemeToken::Border),
            label: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(SWATCH + 6.0, y + ROW_HEIGHT * 0.75),
            text: entry.label().into(),
            color: ThemeToken::TextPrimary,
            font_size: 11.0,
            align: TextAlign::Left,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
