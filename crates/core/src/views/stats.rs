//! The static corpus-metrics panel, laid out as label/value rows.

use commitscope_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::metrics::CorpusStats;

const ROW_HEIGHT: f64 = 18.0;

pub fn render_stats(stats: &CorpusStats, viewport: &Viewport) -> Vec<RenderCommand> {
    let entries = stats.entries();
    let value_x = viewport.x + viewport.width * 0.55;

    let mut commands = Vec::with_capacity(entries.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "stats".into(),
        label: Some("Summary".into()),
    });

    for (i, (label, value)) in entries.iter().enumerate() {
        let y = viewport.y + i as f64 * ROW_HEIGHT + ROW_HEIGHT * 0.75;
        commands.push(RenderCommand::DrawText {
            position: Point::new(viewport.x, y),
            text: (*label).into(),
            color: ThemeToken::TextSecondary,
            font_size: 11.0,
            align: TextAlign::Left,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(value_x, y),
            text: value.as_str().into(),
            color: ThemeToken::TextPrimary,
            font_size: 11.0,
            align: TextAlign::Left,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::History;
    use crate::testutil::{REPO_URL, make_row};

    #[test]
    fn emits_a_row_per_metric() {
        let history = History::from_rows(
            vec![make_row("c1", "a.rs", "rust", "2025-01-01T09:00:00-08:00")],
            REPO_URL,
        );
        let stats = CorpusStats::compute(&history);
        let commands = render_stats(&stats, &Viewport::new(400.0, 300.0));
        let texts = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        // Ten metrics, label + value each.
        assert_eq!(texts, 20);
    }

    #[test]
    fn empty_corpus_renders_na_not_panic() {
        let history = History::from_rows(Vec::new(), REPO_URL);
        let stats = CorpusStats::compute(&history);
        let commands = render_stats(&stats, &Viewport::new(400.0, 300.0));
        let has_na = commands.iter().any(|c| {
            matches!(c, RenderCommand::DrawText { text, .. } if text.as_str() == "N/A")
        });
        assert!(has_na);
    }
}
