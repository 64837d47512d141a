//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use commitscope_protocol::{RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
    ));

    let bg = if dark { "#1a1a2e" } else { "#ffffff" };
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, color, label, ..
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" rx="1">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                label,
                selected,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let opacity = if *selected { 1.0 } else { 0.7 };
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}" fill-opacity="{opacity}">"#,
                    center.x, center.y,
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</circle>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                align,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            // Group markers don't affect static SVG output
            _ => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background | ThemeToken::Surface => "#181818",
            ThemeToken::Border => "#303030",
            ThemeToken::TextPrimary => "#ececec",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::AxisLine => "#707080",
            ThemeToken::GridLine => "#2c2c3a",
            ThemeToken::DotFill => "#4682b4",
            ThemeToken::DotSelected | ThemeToken::SelectionHighlight => "#ff7f0e",
            ThemeToken::HoverHighlight => "#448aff",
            ThemeToken::BrushOverlay => "#44556633",
            ThemeToken::BrushBorder => "#8899aa",
            other => category_color(other),
        }
    } else {
        match token {
            ThemeToken::Background | ThemeToken::Surface => "#ffffff",
            ThemeToken::Border => "#dee2e6",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#666677",
            ThemeToken::AxisLine => "#445",
            ThemeToken::GridLine => "#e3e3ea",
            ThemeToken::DotFill => "#4682b4",
            ThemeToken::DotSelected | ThemeToken::SelectionHighlight => "#e8590c",
            ThemeToken::HoverHighlight => "#ffd60a",
            ThemeToken::BrushOverlay => "#aabbcc55",
            ThemeToken::BrushBorder => "#778899",
            other => category_color(other),
        }
    }
}

// Tableau10 hex values.
fn category_color(token: ThemeToken) -> &'static str {
    match token {
        ThemeToken::Category0 => "#4e79a7",
        ThemeToken::Category1 => "#f28e2c",
        ThemeToken::Category2 => "#e15759",
        ThemeToken::Category3 => "#76b7b2",
        ThemeToken::Category4 => "#59a14f",
        ThemeToken::Category5 => "#edc949",
        ThemeToken::Category6 => "#af7aa1",
        ThemeToken::Category7 => "#ff9da7",
        ThemeToken::Category8 => "#9c755f",
        ThemeToken::Category9 => "#bab0ab",
        _ => "#999999",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
