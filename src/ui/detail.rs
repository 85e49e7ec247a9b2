//! Article detail modal.

use crate::app::App;
use crate::view::DetailView;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::render::centered_rect;

/// Render the detail overlay and record its geometry for scroll clamping.
pub fn render(f: &mut Frame, app: &mut App) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };

    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 10 || overlay.height < 4 {
        return;
    }

    let inner_width = overlay.width.saturating_sub(2) as usize;
    let visible = overlay.height.saturating_sub(2) as usize;
    let lines = detail_lines(app, detail);
    let content = lines
        .iter()
        .map(|line| wrapped_height(&line_text(line), inner_width))
        .sum::<usize>();

    let title = format!(" {} ", detail.title);
    let paragraph_lines = lines;

    app.detail_visible_lines = visible;
    app.detail_content_lines = content;
    app.clamp_detail_scroll();

    let scroll = u16::try_from(app.detail_scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(paragraph_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title)
                .title_bottom(" Esc close, j/k scroll "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(Clear, overlay);
    f.render_widget(paragraph, overlay);
}

fn detail_lines(app: &App, detail: &DetailView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        detail.title.clone(),
        app.style("detail_title"),
    ))];
    if let Some(url) = &detail.image_url {
        lines.push(Line::from(Span::styled(
            format!("Image: {}", url),
            app.style("detail_image"),
        )));
    }
    lines.push(Line::from(""));
    for paragraph in detail.body.lines() {
        lines.push(Line::from(Span::styled(
            paragraph.to_string(),
            app.style("detail_body"),
        )));
    }
    lines
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Rows a line of text occupies when wrapped at `width` columns.
///
/// Approximates the word wrapper by packing words greedily; overlong words
/// are split.
pub(super) fn wrapped_height(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    if text.is_empty() {
        return 1;
    }

    let mut rows = 1;
    let mut used = 0;
    for word in text.split(' ') {
        let w = word.width();
        let needed = if used == 0 { w } else { used + 1 + w };
        if needed <= width {
            used = needed;
        } else if w <= width {
            rows += 1;
            used = w;
        } else {
            if used > 0 {
                rows += 1;
            }
            rows += (w - 1) / width;
            used = w % width;
            if used == 0 {
                used = width;
            }
        }
    }
    rows
}
