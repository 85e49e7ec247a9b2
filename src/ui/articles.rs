use crate::app::{App, Focus};
use crate::util::truncate_to_width;
use crate::view::{ArticleCard, ListState as ArticleListState};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const BOOKMARK_MARKER: &str = "★ ";
const META_GAP: &str = "  ";

/// Render the article list panel: a banner for Loading/Error/Empty, cards otherwise.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Articles;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = match &app.list_category {
        Some(category) => format!("News - {}", category.title),
        None => "News".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if let Some(message) = app.list_state.message() {
        let role = match app.list_state {
            ArticleListState::Loading => "banner_loading",
            ArticleListState::Error => "banner_error",
            _ => "banner_empty",
        };
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", message),
            app.style(role),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(banner, area);
        return;
    }

    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .list_state
        .cards()
        .iter()
        .map(|card| card_item(app, card, text_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("card_selected"))
        .highlight_symbol("▌");

    let mut state = ListState::default().with_selected(Some(app.selected_card));
    f.render_stateful_widget(list, area, &mut state);
}

/// Three lines per card: title, time and image, then the action controls.
fn card_item<'a>(app: &App, card: &'a ArticleCard, width: usize) -> ListItem<'a> {
    let bookmarked = app.bookmarks.contains(&card.id);

    let mut title_spans = Vec::with_capacity(2);
    if bookmarked {
        title_spans.push(Span::styled(BOOKMARK_MARKER, app.style("card_bookmarked")));
    }
    let title_width = width.saturating_sub(if bookmarked { BOOKMARK_MARKER.width() } else { 0 });
    title_spans.push(Span::styled(
        truncate_to_width(&card.title, title_width),
        app.style("card_title"),
    ));

    let mut meta = vec![Span::styled(card.time_label.as_str(), app.style("card_time"))];
    if !card.image_url.is_empty() {
        meta.push(Span::raw(META_GAP));
        meta.push(Span::styled(
            truncate_to_width(&card.image_url, image_url_width(&card.time_label, width)),
            app.style("card_image"),
        ));
    }

    let actions: Vec<Span> = card
        .actions
        .iter()
        .flat_map(|action| {
            [
                Span::styled(format!("[{}]", action.label()), app.style("card_action")),
                Span::raw(" "),
            ]
        })
        .collect();

    ListItem::new(vec![
        Line::from(title_spans),
        Line::from(meta),
        Line::from(actions),
        Line::from(""),
    ])
}

/// Columns left for the image URL after the time label on a `width`-column line.
fn image_url_width(time_label: &str, width: usize) -> usize {
    width.saturating_sub(time_label.width() + META_GAP.width())
}
