//! View models: the data each surface renders, derived from API records.
//!
//! Renderers in `ui` only ever see these types. Keeping the mapping here
//! means the image fallback chain, time labels and list states are testable
//! without a terminal.

use crate::api::{ArticleDetail, ArticleImage, ArticleSummary, Category};
use crate::util::{one_line, strip_control_chars};
use chrono::{DateTime, Utc};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const ERROR_MESSAGE: &str = "Something went wrong";
pub const EMPTY_MESSAGE: &str = "No news found for this category";

/// srcset entry tried first when picking a card image.
pub const DEFAULT_IMAGE_VARIANT: usize = 5;

// ============================================================================
// Image Policy
// ============================================================================

/// Which image URL a card shows.
///
/// The chain is: `image.srcset[variant_index].url`, then `image.url`, then the
/// empty string. With `variant_index = None` the srcset step is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    pub variant_index: Option<usize>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            variant_index: Some(DEFAULT_IMAGE_VARIANT),
        }
    }
}

impl ImagePolicy {
    pub fn resolve(&self, image: Option<&ArticleImage>) -> String {
        let Some(image) = image else {
            return String::new();
        };

        let variant = self
            .variant_index
            .and_then(|idx| image.srcset.get(idx))
            .and_then(|v| v.url.as_deref())
            .filter(|url| !url.is_empty());

        variant
            .or_else(|| image.url.as_deref().filter(|url| !url.is_empty()))
            .map(one_line)
            .unwrap_or_default()
    }
}

// ============================================================================
// Time Labels
// ============================================================================

/// Format an article time for display.
///
/// RFC 3339 and RFC 2822 timestamps become a relative age (`"12m"`, `"3h"`,
/// `"2d"`, or `"Mar 04"` past a week). Anything else, e.g. `"2 hours ago"`
/// from the API, is shown as given.
pub fn format_time_label(raw: &str, now: DateTime<Utc>) -> String {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .map(|dt| dt.with_timezone(&Utc));

    let Ok(published) = parsed else {
        return one_line(raw);
    };

    let diff = (now - published).num_seconds();

    if diff < 0 {
        return "now".to_string();
    }
    if diff < 3600 {
        return format!("{}m", diff / 60);
    }
    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }
    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }
    published.format("%b %d").to_string()
}

// ============================================================================
// Category Navigation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub title: String,
    pub active: bool,
}

/// Build the items shared by the tab bar and the dropdown.
pub fn nav_items(categories: &[Category], active: Option<usize>) -> Vec<NavItem> {
    categories
        .iter()
        .enumerate()
        .map(|(i, cat)| NavItem {
            id: cat.id.clone(),
            title: one_line(&cat.title),
            active: active == Some(i),
        })
        .collect()
}

// ============================================================================
// Article Cards
// ============================================================================

/// Action attached to a card control.
///
/// Dispatch goes through this enum, never through the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    Bookmark,
    ViewDetails,
}

impl CardAction {
    pub const ALL: [CardAction; 2] = [CardAction::Bookmark, CardAction::ViewDetails];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bookmark => "Bookmark",
            Self::ViewDetails => "View Details",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub time_label: String,
    pub image_url: String,
    pub actions: [CardAction; 2],
}

impl ArticleCard {
    pub fn from_summary(summary: &ArticleSummary, policy: &ImagePolicy, now: DateTime<Utc>) -> Self {
        Self {
            id: summary.id.clone(),
            title: one_line(&summary.title),
            time_label: format_time_label(&summary.time, now),
            image_url: policy.resolve(summary.image.as_ref()),
            actions: CardAction::ALL,
        }
    }
}

/// Content of the article list panel. Each variant fully replaces the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Error,
    Empty,
    Cards(Vec<ArticleCard>),
}

impl ListState {
    /// Map a fetched article sequence to `Empty` or `Cards`.
    pub fn from_articles(
        articles: &[ArticleSummary],
        policy: &ImagePolicy,
        now: DateTime<Utc>,
    ) -> Self {
        if articles.is_empty() {
            return Self::Empty;
        }
        Self::Cards(
            articles
                .iter()
                .map(|a| ArticleCard::from_summary(a, policy, now))
                .collect(),
        )
    }

    /// The banner text for non-card states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Error => Some(ERROR_MESSAGE),
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Cards(_) => None,
        }
    }

    pub fn cards(&self) -> &[ArticleCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }
}

// ============================================================================
// Detail Modal
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    /// First image only; the rest of the sequence is not shown.
    pub image_url: Option<String>,
    /// Content paragraphs joined by a single space.
    pub body: String,
}

impl DetailView {
    pub fn from_detail(detail: &ArticleDetail) -> Self {
        Self {
            id: detail.id.clone(),
            title: one_line(&detail.title),
            image_url: detail
                .images
                .first()
                .map(|img| one_line(&img.url))
                .filter(|url| !url.is_empty()),
            body: strip_control_chars(&detail.content.join(" ")).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DetailImage, ImageVariant};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn variants(n: usize) -> Vec<ImageVariant> {
        (0..n)
            .map(|i| ImageVariant {
                url: Some(format!("https://img.example.com/{}.jpg", i)),
            })
            .collect()
    }

    fn summary(id: &str, title: &str) -> ArticleSummary {
        ArticleSummary {
            id: id.to_string(),
            title: title.to_string(),
            time: "1 hour ago".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_image_prefers_configured_variant() {
        let image = ArticleImage {
            url: Some("https://img.example.com/top.jpg".into()),
            srcset: variants(7),
        };
        assert_eq!(
            ImagePolicy::default().resolve(Some(&image)),
            "https://img.example.com/5.jpg"
        );
    }

    #[test]
    fn test_image_falls_back_to_top_level_url() {
        let image = ArticleImage {
            url: Some("https://img.example.com/top.jpg".into()),
            srcset: variants(3),
        };
        assert_eq!(
            ImagePolicy::default().resolve(Some(&image)),
            "https://img.example.com/top.jpg"
        );
    }

    #[test]
    fn test_image_falls_back_to_empty() {
        assert_eq!(ImagePolicy::default().resolve(None), "");
        let image = ArticleImage::default();
        assert_eq!(ImagePolicy::default().resolve(Some(&image)), "");
    }

    #[test]
    fn test_image_policy_without_variant() {
        let image = ArticleImage {
            url: Some("https://img.example.com/top.jpg".into()),
            srcset: variants(7),
        };
        let policy = ImagePolicy {
            variant_index: None,
        };
        assert_eq!(policy.resolve(Some(&image)), "https://img.example.com/top.jpg");
    }

    #[test]
    fn test_image_variant_with_null_url_falls_through() {
        let mut srcset = variants(7);
        srcset[5].url = None;
        let image = ArticleImage {
            url: Some("https://img.example.com/top.jpg".into()),
            srcset,
        };
        assert_eq!(
            ImagePolicy::default().resolve(Some(&image)),
            "https://img.example.com/top.jpg"
        );
    }

    #[test]
    fn test_time_label_relative() {
        assert_eq!(format_time_label("2026-03-10T11:30:00Z", now()), "30m");
        assert_eq!(format_time_label("2026-03-10T09:00:00Z", now()), "3h");
        assert_eq!(format_time_label("2026-03-08T12:00:00Z", now()), "2d");
        assert_eq!(format_time_label("2026-02-01T12:00:00Z", now()), "Feb 01");
    }

    #[test]
    fn test_time_label_future_is_now() {
        assert_eq!(format_time_label("2026-03-11T00:00:00+00:00", now()), "now");
    }

    #[test]
    fn test_time_label_rfc2822() {
        assert_eq!(
            format_time_label("Tue, 10 Mar 2026 10:00:00 +0000", now()),
            "2h"
        );
    }

    #[test]
    fn test_time_label_passthrough() {
        assert_eq!(format_time_label("2 hours ago", now()), "2 hours ago");
        assert_eq!(format_time_label("", now()), "");
    }

    #[test]
    fn test_empty_articles_give_empty_state() {
        let state = ListState::from_articles(&[], &ImagePolicy::default(), now());
        assert_eq!(state, ListState::Empty);
        assert_eq!(state.message(), Some("No news found for this category"));
        assert!(state.cards().is_empty());
    }

    #[test]
    fn test_cards_keep_order_and_actions() {
        let articles = vec![summary("1", "First"), summary("2", "Second")];
        let state = ListState::from_articles(&articles, &ImagePolicy::default(), now());
        let ids: Vec<&str> = state.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(state.message(), None);
        assert_eq!(
            state.cards()[0].actions,
            [CardAction::Bookmark, CardAction::ViewDetails]
        );
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ListState::Loading.message(), Some("Loading..."));
        assert_eq!(ListState::Error.message(), Some("Something went wrong"));
    }

    #[test]
    fn test_card_title_sanitised() {
        let card = ArticleCard::from_summary(
            &summary("1", "\x1b[31mRed\x1b[0m\nalert"),
            &ImagePolicy::default(),
            now(),
        );
        assert_eq!(card.title, "Red alert");
    }

    #[test]
    fn test_nav_items_mark_active() {
        let cats = vec![
            Category {
                id: "1".into(),
                title: "Sports".into(),
            },
            Category {
                id: "2".into(),
                title: "Tech".into(),
            },
        ];
        let items = nav_items(&cats, Some(1));
        assert!(!items[0].active);
        assert!(items[1].active);
        assert!(nav_items(&cats, None).iter().all(|i| !i.active));
    }

    #[test]
    fn test_detail_uses_first_image_and_joins_content() {
        let detail = ArticleDetail {
            id: "9".into(),
            title: "Title".into(),
            images: vec![
                DetailImage {
                    url: "https://img.example.com/a.jpg".into(),
                },
                DetailImage {
                    url: "https://img.example.com/b.jpg".into(),
                },
            ],
            content: vec!["First.".into(), "Second.".into(), "Third.".into()],
        };
        let view = DetailView::from_detail(&detail);
        assert_eq!(view.image_url.as_deref(), Some("https://img.example.com/a.jpg"));
        assert_eq!(view.body, "First. Second. Third.");
    }

    #[test]
    fn test_detail_without_images() {
        let detail = ArticleDetail {
            id: "9".into(),
            title: "Title".into(),
            images: vec![],
            content: vec![],
        };
        let view = DetailView::from_detail(&detail);
        assert!(view.image_url.is_none());
        assert_eq!(view.body, "");
    }
}
