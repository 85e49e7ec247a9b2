use crate::api::{ApiError, ArticleDetail, ArticleSummary, Category, NewsClient};
use crate::bookmarks::{Bookmark, BookmarkStore};
use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use crate::view::{nav_items, ArticleCard, DetailView, ImagePolicy, ListState, NavItem};
use chrono::Utc;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// Maximum scroll offset for the detail modal (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 3;

pub const TASK_CATEGORIES: &str = "categories";
pub const TASK_ARTICLES: &str = "articles";
pub const TASK_DETAIL: &str = "detail";

// ============================================================================
// Focus
// ============================================================================

/// Which panel has focus in the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Category tab bar.
    Nav,
    /// Article card list.
    Articles,
    /// Bookmarks panel.
    Bookmarks,
}

// ============================================================================
// Requests and Events
// ============================================================================

/// A category fetch the UI layer should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRequest {
    pub generation: u64,
}

/// An article-list fetch the UI layer should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRequest {
    pub category_id: String,
    pub generation: u64,
}

/// A detail fetch the UI layer should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub article_id: String,
    pub generation: u64,
}

/// Events from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<Category>, ApiError>,
    },
    /// Fields:
    /// - `category_id`: the category the articles were requested for
    /// - `generation`: the article generation when the load was spawned
    /// - `result`: the article summaries or the fetch error
    ArticlesLoaded {
        category_id: String,
        generation: u64,
        result: Result<Vec<ArticleSummary>, ApiError>,
    },
    DetailLoaded {
        article_id: String,
        generation: u64,
        result: Result<ArticleDetail, ApiError>,
    },
    /// A background task panicked.
    ///
    /// `task` is one of the `TASK_*` names.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// State transitions never touch the network. Operations that need a fetch
/// return a request descriptor carrying the generation it was issued under;
/// `ui::helpers` spawns the task and the result comes back as an `AppEvent`.
pub struct App {
    pub client: NewsClient,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // Category navigation
    pub categories: Vec<Category>,
    /// Index of the category marked active in the tab bar.
    pub active_category: Option<usize>,
    /// Tab-bar cursor, moved with h/l and confirmed with Enter.
    pub nav_cursor: usize,
    /// Cursor of the open category dropdown, `None` when closed.
    pub dropdown_cursor: Option<usize>,

    // Article list
    pub list_state: ListState,
    /// Category whose articles the list shows (or is loading).
    pub list_category: Option<Category>,
    pub selected_card: usize,
    pub image_policy: ImagePolicy,

    // Bookmarks
    pub bookmarks: BookmarkStore,
    pub selected_bookmark: usize,
    /// Bookmarks panel visibility in the compact layout.
    pub show_bookmarks: bool,

    // Detail modal
    pub detail: Option<DetailView>,
    pub detail_scroll: usize,
    /// Visible lines inside the modal, updated on render.
    pub detail_visible_lines: usize,
    /// Wrapped content height of the modal, updated on render.
    pub detail_content_lines: usize,

    // Layout
    pub focus: Focus,
    pub compact_width: u16,
    /// Whether the last frame used the compact layout.
    pub compact: bool,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Generation counters for stale-response detection.
    ///
    /// Each counter is bumped when a request of its kind is issued. A response
    /// whose generation no longer matches is dropped, so a slow reply for a
    /// category the user already left cannot overwrite the current list.
    pub category_generation: u64,
    pub article_generation: u64,
    pub detail_generation: u64,

    pub category_handle: Option<tokio::task::JoinHandle<()>>,
    pub article_handle: Option<tokio::task::JoinHandle<()>>,
    pub detail_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(client: NewsClient, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        let bookmarks = BookmarkStore::with_listener(|entries| {
            tracing::debug!(count = entries.len(), "Bookmarks panel updated");
        });

        Self {
            client,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            categories: Vec::new(),
            active_category: None,
            nav_cursor: 0,
            dropdown_cursor: None,
            list_state: ListState::Loading,
            list_category: None,
            selected_card: 0,
            image_policy: config.image_policy(),
            bookmarks,
            selected_bookmark: 0,
            show_bookmarks: false,
            detail: None,
            detail_scroll: 0,
            detail_visible_lines: 0,
            detail_content_lines: 0,
            focus: Focus::Articles,
            compact_width: config.compact_width,
            compact: false,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            category_generation: 0,
            article_generation: 0,
            detail_generation: 0,
            category_handle: None,
            article_handle: None,
            detail_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and return its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    /// Issue a category fetch. Any category response from an older request
    /// will be ignored.
    pub fn request_categories(&mut self) -> CategoryRequest {
        self.category_generation = self.category_generation.wrapping_add(1);
        tracing::debug!(generation = self.category_generation, "Requesting categories");
        CategoryRequest {
            generation: self.category_generation,
        }
    }

    /// Handle a category response.
    ///
    /// Stale responses are dropped. A failed fetch is logged and leaves both
    /// category surfaces as they were.
    pub fn on_categories_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Category>, ApiError>,
    ) -> Option<ArticleRequest> {
        if generation != self.category_generation {
            tracing::debug!(
                generation,
                current = self.category_generation,
                "Discarding stale category response"
            );
            return None;
        }

        match result {
            Ok(categories) => self.apply_categories(categories),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories");
                None
            }
        }
    }

    /// Replace the category set and auto-select the first category.
    ///
    /// Both surfaces are rebuilt from scratch: the active marker is cleared and
    /// the tab and dropdown cursors reset. With at least one category the first
    /// is marked active and exactly one article load is returned for it. The
    /// list is not switched to `Loading` here.
    pub fn apply_categories(&mut self, categories: Vec<Category>) -> Option<ArticleRequest> {
        tracing::info!(count = categories.len(), "Categories loaded");

        self.categories = categories;
        self.active_category = None;
        self.nav_cursor = 0;
        if self.dropdown_cursor.is_some() {
            self.dropdown_cursor = Some(0);
        }

        if self.categories.is_empty() {
            return None;
        }

        self.active_category = Some(0);
        self.article_request(0)
    }

    /// Items for the tab bar and dropdown.
    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items(&self.categories, self.active_category)
    }

    /// Activate a tab-bar entry.
    ///
    /// The active marker is cleared first. Only an index naming an existing
    /// category marks it active, shows `Loading` and issues a load.
    pub fn select_nav(&mut self, index: usize) -> Option<ArticleRequest> {
        self.active_category = None;

        if index >= self.categories.len() {
            tracing::debug!(index, "Tab selection outside category list");
            return None;
        }

        self.active_category = Some(index);
        self.nav_cursor = index;
        self.list_state = ListState::Loading;
        self.article_request(index)
    }

    /// Activate a dropdown entry.
    ///
    /// Shows `Loading` and issues a load. The tab-bar active marker is left
    /// where it was.
    pub fn select_dropdown(&mut self, index: usize) -> Option<ArticleRequest> {
        if index >= self.categories.len() {
            return None;
        }

        self.dropdown_cursor = None;
        self.list_state = ListState::Loading;
        self.article_request(index)
    }

    pub fn open_dropdown(&mut self) {
        if self.categories.is_empty() {
            self.set_status("No categories loaded");
            return;
        }
        let start = self
            .active_category
            .unwrap_or(0)
            .min(self.categories.len().saturating_sub(1));
        self.dropdown_cursor = Some(start);
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_cursor = None;
    }

    pub fn dropdown_up(&mut self) {
        if let Some(cursor) = self.dropdown_cursor.as_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn dropdown_down(&mut self) {
        let max_index = self.categories.len().saturating_sub(1);
        if let Some(cursor) = self.dropdown_cursor.as_mut() {
            *cursor = cursor.saturating_add(1).min(max_index);
        }
    }

    pub fn nav_cursor_left(&mut self) {
        self.nav_cursor = self.nav_cursor.saturating_sub(1);
    }

    pub fn nav_cursor_right(&mut self) {
        if !self.categories.is_empty() {
            let max_index = self.categories.len().saturating_sub(1);
            self.nav_cursor = self.nav_cursor.saturating_add(1).min(max_index);
        }
    }

    fn article_request(&mut self, index: usize) -> Option<ArticleRequest> {
        let category = self.categories.get(index)?.clone();
        self.article_generation = self.article_generation.wrapping_add(1);
        self.selected_card = 0;

        tracing::debug!(
            category_id = %category.id,
            generation = self.article_generation,
            "Requesting articles"
        );

        let request = ArticleRequest {
            category_id: category.id.clone(),
            generation: self.article_generation,
        };
        self.list_category = Some(category);
        Some(request)
    }

    // ------------------------------------------------------------------------
    // Article list
    // ------------------------------------------------------------------------

    /// Apply an article-list response. Returns `false` if it was stale.
    pub fn apply_articles(
        &mut self,
        category_id: &str,
        generation: u64,
        result: Result<Vec<ArticleSummary>, ApiError>,
    ) -> bool {
        if generation != self.article_generation {
            tracing::debug!(
                category_id,
                generation,
                current = self.article_generation,
                "Discarding stale article response"
            );
            return false;
        }

        self.list_state = match result {
            Ok(articles) => {
                tracing::info!(category_id, count = articles.len(), "Articles loaded");
                ListState::from_articles(&articles, &self.image_policy, Utc::now())
            }
            Err(e) => {
                tracing::warn!(category_id, error = %e, "Failed to load articles");
                ListState::Error
            }
        };
        self.selected_card = 0;
        true
    }

    pub fn selected_card(&self) -> Option<&ArticleCard> {
        self.list_state.cards().get(self.selected_card)
    }

    /// Move the selection up in the focused list.
    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Nav => self.nav_cursor_left(),
            Focus::Articles => self.selected_card = self.selected_card.saturating_sub(1),
            Focus::Bookmarks => {
                self.selected_bookmark = self.selected_bookmark.saturating_sub(1);
            }
        }
    }

    /// Move the selection down in the focused list.
    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Nav => self.nav_cursor_right(),
            Focus::Articles => {
                let len = self.list_state.cards().len();
                if len > 0 {
                    self.selected_card = self.selected_card.saturating_add(1).min(len - 1);
                }
            }
            Focus::Bookmarks => {
                let len = self.bookmarks.len();
                if len > 0 {
                    self.selected_bookmark = self.selected_bookmark.saturating_add(1).min(len - 1);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Bookmarks
    // ------------------------------------------------------------------------

    /// Bookmark the selected card. Returns `true` if the store grew.
    pub fn bookmark_selected(&mut self) -> bool {
        let Some(card) = self.selected_card() else {
            return false;
        };
        let bookmark = Bookmark::new(card.id.clone(), card.title.clone());

        let added = self.bookmarks.add(bookmark);
        if added {
            self.set_status(format!("Bookmarked ({})", self.bookmarks.len()));
        } else {
            self.set_status("Already bookmarked");
        }
        added
    }

    /// Delete the bookmark under the panel cursor.
    pub fn delete_selected_bookmark(&mut self) -> bool {
        let Some(id) = self.bookmarks.get(self.selected_bookmark).map(|b| b.id.clone()) else {
            return false;
        };

        let removed = self.bookmarks.remove(&id);
        self.selected_bookmark = self
            .selected_bookmark
            .min(self.bookmarks.len().saturating_sub(1));
        removed
    }

    /// Show or hide the bookmarks panel in the compact layout.
    pub fn toggle_bookmarks(&mut self) {
        self.show_bookmarks = !self.show_bookmarks;
        if self.show_bookmarks {
            self.focus = Focus::Bookmarks;
        } else if self.focus == Focus::Bookmarks {
            self.focus = Focus::Articles;
        }
    }

    // ------------------------------------------------------------------------
    // Detail modal
    // ------------------------------------------------------------------------

    /// Issue a detail fetch for the selected card.
    pub fn request_detail(&mut self) -> Option<DetailRequest> {
        let article_id = self.selected_card()?.id.clone();
        self.detail_generation = self.detail_generation.wrapping_add(1);

        tracing::debug!(
            article_id = %article_id,
            generation = self.detail_generation,
            "Requesting article detail"
        );

        Some(DetailRequest {
            article_id,
            generation: self.detail_generation,
        })
    }

    /// Apply a detail response. Returns `false` if it was stale.
    ///
    /// Success opens the modal. Failure is logged and the modal stays closed.
    pub fn apply_detail(
        &mut self,
        article_id: &str,
        generation: u64,
        result: Result<ArticleDetail, ApiError>,
    ) -> bool {
        if generation != self.detail_generation {
            tracing::debug!(article_id, generation, "Discarding stale detail response");
            return false;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(DetailView::from_detail(&detail));
                self.detail_scroll = 0;
                self.detail_content_lines = 0;
            }
            Err(e) => {
                tracing::warn!(article_id, error = %e, "Failed to load article detail");
            }
        }
        true
    }

    pub fn close_detail(&mut self) {
        if let Some(handle) = self.detail_handle.take() {
            handle.abort();
        }
        self.detail = None;
        self.detail_scroll = 0;
    }

    pub fn detail_scroll_up(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    pub fn detail_scroll_down(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_add(lines);
        self.clamp_detail_scroll();
    }

    /// Keep the modal scroll inside its content, using sizes from the last frame.
    pub fn clamp_detail_scroll(&mut self) {
        let max_scroll = self
            .detail_content_lines
            .saturating_sub(self.detail_visible_lines);
        self.detail_scroll = self.detail_scroll.min(max_scroll).min(MAX_SCROLL);
    }

    // ------------------------------------------------------------------------
    // Layout and chrome
    // ------------------------------------------------------------------------

    /// Whether a terminal `width` columns wide gets the compact layout.
    pub fn is_compact(&self, width: u16) -> bool {
        width < self.compact_width
    }

    pub fn bookmarks_visible(&self) -> bool {
        !self.compact || self.show_bookmarks
    }

    /// Tab → next visible panel. The tab bar is skipped in the compact layout.
    pub fn cycle_focus(&mut self) {
        let order: &[Focus] = match (self.compact, self.bookmarks_visible()) {
            (false, _) => &[Focus::Nav, Focus::Articles, Focus::Bookmarks],
            (true, true) => &[Focus::Articles, Focus::Bookmarks],
            (true, false) => &[Focus::Articles],
        };
        let pos = order.iter().position(|f| *f == self.focus);
        self.focus = match pos {
            Some(i) => order[(i + 1) % order.len()],
            None => order[0],
        };
    }

    /// Re-home focus after the layout changed size class.
    pub fn set_compact(&mut self, compact: bool) {
        if self.compact == compact {
            return;
        }
        self.compact = compact;
        if compact && self.focus == Focus::Nav {
            self.focus = Focus::Articles;
        }
        if !self.bookmarks_visible() && self.focus == Focus::Bookmarks {
            self.focus = Focus::Articles;
        }
    }

    /// Set status message (expires after a few seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort all in-flight fetches when the app goes away.
impl Drop for App {
    fn drop(&mut self) {
        for handle in [
            self.category_handle.take(),
            self.article_handle.take(),
            self.detail_handle.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
    }
}
