//! Keybinding registry: maps keys to actions per context, with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PrevCategory,
    NextCategory,
    CycleFocus,
    Back,
    Select,
    Bookmark,
    ViewDetails,
    DeleteBookmark,
    OpenDropdown,
    RefreshCategories,
    ToggleBookmarks,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    CloseDetail,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::PrevCategory => "Previous category tab",
            Self::NextCategory => "Next category tab",
            Self::CycleFocus => "Cycle panel focus",
            Self::Back => "Go back / dismiss",
            Self::Select => "Select",
            Self::Bookmark => "Bookmark article",
            Self::ViewDetails => "View article details",
            Self::DeleteBookmark => "Delete bookmark",
            Self::OpenDropdown => "Open category list",
            Self::RefreshCategories => "Reload categories",
            Self::ToggleBookmarks => "Show/hide bookmarks",
            Self::ScrollDown => "Scroll down one line",
            Self::ScrollUp => "Scroll up one line",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::CloseDetail => "Close details",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    CategoryNav,
    ArticleList,
    Bookmarks,
    Dropdown,
    Detail,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats: single chars ("q", "/"), named keys ("Enter", "Esc",
/// "Tab", "Up", "Delete", ...), "Ctrl+x" combos and "F1" through "F12".
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeySpec::ctrl(c));
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(KeySpec::char(c))
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings with context-aware lookup.
///
/// The same key can map to different actions in different contexts; a miss in
/// the specific context falls back to `Global`.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    /// Bind `key` in `context`, replacing whatever it was bound to there.
    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        if let Some(previous) = self.lookup.insert((context, key), action) {
            if previous != action {
                tracing::warn!(
                    key = %format_key(&key),
                    ?context,
                    ?previous,
                    ?action,
                    "Keybinding override displaces an existing binding"
                );
            }
            self.bindings
                .retain(|(c, k, _)| !(*c == context && *k == key));
        }
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action as A;
        use Context as C;

        // === Global ===
        self.bind(C::Global, KeySpec::char('q'), A::Quit);
        self.bind(C::Global, KeySpec::char('j'), A::NavDown);
        self.bind(C::Global, KeySpec::plain(KeyCode::Down), A::NavDown);
        self.bind(C::Global, KeySpec::char('k'), A::NavUp);
        self.bind(C::Global, KeySpec::plain(KeyCode::Up), A::NavUp);
        self.bind(C::Global, KeySpec::plain(KeyCode::Tab), A::CycleFocus);
        self.bind(C::Global, KeySpec::plain(KeyCode::Esc), A::Back);
        self.bind(C::Global, KeySpec::plain(KeyCode::Enter), A::Select);
        self.bind(C::Global, KeySpec::char('c'), A::OpenDropdown);
        self.bind(C::Global, KeySpec::char('r'), A::RefreshCategories);
        self.bind(C::Global, KeySpec::char('B'), A::ToggleBookmarks);
        self.bind(C::Global, KeySpec::char('['), A::PrevCategory);
        self.bind(C::Global, KeySpec::char(']'), A::NextCategory);
        self.bind(C::Global, KeySpec::char('T'), A::CycleTheme);
        self.bind(C::Global, KeySpec::char('?'), A::ShowHelp);

        // === Category tab bar ===
        self.bind(C::CategoryNav, KeySpec::char('h'), A::PrevCategory);
        self.bind(C::CategoryNav, KeySpec::plain(KeyCode::Left), A::PrevCategory);
        self.bind(C::CategoryNav, KeySpec::char('l'), A::NextCategory);
        self.bind(C::CategoryNav, KeySpec::plain(KeyCode::Right), A::NextCategory);

        // === Article cards ===
        self.bind(C::ArticleList, KeySpec::char('b'), A::Bookmark);
        self.bind(C::ArticleList, KeySpec::char('v'), A::ViewDetails);
        self.bind(C::ArticleList, KeySpec::plain(KeyCode::Enter), A::ViewDetails);

        // === Bookmarks panel ===
        self.bind(C::Bookmarks, KeySpec::char('d'), A::DeleteBookmark);
        self.bind(C::Bookmarks, KeySpec::plain(KeyCode::Delete), A::DeleteBookmark);

        // === Category dropdown ===
        self.bind(C::Dropdown, KeySpec::plain(KeyCode::Esc), A::Back);
        self.bind(C::Dropdown, KeySpec::char('c'), A::Back);

        // === Detail modal ===
        self.bind(C::Detail, KeySpec::plain(KeyCode::Esc), A::CloseDetail);
        self.bind(C::Detail, KeySpec::char('q'), A::CloseDetail);
        self.bind(C::Detail, KeySpec::char('j'), A::ScrollDown);
        self.bind(C::Detail, KeySpec::plain(KeyCode::Down), A::ScrollDown);
        self.bind(C::Detail, KeySpec::char('k'), A::ScrollUp);
        self.bind(C::Detail, KeySpec::plain(KeyCode::Up), A::ScrollUp);
        self.bind(C::Detail, KeySpec::ctrl('d'), A::PageDown);
        self.bind(C::Detail, KeySpec::ctrl('u'), A::PageUp);
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys are action names ("quit", "bookmark"), values are key strings
    /// ("q", "Ctrl+d", "F5"). The new key replaces the action's old keys in
    /// every context the action was bound in.
    ///
    /// Returns warnings for unknown action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first and then `Global`.
    ///
    /// Modal contexts (`Dropdown`, `Detail`) do not fall back, so global keys
    /// cannot act on the view behind an open overlay.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Shift is already folded into the character ('B', '?')
        let modifiers = match code {
            KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        match context {
            Context::Dropdown => match action_in(&self.lookup, Context::Global, key) {
                Some(a @ (Action::NavDown | Action::NavUp | Action::Select | Action::Quit)) => {
                    Some(a)
                }
                _ => None,
            },
            Context::Detail | Context::Global => None,
            _ => action_in(&self.lookup, Context::Global, key),
        }
    }

    /// Display string of the first key that triggers `action` in `context`,
    /// fallback included.
    pub fn key_for(&self, context: Context, action: Action) -> Option<String> {
        [context, Context::Global]
            .iter()
            .flat_map(|ctx| self.bindings.iter().filter(move |(c, ..)| c == ctx))
            .filter(|(_, key, a)| {
                *a == action && self.action_for_key(key.code, key.modifiers, context) == Some(action)
            })
            .map(|(_, key, _)| format_key(key))
            .next()
    }

    /// (context, key display string, action, description) for the help screen.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

fn action_in(
    lookup: &HashMap<(Context, KeySpec), Action>,
    context: Context,
    key: KeySpec,
) -> Option<Action> {
    lookup.get(&(context, key)).copied()
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name from config.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "prev_category" => Some(Action::PrevCategory),
        "next_category" => Some(Action::NextCategory),
        "cycle_focus" | "tab" => Some(Action::CycleFocus),
        "back" => Some(Action::Back),
        "select" | "enter" => Some(Action::Select),
        "bookmark" => Some(Action::Bookmark),
        "view_details" | "details" => Some(Action::ViewDetails),
        "delete_bookmark" => Some(Action::DeleteBookmark),
        "open_dropdown" | "categories" => Some(Action::OpenDropdown),
        "refresh_categories" | "refresh" => Some(Action::RefreshCategories),
        "toggle_bookmarks" => Some(Action::ToggleBookmarks),
        "scroll_down" => Some(Action::ScrollDown),
        "scroll_up" => Some(Action::ScrollUp),
        "page_down" => Some(Action::PageDown),
        "page_up" => Some(Action::PageUp),
        "close_detail" => Some(Action::CloseDetail),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_article_context_actions() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char('b'), Context::ArticleList),
            Some(Action::Bookmark)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Enter, Context::ArticleList),
            Some(Action::ViewDetails)
        );
        // Falls back to global navigation
        assert_eq!(
            lookup(&reg, KeyCode::Char('j'), Context::ArticleList),
            Some(Action::NavDown)
        );
    }

    #[test]
    fn test_bookmark_key_not_active_elsewhere() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('b'), Context::Bookmarks), None);
        assert_eq!(lookup(&reg, KeyCode::Char('d'), Context::ArticleList), None);
    }

    #[test]
    fn test_nav_context_enter_selects() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Enter, Context::CategoryNav),
            Some(Action::Select)
        );
        assert_eq!(
            lookup(&reg, KeyCode::Right, Context::CategoryNav),
            Some(Action::NextCategory)
        );
    }

    #[test]
    fn test_detail_q_closes_instead_of_quitting() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char('q'), Context::Detail),
            Some(Action::CloseDetail)
        );
        assert_eq!(lookup(&reg, KeyCode::Char('b'), Context::Detail), None);
        assert_eq!(lookup(&reg, KeyCode::Tab, Context::Detail), None);
    }

    #[test]
    fn test_dropdown_limits_global_fallback() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeyCode::Char('j'), Context::Dropdown),
            Some(Action::NavDown)
        );
        assert_eq!(lookup(&reg, KeyCode::Enter, Context::Dropdown), Some(Action::Select));
        assert_eq!(lookup(&reg, KeyCode::Char('c'), Context::Dropdown), Some(Action::Back));
        assert_eq!(lookup(&reg, KeyCode::Tab, Context::Dropdown), None);
        assert_eq!(lookup(&reg, KeyCode::Char('r'), Context::Dropdown), None);
    }

    #[test]
    fn test_ctrl_modifiers() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('d'), KeyModifiers::CONTROL, Context::Detail),
            Some(Action::PageDown)
        );
    }

    #[test]
    fn test_shifted_character_matches_plain_binding() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('B'), KeyModifiers::SHIFT, Context::ArticleList),
            Some(Action::ToggleBookmarks)
        );
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("bookmark".to_string(), "m".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());
        assert_eq!(
            lookup(&reg, KeyCode::Char('m'), Context::ArticleList),
            Some(Action::Bookmark)
        );
        assert_eq!(lookup(&reg, KeyCode::Char('b'), Context::ArticleList), None);
    }

    #[test]
    fn test_apply_overrides_reports_bad_entries() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("teleport".to_string(), "t".to_string());
        overrides.insert("quit".to_string(), "NotAKey".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 2);
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_parse_key_string_formats() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("del"), Some(KeySpec::plain(KeyCode::Delete)));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+x"), Some(KeySpec::ctrl('x')));
        assert_eq!(parse_key_string("x"), Some(KeySpec::char('x')));
        assert_eq!(parse_key_string("xy"), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Delete)), "Delete");
        assert_eq!(format_key(&KeySpec::char(' ')), "Space");
    }

    #[test]
    fn test_all_bindings_cover_card_actions() {
        let reg = KeybindingRegistry::new();
        let all = reg.all_bindings();
        assert!(all.iter().any(|(_, _, a, _)| *a == Action::Bookmark));
        assert!(all.iter().any(|(_, _, a, _)| *a == Action::ViewDetails));
    }

    #[test]
    fn test_override_taking_a_used_key_drops_the_old_listing() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        // 'v' already means "view details" in the article list
        overrides.insert("bookmark".to_string(), "v".to_string());
        reg.apply_overrides(&overrides);

        assert_eq!(
            lookup(&reg, KeyCode::Char('v'), Context::ArticleList),
            Some(Action::Bookmark)
        );
        let listed: Vec<_> = reg
            .all_bindings()
            .into_iter()
            .filter(|(ctx, key, ..)| *ctx == Context::ArticleList && key == "v")
            .map(|(_, _, action, _)| action)
            .collect();
        assert_eq!(listed, vec![Action::Bookmark]);
        // Enter still views details
        assert_eq!(
            reg.key_for(Context::ArticleList, Action::ViewDetails),
            Some("Enter".to_string())
        );
    }

    #[test]
    fn test_key_for_follows_overrides_and_fallback() {
        let mut reg = KeybindingRegistry::new();
        assert_eq!(reg.key_for(Context::ArticleList, Action::Bookmark), Some("b".to_string()));
        assert_eq!(reg.key_for(Context::ArticleList, Action::Quit), Some("q".to_string()));
        assert_eq!(reg.key_for(Context::Detail, Action::Quit), None);

        let mut overrides = HashMap::new();
        overrides.insert("bookmark".to_string(), "m".to_string());
        reg.apply_overrides(&overrides);
        assert_eq!(reg.key_for(Context::ArticleList, Action::Bookmark), Some("m".to_string()));
    }

    #[test]
    fn test_key_for_skips_shadowed_global_keys() {
        let reg = KeybindingRegistry::new();
        // Global Enter is Select, but the article list maps Enter to ViewDetails
        assert_eq!(reg.key_for(Context::ArticleList, Action::Select), None);
        assert_eq!(reg.key_for(Context::CategoryNav, Action::Select), Some("Enter".to_string()));
    }
}
