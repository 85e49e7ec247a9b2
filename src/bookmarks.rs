//! In-memory bookmark store.
//!
//! Bookmarks are `{id, title}` pairs kept in insertion order and unique by id.
//! They live only as long as the process. A listener injected at construction
//! is called with the full collection after every `add` or `remove`, which is
//! how the bookmark panel stays in step with the store.

use std::fmt;

/// A user-saved reference to an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
}

impl Bookmark {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

type Listener = Box<dyn FnMut(&[Bookmark]) + Send>;

/// Ordered, id-unique bookmark collection.
#[derive(Default)]
pub struct BookmarkStore {
    entries: Vec<Bookmark>,
    listener: Option<Listener>,
}

impl fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookmarkStore")
            .field("entries", &self.entries)
            .field("listener", &self.listener.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that reports every change to `listener`.
    pub fn with_listener(listener: impl FnMut(&[Bookmark]) + Send + 'static) -> Self {
        Self {
            entries: Vec::new(),
            listener: Some(Box::new(listener)),
        }
    }

    /// Append `bookmark` unless an entry with the same id exists.
    ///
    /// Returns `true` if the collection grew. The listener runs either way.
    pub fn add(&mut self, bookmark: Bookmark) -> bool {
        let added = !self.contains(&bookmark.id);
        if added {
            tracing::debug!(id = %bookmark.id, "Bookmark added");
            self.entries.push(bookmark);
        } else {
            tracing::debug!(id = %bookmark.id, "Bookmark already present");
        }
        self.notify();
        added
    }

    /// Remove the entry with `id`. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|b| b.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!(id, "Bookmark removed");
        }
        self.notify();
        removed
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|b| b.id == id)
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.entries);
        }
    }
}
