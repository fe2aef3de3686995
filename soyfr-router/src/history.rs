//! Session history.
//!
//! The dispatcher never walks history itself. It pushes entries when it is
//! asked to navigate and asks the history to go back; the history reports
//! the resulting location change later through [`History::poll_pop`], the
//! way a browser fires `popstate` after `history.back()`.

use std::collections::VecDeque;

/// Host navigation history.
pub trait History {
    /// The location of the active entry.
    fn location(&self) -> String;

    /// Add a new entry after the active one, discarding forward entries.
    fn push(&mut self, path: &str);

    /// Overwrite the active entry.
    fn replace(&mut self, path: &str);

    /// Request a move to the previous entry. Does not dispatch anything.
    fn back(&mut self);

    /// Take the next location change the history made on its own.
    fn poll_pop(&mut self) -> Option<String>;
}

/// In-memory history: a list of entries with a cursor.
///
/// # Example
/// ```ignore
/// let mut history = MemoryHistory::new("/");
/// history.push("/login");
/// history.back();
/// assert_eq!(history.poll_pop().as_deref(), Some("/"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    pending: VecDeque<String>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
        tracing::trace!(path, depth = self.entries.len(), "history push");
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.cursor] = path.to_string();
        tracing::trace!(path, "history replace");
    }

    fn back(&mut self) {
        if self.cursor == 0 {
            tracing::trace!("history back ignored at first entry");
            return;
        }
        self.cursor -= 1;
        let location = self.location();
        tracing::trace!(path = %location, "history back");
        self.pending.push_back(location);
    }

    fn poll_pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}
