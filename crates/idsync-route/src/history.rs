//! Navigation history
//!
//! Browser-style back/forward stack. Navigating while not at the newest
//! entry discards everything after the cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub url: String,
    pub navigated_at: DateTime<Utc>,
}

impl NavigationEntry {
    pub fn new(url: String) -> Self {
        Self {
            url,
            navigated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    /// Never empty
    entries: Vec<NavigationEntry>,
    cursor: usize,
    max_entries: usize,
}

impl NavigationHistory {
    pub fn new(initial_url: String, max_entries: usize) -> Self {
        Self {
            entries: vec![NavigationEntry::new(initial_url)],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new entry after the cursor, dropping forward entries and
    /// the oldest entries beyond the cap.
    pub fn push(&mut self, url: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(NavigationEntry::new(url));

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
    }

    pub fn current(&self) -> &NavigationEntry {
        &self.entries[self.cursor]
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
