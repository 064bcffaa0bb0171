//! Tag index for a note.
//!
//! Each tag carries a usage counter starting at zero. Entries keep their
//! insertion order, which is the tie-break when ranking by frequency.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub usage: usize,
}

impl TagEntry {
    pub fn new(name: String) -> Self {
        Self { name, usage: 0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagManager {
    entries: Vec<TagEntry>,
}

impl TagManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for an empty name or one that already exists.
    pub fn add_tag(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.entries.push(TagEntry::new(name.to_string()));
        true
    }

    pub fn remove_tag(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get_all_tags(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn usage(&self, name: &str) -> Option<usize> {
        self.position(name).map(|idx| self.entries[idx].usage)
    }

    /// No-op for unknown tags.
    pub fn increment_tag_usage(&mut self, name: &str) {
        if let Some(idx) = self.position(name) {
            self.entries[idx].usage += 1;
        }
    }

    /// Tags ordered by usage, highest first; equal counts keep insertion order.
    /// `None` and `Some(0)` both mean no limit.
    pub fn get_tags_by_frequency(&self, limit: Option<usize>) -> Vec<(String, usize)> {
        let mut ranked: Vec<&TagEntry> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.usage.cmp(&a.usage));
        let limit = match limit {
            None | Some(0) => ranked.len(),
            Some(n) => n,
        };
        ranked
            .into_iter()
            .take(limit)
            .map(|e| (e.name.clone(), e.usage))
            .collect()
    }

    /// Replace every tag with a fresh zero-count entry per distinct non-empty name.
    pub fn reset<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.clear();
        for name in names {
            self.add_tag(name.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}
