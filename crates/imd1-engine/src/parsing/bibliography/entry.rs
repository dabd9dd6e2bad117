use std::collections::BTreeMap;

use serde::Serialize;

use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::text::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Article,
    Book,
    #[default]
    Other,
}

impl EntryKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "article" => Some(EntryKind::Article),
            "book" => Some(EntryKind::Book),
            "other" | "unknown" => Some(EntryKind::Other),
            _ => None,
        }
    }
}

/// The optional descriptive fields of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub number: Option<String>,
    pub pages: Option<String>,
    pub year: Option<String>,
    pub publisher: Option<String>,
    pub url: Option<String>,
}

impl EntryFields {
    /// Stores `value` under `key`; returns false for an unknown key.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "title" => &mut self.title,
            "author" => &mut self.author,
            "journal" => &mut self.journal,
            "volume" => &mut self.volume,
            "number" => &mut self.number,
            "pages" => &mut self.pages,
            "year" => &mut self.year,
            "publisher" => &mut self.publisher,
            "url" => &mut self.url,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BibEntry {
    pub tag: String,
    pub kind: EntryKind,
    pub fields: EntryFields,
    /// Reference index, assigned once every declaration has been read.
    pub index: usize,
    /// Document that holds the listing for this entry.
    pub ref_file: Option<String>,
}

/// Every entry declared in a document, keyed by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bibliography {
    entries: BTreeMap<String, BibEntry>,
}

impl Bibliography {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry unless its tag is taken; the first definition wins.
    pub fn insert(&mut self, entry: BibEntry, report: &mut Report, at: Option<Position>) {
        if self.entries.contains_key(&entry.tag) {
            report.warn(
                DiagnosticKind::DuplicateBibliographyTag { tag: entry.tag },
                at,
            );
            return;
        }
        self.entries.insert(entry.tag.clone(), entry);
    }

    /// Numbers entries 1, 2, 3... in sorted tag order.
    pub fn assign_indices(&mut self) {
        for (index, entry) in self.entries.values_mut().enumerate() {
            entry.index = index + 1;
        }
    }

    pub fn get(&self, tag: &str) -> Option<&BibEntry> {
        self.entries.get(tag)
    }

    /// Entries in sorted tag order.
    pub fn iter(&self) -> impl Iterator<Item = &BibEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
