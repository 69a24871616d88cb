//! Side data collected during traversal.

use std::collections::HashMap;

/// Section index entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionEntry {
    /// Nesting level, counted from the initial header level.
    pub level: u32,
    /// Escaped section title.
    pub title: String,
    /// Anchor id of the section.
    pub id: String,
}

/// Hyperlink target listed in foot-hyperlink mode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperlinkEntry {
    /// Reference name as spelled by the referencing node.
    pub name: String,
    /// Target URI.
    pub uri: String,
}

/// Section index built as sections are opened.
///
/// A section is recorded when it is entered, before its title has been
/// visited, so the entry starts out with the section name as a placeholder.
/// [`update_last_title`](Self::update_last_title) back-patches it once the
/// title text is known. That is the only mutation of an existing entry.
#[derive(Debug, Default)]
pub struct SectionIndex {
    entries: Vec<SectionEntry>,
}

impl SectionIndex {
    pub fn push(&mut self, entry: SectionEntry) {
        self.entries.push(entry);
    }

    /// Replace the title of the most recently opened section.
    pub fn update_last_title(&mut self, title: String) {
        if let Some(last) = self.entries.last_mut() {
            last.title = title;
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&SectionEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<SectionEntry> {
        self.entries
    }
}

/// Names of external references seen so far.
///
/// Keyed case-insensitively, keeping the spelling of the reference.
#[derive(Debug, Default)]
pub struct ReferenceNames {
    names: HashMap<String, String>,
}

impl ReferenceNames {
    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_lowercase(), name.to_owned());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '>' => result.push_str("&gt;"),
            '<' => result.push_str("&lt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Prepare a URI for an `href` or `src` attribute.
///
/// Only `&` is escaped; URIs are otherwise passed through.
#[must_use]
pub fn escape_uri(uri: &str) -> String {
    uri.replace('&', "&amp;")
}
