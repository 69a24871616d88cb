//! Writer settings.

use std::fmt;

/// Heading level of the outermost section, restricted to `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeaderLevel(u8);

impl HeaderLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeaderLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = InvalidHeaderLevel;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidHeaderLevel(level))
        }
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Header level outside `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("initial header level must be between 1 and 6, got {0}")]
pub struct InvalidHeaderLevel(pub u8);

/// Options recognized by the writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterSettings {
    /// Level counter value before the first section is entered.
    pub initial_header_level: HeaderLevel,
    /// Drop system messages and system-message sections from the output.
    pub no_system_messages: bool,
    /// List hyperlink targets in a table after the body.
    pub foot_hyperlinks: bool,
    /// Stylesheet URLs, or file paths when `embed_stylesheet` is set.
    pub stylesheets: Vec<String>,
    /// Inline stylesheet file contents in `<style>` blocks.
    pub embed_stylesheet: bool,
    /// Label of the per-section self link.
    pub link: Option<String>,
    /// Label of the per-section "back to top" link.
    pub top: Option<String>,
    /// Value of the `lang` attribute on `<html>`.
    pub language_code: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            initial_header_level: HeaderLevel::default(),
            no_system_messages: false,
            foot_hyperlinks: false,
            stylesheets: Vec::new(),
            embed_stylesheet: false,
            link: None,
            top: None,
            language_code: "en".to_owned(),
        }
    }
}

impl WriterSettings {
    #[must_use]
    pub fn with_initial_header_level(mut self, level: HeaderLevel) -> Self {
        self.initial_header_level = level;
        self
    }

    #[must_use]
    pub fn with_system_messages(mut self, shown: bool) -> Self {
        self.no_system_messages = !shown;
        self
    }

    #[must_use]
    pub fn with_foot_hyperlinks(mut self, enabled: bool) -> Self {
        self.foot_hyperlinks = enabled;
        self
    }

    /// Reference stylesheets by URL.
    #[must_use]
    pub fn with_stylesheets<I, S>(mut self, stylesheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stylesheets = stylesheets.into_iter().map(Into::into).collect();
        self
    }

    /// Embed stylesheet files instead of linking them.
    ///
    /// The files are read when rendering starts; an unreadable file fails the render.
    #[must_use]
    pub fn with_embedded_stylesheet(mut self, embed: bool) -> Self {
        self.embed_stylesheet = embed;
        self
    }

    #[must_use]
    pub fn with_link_label(mut self, label: impl Into<String>) -> Self {
        self.link = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_top_label(mut self, label: impl Into<String>) -> Self {
        self.top = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }

    /// Whether section titles get trailing navigation links.
    #[must_use]
    pub fn has_navigation_labels(&self) -> bool {
        self.link.is_some() || self.top.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_level_range() {
        assert_eq!(HeaderLevel::try_from(1).map(HeaderLevel::get), Ok(1));
        assert_eq!(HeaderLevel::try_from(6).map(HeaderLevel::get), Ok(6));
        assert_eq!(HeaderLevel::try_from(0), Err(InvalidHeaderLevel(0)));
        assert_eq!(HeaderLevel::try_from(7), Err(InvalidHeaderLevel(7)));
    }

    #[test]
    fn test_defaults() {
        let settings = WriterSettings::default();
        assert_eq!(settings.initial_header_level.get(), 1);
        assert!(!settings.no_system_messages);
        assert!(!settings.foot_hyperlinks);
        assert!(settings.stylesheets.is_empty());
        assert_eq!(settings.language_code, "en");
        assert!(!settings.has_navigation_labels());
    }

    #[test]
    fn test_builder() {
        let settings = WriterSettings::default()
            .with_system_messages(false)
            .with_stylesheets(["a.css", "b.css"])
            .with_top_label("top");
        assert!(settings.no_system_messages);
        assert_eq!(settings.stylesheets, vec!["a.css", "b.css"]);
        assert!(settings.has_navigation_labels());
    }
}
