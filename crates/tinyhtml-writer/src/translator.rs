//! Per-render translation state.

use crate::output::{OutputRouter, Part};
use crate::settings::WriterSettings;
use crate::state::{HyperlinkEntry, ReferenceNames, SectionEntry, SectionIndex};

/// Generator name written into the document head.
const GENERATOR: &str = concat!("tinyhtml-writer ", env!("CARGO_PKG_VERSION"));

/// Mutable state threaded through the node behaviors.
///
/// Created fresh for every render and consumed by the assembler.
pub(crate) struct Translator<'s> {
    pub(crate) settings: &'s WriterSettings,
    pub(crate) out: OutputRouter,
    /// Current section level; starts at the initial header level.
    pub(crate) section_level: u32,
    pub(crate) sections: SectionIndex,
    pub(crate) hyperlinks: Vec<HyperlinkEntry>,
    pub(crate) references: ReferenceNames,
    pub(crate) title: Option<String>,
}

impl<'s> Translator<'s> {
    /// Create translation state with the fixed head and body framing in place.
    ///
    /// `stylesheet` is the already prepared stylesheet markup.
    pub(crate) fn new(settings: &'s WriterSettings, stylesheet: &str) -> Self {
        let mut out = OutputRouter::new();
        out.push_to(Part::HeadPrefix, "<!DOCTYPE html>\n");
        out.push_to(
            Part::HeadPrefix,
            &format!("<html lang=\"{}\">\n", settings.language_code),
        );
        out.push_to(Part::HeadPrefix, "<head>\n");
        out.push_to(
            Part::Head,
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n",
        );
        out.push_to(
            Part::Head,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_to(
            Part::Head,
            &format!("<meta name=\"generator\" content=\"{GENERATOR}\">\n"),
        );
        out.push_to(Part::Stylesheet, stylesheet);
        out.push_to(Part::BodyPrefix, "</head>\n<body>\n");
        out.push_to(Part::BodySuffix, "</body>\n</html>\n");

        Self {
            settings,
            out,
            section_level: u32::from(settings.initial_header_level.get()),
            sections: SectionIndex::default(),
            hyperlinks: Vec::new(),
            references: ReferenceNames::default(),
            title: None,
        }
    }

    /// Record a newly opened section at the current level.
    pub(crate) fn open_section(&mut self, name: &str, id: &str) {
        self.sections.push(SectionEntry {
            level: self.section_level,
            title: name.to_owned(),
            id: id.to_owned(),
        });
    }

    /// Record a hyperlink target and add its row to the hyperlinks table.
    ///
    /// Only the first target with a given name is listed.
    pub(crate) fn add_hyperlink(&mut self, name: &str, uri: &str) {
        if self.hyperlinks.iter().any(|h| h.name == name) {
            return;
        }
        let href = crate::state::escape_uri(uri);
        self.out.push_to(
            Part::Hyperlinks,
            &format!("<tr><th>{name}</th><td><a href=\"{href}\">{href}</a></td></tr>\n"),
        );
        self.hyperlinks.push(HyperlinkEntry {
            name: name.to_owned(),
            uri: uri.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HeaderLevel;

    #[test]
    fn test_initial_framing() {
        let settings = WriterSettings::default().with_language_code("cs");
        let tr = Translator::new(&settings, "<link>\n");

        assert_eq!(
            tr.out.get(Part::HeadPrefix),
            "<!DOCTYPE html>\n<html lang=\"cs\">\n<head>\n"
        );
        assert!(tr.out.get(Part::Head).contains("charset=utf-8"));
        assert!(tr.out.get(Part::Head).contains("name=\"viewport\""));
        assert!(tr.out.get(Part::Head).contains("tinyhtml-writer"));
        assert_eq!(tr.out.get(Part::Stylesheet), "<link>\n");
        assert_eq!(tr.out.get(Part::BodyPrefix), "</head>\n<body>\n");
        assert_eq!(tr.out.get(Part::BodySuffix), "</body>\n</html>\n");
        assert_eq!(tr.out.current(), Part::Body);
    }

    #[test]
    fn test_section_level_starts_at_initial_level() {
        let settings = WriterSettings::default()
            .with_initial_header_level(HeaderLevel::try_from(3).unwrap());
        let tr = Translator::new(&settings, "");
        assert_eq!(tr.section_level, 3);
    }

    #[test]
    fn test_hyperlinks_listed_once() {
        let settings = WriterSettings::default();
        let mut tr = Translator::new(&settings, "");
        tr.add_hyperlink("Docs", "https://x.org/?a&b");
        tr.add_hyperlink("Docs", "https://x.org/other");

        assert_eq!(tr.hyperlinks.len(), 1);
        assert_eq!(tr.hyperlinks[0].uri, "https://x.org/?a&b");
        assert_eq!(
            tr.out.get(Part::Hyperlinks),
            "<tr><th>Docs</th><td><a href=\"https://x.org/?a&amp;b\">https://x.org/?a&amp;b</a></td></tr>\n"
        );
    }
}
