//! Final assembly of the output buffers.

use crate::output::{OutputRouter, Part};
use crate::state::{HyperlinkEntry, SectionEntry};
use crate::translator::Translator;

/// Separator inserted between the body and the side tables.
const UNDER_LINE: &str = "<hr class=\"under-line\">\n";

/// Every named output buffer after assembly.
///
/// Side tables are already wrapped in their `<table>` tags, or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parts {
    pub head_prefix: String,
    pub head: String,
    pub stylesheet: String,
    pub body_prefix: String,
    /// Reserved; bibliographic fields render as a table inside the body.
    pub docinfo: String,
    pub html_title: String,
    pub body: String,
    pub html_line: String,
    pub html_footnotes: String,
    pub html_citations: String,
    pub html_hyperlinks: String,
    pub body_suffix: String,
}

impl Parts {
    /// Look up a part by its name (`"body"`, `"html_footnotes"`, ...).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        Part::ALL
            .into_iter()
            .find(|part| part.name() == name)
            .map(|part| self.part(part))
    }

    /// Content of a part.
    #[must_use]
    pub fn part(&self, part: Part) -> &str {
        match part {
            Part::HeadPrefix => &self.head_prefix,
            Part::Head => &self.head,
            Part::Stylesheet => &self.stylesheet,
            Part::BodyPrefix => &self.body_prefix,
            Part::Docinfo => &self.docinfo,
            Part::HtmlTitle => &self.html_title,
            Part::Body => &self.body,
            Part::HtmlLine => &self.html_line,
            Part::Footnotes => &self.html_footnotes,
            Part::Citations => &self.html_citations,
            Part::Hyperlinks => &self.html_hyperlinks,
            Part::BodySuffix => &self.body_suffix,
        }
    }

    /// Document content without the page framing.
    ///
    /// Title, body, separator line and side tables, for embedding the
    /// rendered document into another page.
    #[must_use]
    pub fn body_fragment(&self) -> String {
        [
            Part::HtmlTitle,
            Part::Body,
            Part::HtmlLine,
            Part::Footnotes,
            Part::Citations,
            Part::Hyperlinks,
        ]
        .into_iter()
        .map(|part| self.part(part))
        .collect()
    }

    /// Full document: all parts in assembly order.
    #[must_use]
    pub fn document(&self) -> String {
        Part::ALL.into_iter().map(|part| self.part(part)).collect()
    }

    fn from_router(mut out: OutputRouter) -> Self {
        Self {
            head_prefix: out.take(Part::HeadPrefix),
            head: out.take(Part::Head),
            stylesheet: out.take(Part::Stylesheet),
            body_prefix: out.take(Part::BodyPrefix),
            docinfo: out.take(Part::Docinfo),
            html_title: out.take(Part::HtmlTitle),
            body: out.take(Part::Body),
            html_line: out.take(Part::HtmlLine),
            html_footnotes: out.take(Part::Footnotes),
            html_citations: out.take(Part::Citations),
            html_hyperlinks: out.take(Part::Hyperlinks),
            body_suffix: out.take(Part::BodySuffix),
        }
    }
}

/// Result of rendering a document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderResult {
    /// Complete HTML document.
    pub html: String,
    /// Escaped text of the document title node, falling back to the
    /// document's `title` property.
    pub title: Option<String>,
    /// Sections in the order they were opened.
    pub sections: Vec<SectionEntry>,
    /// Hyperlink targets listed in foot-hyperlink mode, in discovery order.
    pub hyperlinks: Vec<HyperlinkEntry>,
    /// The individual buffers the document was assembled from.
    pub parts: Parts,
}

/// Wrap the side tables and concatenate all buffers.
pub(crate) fn assemble(tr: Translator<'_>) -> RenderResult {
    let Translator {
        mut out,
        sections,
        hyperlinks,
        title,
        ..
    } = tr;

    let mut any_side_table = false;
    for part in Part::ALL.into_iter().filter(|p| p.is_side_table()) {
        if out.is_empty(part) {
            continue;
        }
        any_side_table = true;
        let rows = out.take(part);
        let class = match part {
            Part::Footnotes => "footnotes",
            Part::Citations => "citations",
            _ => "hyperlinks",
        };
        out.push_to(part, &format!("<table class=\"{class}\">\n{rows}</table>\n"));
    }
    if any_side_table {
        out.push_to(Part::HtmlLine, UNDER_LINE);
    }

    let parts = Parts::from_router(out);
    RenderResult {
        html: parts.document(),
        title,
        sections: sections.into_entries(),
        hyperlinks,
        parts,
    }
}
