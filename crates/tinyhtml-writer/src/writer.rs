//! Public rendering entry point.

use std::path::Path;

use crate::assemble::{RenderResult, assemble};
use crate::error::RenderError;
use crate::node::DocumentNode;
use crate::settings::WriterSettings;
use crate::state::escape_uri;
use crate::translator::Translator;
use crate::walker::walk;

/// HTML writer for document trees.
///
/// Holds the settings only; every [`render`](Self::render) call starts from
/// fresh state, so one writer can render any number of documents.
///
/// # Example
///
/// ```
/// use tinyhtml_writer::{DocumentNode, HtmlWriter, NodeKind, WriterSettings};
///
/// let doc = DocumentNode::new(NodeKind::Document)
///     .with_child(DocumentNode::with_text(NodeKind::Paragraph, "Hello"));
/// let result = HtmlWriter::new(WriterSettings::default()).render(&doc).unwrap();
/// assert!(result.html.contains("<p>Hello</p>"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct HtmlWriter {
    settings: WriterSettings,
}

impl HtmlWriter {
    #[must_use]
    pub fn new(settings: WriterSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// Render a document tree to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Stylesheet`] if an embedded stylesheet cannot be
    /// read (checked before the tree is visited), and
    /// [`RenderError::UnresolvedSubstitution`] if the tree still contains a
    /// substitution reference. No partial output is returned on error.
    pub fn render(&self, document: &DocumentNode) -> Result<RenderResult, RenderError> {
        let stylesheet = stylesheet_markup(&self.settings)?;
        let mut tr = Translator::new(&self.settings, &stylesheet);
        walk(&mut tr, document)?;
        let result = assemble(tr);

        tracing::debug!(
            sections = result.sections.len(),
            hyperlinks = result.hyperlinks.len(),
            bytes = result.html.len(),
            "Rendered document"
        );
        Ok(result)
    }
}

/// Render a document tree with the given settings.
///
/// Shorthand for `HtmlWriter::new(settings.clone()).render(document)`.
///
/// # Errors
///
/// See [`HtmlWriter::render`].
pub fn render(
    document: &DocumentNode,
    settings: &WriterSettings,
) -> Result<RenderResult, RenderError> {
    HtmlWriter::new(settings.clone()).render(document)
}

/// Build the stylesheet part: one `<link>` per entry, or the file contents
/// in `<style>` blocks when embedding.
fn stylesheet_markup(settings: &WriterSettings) -> Result<String, RenderError> {
    let mut markup = String::new();
    for entry in &settings.stylesheets {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if settings.embed_stylesheet {
            let path = Path::new(entry);
            tracing::debug!(path = %path.display(), "Embedding stylesheet");
            let content =
                std::fs::read_to_string(path).map_err(|source| RenderError::Stylesheet {
                    path: path.to_path_buf(),
                    source,
                })?;
            markup.push_str(&format!("<style type=\"text/css\">\n{content}</style>\n"));
        } else {
            markup.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\" />\n",
                escape_uri(entry)
            ));
        }
    }
    Ok(markup)
}
