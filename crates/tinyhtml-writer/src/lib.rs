//! Compact HTML writer for reStructuredText document trees.
//!
//! This crate turns a parsed document tree ([`DocumentNode`]) into a single
//! HTML document while collecting footnotes, citations and hyperlink targets
//! into side tables that are appended after the body.
//!
//! # Architecture
//!
//! - A static behavior table maps every [`NodeKind`] to an enter/leave pair.
//! - The tree is walked iteratively; each behavior writes into the active
//!   output buffer ([`Part`]). Footnotes, citations and the document title
//!   divert the active buffer for the duration of their subtree.
//! - After the walk, the buffers are assembled in a fixed order into a
//!   [`RenderResult`], together with the section index and the collected
//!   hyperlinks.
//!
//! # Example
//!
//! ```
//! use tinyhtml_writer::{DocumentNode, NodeKind, WriterSettings, render};
//!
//! let doc = DocumentNode::new(NodeKind::Document).with_child(
//!     DocumentNode::new(NodeKind::BulletList)
//!         .with_prop("bullet", "+")
//!         .with_child(
//!             DocumentNode::new(NodeKind::ListItem)
//!                 .with_child(DocumentNode::with_text(NodeKind::Paragraph, "one")),
//!         ),
//! );
//! let result = render(&doc, &WriterSettings::default()).unwrap();
//! assert!(result.parts.body.starts_with("<ul type=\"square\">"));
//! ```

mod assemble;
mod error;
mod node;
mod output;
mod settings;
mod state;
mod translator;
mod visit;
mod walker;
mod writer;

pub use assemble::{Parts, RenderResult};
pub use error::RenderError;
pub use node::{Attributes, DocumentNode, NodeKind};
pub use output::{OutputRouter, Part};
pub use settings::{HeaderLevel, InvalidHeaderLevel, WriterSettings};
pub use state::{HyperlinkEntry, ReferenceNames, SectionEntry, SectionIndex, escape_html, escape_uri};
pub use writer::{HtmlWriter, render};
