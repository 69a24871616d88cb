//! Footnotes, citations and references to them.
//!
//! Footnote and citation bodies do not appear where they are defined; each
//! becomes a row of a side table rendered after the body.

use super::{Behavior, Signal, Visit};
use crate::node::NodeKind;
use crate::output::Part;
use crate::translator::Translator;

pub(crate) static FOOTNOTE: Behavior = Behavior {
    enter: |tr, visit| open_note_row(tr, visit, Part::Footnotes),
    leave: close_note_row,
};

pub(crate) static CITATION: Behavior = Behavior {
    enter: |tr, visit| open_note_row(tr, visit, Part::Citations),
    leave: close_note_row,
};

pub(crate) static FOOTNOTE_REFERENCE: Behavior = Behavior {
    enter: |tr, visit| {
        let refid = visit.node.get("refid").unwrap_or_default();
        tr.out.push_fmt(format_args!("<a href=\"#{refid}\">"));
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</a>"),
};

pub(crate) static CITATION_REFERENCE: Behavior = Behavior {
    enter: |tr, visit| {
        let refid = visit.node.get("refid").unwrap_or_default();
        tr.out.push_fmt(format_args!("<a href=\"#{refid}\">["));
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("]</a>"),
};

pub(crate) static LABEL: Behavior = Behavior {
    enter: |tr, visit| {
        if is_note_label(visit) {
            tr.out.push_str("<b>[ ");
        }
        Signal::Continue
    },
    leave: |tr, visit| {
        if is_note_label(visit) {
            tr.out.push_str(" ]</b></td><td>");
        }
    },
};

fn is_note_label(visit: &Visit<'_, '_>) -> bool {
    matches!(
        visit.parent_kind(),
        Some(NodeKind::Footnote | NodeKind::Citation)
    )
}

fn open_note_row(tr: &mut Translator<'_>, visit: &Visit<'_, '_>, table: Part) -> Signal {
    let node = visit.node;
    tr.out.divert(table);
    tr.out.push_str("<tr><td>");
    // Citations are also addressable by name; footnotes only by id.
    let anchor = match table {
        Part::Citations => node.first_id().or_else(|| node.first_name()),
        _ => node.first_id(),
    };
    if let Some(anchor) = anchor {
        tr.out.push_fmt(format_args!("<a name=\"{anchor}\"></a>"));
    }
    Signal::Continue
}

fn close_note_row(tr: &mut Translator<'_>, _: &Visit<'_, '_>) {
    tr.out.push_str("</td></tr>\n");
    tr.out.end_diversion();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::node::{DocumentNode, NodeKind};
    use crate::settings::WriterSettings;
    use crate::{RenderResult, render};

    fn render_doc(children: Vec<DocumentNode>) -> RenderResult {
        let doc = DocumentNode::new(NodeKind::Document).with_children(children);
        render(&doc, &WriterSettings::default()).unwrap()
    }

    fn footnote(id: &str, label: &str, text: &str) -> DocumentNode {
        DocumentNode::new(NodeKind::Footnote)
            .with_id(id)
            .with_child(DocumentNode::with_text(NodeKind::Label, label))
            .with_child(DocumentNode::with_text(NodeKind::Paragraph, text))
    }

    #[test]
    fn test_footnote_moves_to_side_table() {
        let result = render_doc(vec![
            DocumentNode::new(NodeKind::Paragraph).with_children([
                DocumentNode::text("See"),
                DocumentNode::with_text(NodeKind::FootnoteReference, "1")
                    .with_prop("refid", "f1"),
            ]),
            footnote("f1", "1", "Note."),
        ]);

        assert_eq!(
            result.parts.body,
            "<p>See<a href=\"#f1\">1</a></p>\n\n"
        );
        assert_eq!(
            result.parts.html_footnotes,
            "<table class=\"footnotes\">\n<tr><td><a name=\"f1\"></a><b>[ 1 ]</b></td><td><p>Note.</p></td></tr>\n</table>\n"
        );
        assert_eq!(result.parts.html_line, "<hr class=\"under-line\">\n");
    }

    #[test]
    fn test_footnote_without_id_has_no_anchor() {
        let result = render_doc(vec![
            DocumentNode::new(NodeKind::Footnote)
                .with_name("orphan")
                .with_child(DocumentNode::with_text(NodeKind::Paragraph, "x")),
        ]);
        assert_eq!(
            result.parts.html_footnotes,
            "<table class=\"footnotes\">\n<tr><td><p>x</p></td></tr>\n</table>\n"
        );
    }

    #[test]
    fn test_citation_anchor_falls_back_to_name() {
        let result = render_doc(vec![
            DocumentNode::new(NodeKind::Paragraph).with_child(
                DocumentNode::with_text(NodeKind::CitationReference, "CIT2002")
                    .with_prop("refid", "cit2002"),
            ),
            DocumentNode::new(NodeKind::Citation)
                .with_name("cit2002")
                .with_child(DocumentNode::with_text(NodeKind::Label, "CIT2002"))
                .with_child(DocumentNode::with_text(NodeKind::Paragraph, "Book.")),
        ]);

        assert_eq!(
            result.parts.body,
            "<p><a href=\"#cit2002\">[CIT2002]</a></p>\n\n"
        );
        assert_eq!(
            result.parts.html_citations,
            "<table class=\"citations\">\n<tr><td><a name=\"cit2002\"></a><b>[ CIT2002 ]</b></td><td><p>Book.</p></td></tr>\n</table>\n"
        );
        assert!(result.parts.html_footnotes.is_empty());
    }

    #[test]
    fn test_footnotes_keep_document_order() {
        let result = render_doc(vec![
            footnote("a", "1", "First."),
            DocumentNode::with_text(NodeKind::Paragraph, "Between."),
            footnote("b", "2", "Second."),
        ]);
        let table = &result.parts.html_footnotes;
        let first = table.find("First.").unwrap();
        let second = table.find("Second.").unwrap();
        assert!(first < second);
        assert_eq!(result.parts.body, "<p>Between.</p>\n\n");
    }

    #[test]
    fn test_label_outside_notes_is_plain() {
        let result = render_doc(vec![DocumentNode::with_text(NodeKind::Label, "L")]);
        assert_eq!(result.parts.body, "L");
    }
}
