//! Tables and the table-shaped constructs (field lists, option lists, docinfo).

use super::{Behavior, Signal, Visit};
use crate::node::NodeKind;
use crate::translator::Translator;

/// Tables, field lists, option lists and docinfo blocks.
///
/// Only real tables go without a class; the others are tagged with their kind.
pub(crate) static TABLE: Behavior = Behavior {
    enter: |tr, visit| {
        match visit.node.kind {
            NodeKind::Table => tr.out.push_str("<table>\n"),
            kind => tr
                .out
                .push_fmt(format_args!("<table class=\"{}\">\n", kind.tag_name())),
        }
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</table>\n"),
};

pub(crate) static THEAD: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<thead>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</thead>\n"),
};

pub(crate) static TBODY: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<tbody>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</tbody>\n"),
};

pub(crate) static ROW: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<tr>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</tr>\n"),
};

pub(crate) static ENTRY: Behavior = Behavior {
    enter: enter_entry,
    leave: leave_entry,
};

/// Header cells are entries of a head row, and field names.
fn is_header_cell(visit: &Visit<'_, '_>) -> bool {
    visit.node.kind == NodeKind::FieldName || visit.grandparent_kind() == Some(NodeKind::Thead)
}

/// Span attribute value: the `more*` count plus the cell itself.
fn span(visit: &Visit<'_, '_>, key: &str) -> Option<u32> {
    let raw = visit.node.get(key)?;
    match raw.trim().parse::<u32>() {
        Ok(extra) => Some(extra.saturating_add(1)),
        Err(_) => {
            tracing::debug!(key, value = raw, "Ignoring non-numeric cell span");
            None
        }
    }
}

fn enter_entry(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let tag = if is_header_cell(visit) { "th" } else { "td" };
    tr.out.push_fmt(format_args!("<{tag}"));
    if let Some(colspan) = span(visit, "morecols") {
        tr.out.push_fmt(format_args!(" colspan=\"{colspan}\""));
    }
    if let Some(rowspan) = span(visit, "morerows") {
        tr.out.push_fmt(format_args!(" rowspan=\"{rowspan}\""));
    }
    tr.out.push_str(">");
    Signal::Continue
}

fn leave_entry(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    if is_header_cell(visit) {
        tr.out.push_str("</th>");
    } else {
        tr.out.push_str("</td>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::node::{DocumentNode, NodeKind};
    use crate::render;
    use crate::settings::WriterSettings;

    fn body(children: Vec<DocumentNode>) -> String {
        let doc = DocumentNode::new(NodeKind::Document).with_children(children);
        render(&doc, &WriterSettings::default()).unwrap().parts.body
    }

    fn entry(text: &str) -> DocumentNode {
        DocumentNode::new(NodeKind::Entry).with_child(DocumentNode::text(text))
    }

    fn row(entries: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::new(NodeKind::Row).with_children(entries)
    }

    #[test]
    fn test_table_with_head() {
        let html = body(vec![
            DocumentNode::new(NodeKind::Table).with_child(
                DocumentNode::new(NodeKind::Tgroup).with_children([
                    DocumentNode::new(NodeKind::Colspec).with_prop("colwidth", "10"),
                    DocumentNode::new(NodeKind::Colspec).with_prop("colwidth", "10"),
                    DocumentNode::new(NodeKind::Thead)
                        .with_child(row(vec![entry("Name"), entry("Value")])),
                    DocumentNode::new(NodeKind::Tbody)
                        .with_child(row(vec![entry("a"), entry("1")])),
                ]),
            ),
        ]);
        assert_eq!(
            html,
            "<table>\n<thead><tr><th>Name</th><th>Value</th></tr>\n</thead>\n<tbody><tr><td>a</td><td>1</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_spans() {
        let html = body(vec![
            DocumentNode::new(NodeKind::Table).with_child(
                DocumentNode::new(NodeKind::Tbody).with_child(row(vec![
                    entry("wide")
                        .with_prop("morecols", "1")
                        .with_prop("morerows", "2"),
                    entry("bad").with_prop("morecols", "many"),
                ])),
            ),
        ]);
        assert_eq!(
            html,
            "<table>\n<tbody><tr><td colspan=\"2\" rowspan=\"3\">wide</td><td>bad</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_field_list() {
        let html = body(vec![
            DocumentNode::new(NodeKind::FieldList).with_child(
                DocumentNode::new(NodeKind::Field).with_children([
                    DocumentNode::with_text(NodeKind::FieldName, "Date"),
                    DocumentNode::new(NodeKind::FieldBody)
                        .with_child(DocumentNode::with_text(NodeKind::Paragraph, "today")),
                ]),
            ),
        ]);
        assert_eq!(
            html,
            "<table class=\"field_list\">\n<tr><th>Date:</th><td><p>today</p>\n</td></tr>\n</table>\n"
        );
    }
}
