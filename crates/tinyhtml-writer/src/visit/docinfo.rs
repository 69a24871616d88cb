//! Bibliographic fields and `meta` tags.
//!
//! These nodes are consumed whole: their text is read once on entry and
//! their children are never visited.

use super::{Behavior, Signal, Visit, leave_noop};
use crate::node::DocumentNode;
use crate::output::Part;
use crate::state::escape_html;
use crate::translator::Translator;

pub(crate) static META: Behavior = Behavior {
    enter: enter_meta,
    leave: leave_noop,
};

pub(crate) static AUTHOR: Behavior = Behavior {
    enter: enter_author,
    leave: leave_noop,
};

pub(crate) static AUTHORS: Behavior = Behavior {
    enter: enter_authors,
    leave: leave_noop,
};

pub(crate) static VERSION: Behavior = Behavior {
    enter: |tr, visit| {
        push_field_row(tr, "Version", &escape_html(&visit.node.astext()));
        Signal::SkipChildren
    },
    leave: leave_noop,
};

pub(crate) static STATUS: Behavior = Behavior {
    enter: |tr, visit| {
        push_field_row(tr, "Status", &escape_html(&visit.node.astext()));
        Signal::SkipChildren
    },
    leave: leave_noop,
};

fn push_field_row(tr: &mut Translator<'_>, label: &str, value: &str) {
    tr.out
        .push_fmt(format_args!("<tr><th>{label}:</th><td>{value}</td></tr>\n"));
}

fn enter_meta(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let mut tag = String::from("<meta");
    for (key, value) in &visit.node.attrs.props {
        tag.push_str(&format!(" {key}=\"{}\"", escape_html(value)));
    }
    tag.push_str(">\n");
    tr.out.push_to(Part::Head, &tag);
    Signal::SkipChildren
}

fn enter_author(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let name = escape_html(&visit.node.astext());
    tr.out.push_to(
        Part::Head,
        &format!(
            "<meta name=\"author\" content=\"{}\">\n",
            name.replace('\n', "")
        ),
    );
    push_field_row(tr, "Author", &name);
    Signal::SkipChildren
}

/// Individual author names; a bare text payload counts as one name.
fn author_names(node: &DocumentNode) -> Vec<String> {
    node.children
        .iter()
        .map(|child| escape_html(&child.astext()))
        .filter(|name| !name.is_empty())
        .collect()
}

fn enter_authors(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let names = author_names(visit.node).join(", ");
    tr.out.push_to(
        Part::Head,
        &format!(
            "<meta name=\"authors\" content=\"{}\">\n",
            names.replace('\n', " ")
        ),
    );
    push_field_row(tr, "Authors", &names);
    Signal::SkipChildren
}
