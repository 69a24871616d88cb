//! Document structure and block-level behaviors.

use super::{Behavior, Signal, Visit, leave_noop};
use crate::error::RenderError;
use crate::node::NodeKind;
use crate::output::Part;
use crate::state::escape_html;
use crate::translator::Translator;

/// Highest level with a native HTML heading tag.
const MAX_HEADING: u32 = 6;

/// Class marking the container section docutils builds for system messages.
const SYSTEM_MESSAGES_CLASS: &str = "system-messages";

pub(crate) static DOCUMENT: Behavior = Behavior {
    enter: enter_document,
    leave: leave_noop,
};

pub(crate) static SECTION: Behavior = Behavior {
    enter: enter_section,
    leave: leave_section,
};

pub(crate) static TITLE: Behavior = Behavior {
    enter: enter_title,
    leave: leave_title,
};

pub(crate) static SUBTITLE: Behavior = Behavior {
    enter: enter_subtitle,
    leave: leave_subtitle,
};

pub(crate) static PARAGRAPH: Behavior = Behavior {
    enter: enter_paragraph,
    leave: leave_paragraph,
};

pub(crate) static BLOCK_QUOTE: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<blockquote>\n");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</blockquote>\n"),
};

pub(crate) static LITERAL_BLOCK: Behavior = Behavior {
    enter: enter_literal_block,
    leave: leave_pre,
};

pub(crate) static DOCTEST_BLOCK: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<pre class=\"doctest\">\n");
        Signal::Continue
    },
    leave: leave_pre,
};

pub(crate) static MATH_BLOCK: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<pre class=\"math\">\n");
        Signal::Continue
    },
    leave: leave_pre,
};

pub(crate) static TRANSITION: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<hr>");
        Signal::Continue
    },
    leave: leave_noop,
};

pub(crate) static COMMENT: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<!-- ");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str(" -->\n"),
};

pub(crate) static RAW: Behavior = Behavior {
    enter: enter_raw,
    leave: leave_noop,
};

pub(crate) static SYSTEM_MESSAGE: Behavior = Behavior {
    enter: enter_system_message,
    leave: |tr, _| tr.out.push_str("</fieldset>\n\n"),
};

pub(crate) static SUBSTITUTION_REFERENCE: Behavior = Behavior {
    enter: enter_substitution_reference,
    leave: leave_noop,
};

/// Figures, captions, legends, topics, sidebars and line blocks.
pub(crate) static DIV: Behavior = Behavior {
    enter: |tr, visit| {
        tr.out
            .push_fmt(format_args!("<div class=\"{}\">", visit.node.kind.tag_name()));
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</div>\n"),
};

pub(crate) static ADMONITION: Behavior = Behavior {
    enter: enter_admonition,
    leave: |tr, _| tr.out.push_str("</fieldset>\n\n"),
};

fn enter_document(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let title = match visit.node.get("title") {
        Some(title) => escape_html(title),
        None => visit
            .node
            .child(NodeKind::Title)
            .map(|t| escape_html(&t.astext()))
            .unwrap_or_default(),
    };
    tr.out
        .push_to(Part::Head, &format!("<title>{title}</title>\n"));
    if !title.is_empty() {
        tr.title = Some(title);
    }
    Signal::Continue
}

fn enter_section(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    if node.has_class(SYSTEM_MESSAGES_CLASS) {
        if tr.settings.no_system_messages {
            tracing::trace!("Skipping system messages section");
            return Signal::SkipChildren;
        }
        return Signal::Continue;
    }

    tr.section_level += 1;
    let id = node.first_id().unwrap_or_default();
    let name = node
        .first_name()
        .or_else(|| node.attrs.dupnames.first().map(String::as_str))
        .unwrap_or_default();

    if !id.is_empty() {
        tr.out.push_fmt(format_args!("\n<a name=\"{id}\"></a>"));
    }
    tr.open_section(name, id);
    Signal::Continue
}

fn leave_section(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    if !visit.node.has_class(SYSTEM_MESSAGES_CLASS) {
        tr.section_level -= 1;
    }
}

/// Whether a title belongs to a numbered section.
fn is_section_title(visit: &Visit<'_, '_>) -> bool {
    visit
        .parent()
        .is_some_and(|p| p.kind == NodeKind::Section && !p.has_class(SYSTEM_MESSAGES_CLASS))
}

fn enter_title(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    if is_section_title(visit) {
        tr.sections
            .update_last_title(escape_html(&visit.node.astext()));
        let level = tr.section_level;
        if level <= MAX_HEADING {
            tr.out.push_fmt(format_args!("<h{level}>"));
        } else {
            tr.out
                .push_fmt(format_args!("<div class=\"h{level}\"><h{MAX_HEADING}>"));
        }
    } else if visit.parent_is(NodeKind::Document) {
        tr.title = Some(escape_html(&visit.node.astext()));
        tr.out.divert(Part::HtmlTitle);
        tr.out.push_str("<h1 class=\"title\">");
    } else {
        tr.out.push_str("<div class=\"title\">");
    }
    Signal::Continue
}

fn leave_title(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    if is_section_title(visit) {
        let level = tr.section_level;
        if level != 1 {
            push_section_links(tr);
        }
        if level <= MAX_HEADING {
            tr.out.push_fmt(format_args!("</h{level}>\n"));
        } else {
            tr.out.push_fmt(format_args!("</h{MAX_HEADING}></div>\n"));
        }
    } else if visit.parent_is(NodeKind::Document) {
        tr.out.push_str("</h1>\n");
        tr.out.end_diversion();
    } else {
        tr.out.push_str("</div>\n");
    }
}

/// Append the "link | top" navigation span after a section title.
fn push_section_links(tr: &mut Translator<'_>) {
    let settings = tr.settings;
    if !settings.has_navigation_labels() {
        return;
    }
    let id = tr.sections.last().map(|s| s.id.clone()).unwrap_or_default();

    tr.out.push_str("<span class=\"links\">");
    if let Some(link) = &settings.link {
        tr.out.push_fmt(format_args!("<a href=\"#{id}\">{link}</a>"));
    }
    if settings.link.is_some() && settings.top.is_some() {
        tr.out.push_str(" | ");
    }
    if let Some(top) = &settings.top {
        tr.out.push_fmt(format_args!("<a href=\"#\">{top}</a>"));
    }
    tr.out.push_str("</span>");
}

fn enter_subtitle(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    if visit.parent_is(NodeKind::Document) {
        tr.out.push_str("<h2>");
    } else {
        tr.out.push_str("<p class=\"subtitle\">");
    }
    Signal::Continue
}

fn leave_subtitle(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    if visit.parent_is(NodeKind::Document) {
        tr.out.push_str("</h2>\n");
    } else {
        tr.out.push_str("</p>\n");
    }
}

fn enter_paragraph(tr: &mut Translator<'_>, _: &Visit<'_, '_>) -> Signal {
    tr.out.push_str("<p>");
    Signal::Continue
}

fn leave_paragraph(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    tr.out.push_str("</p>");
    match visit.parent_kind() {
        Some(NodeKind::FieldBody | NodeKind::Entry) => tr.out.push_str("\n"),
        Some(kind) if kind.is_admonition() => tr.out.push_str("\n"),
        Some(
            NodeKind::ListItem | NodeKind::Definition | NodeKind::Footnote | NodeKind::Citation,
        ) => {}
        _ => tr.out.push_str("\n\n"),
    }
}

fn enter_literal_block(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    tr.out.push_str("<pre");
    if !node.attrs.classes.is_empty() {
        tr.out
            .push_fmt(format_args!(" class=\"{}\"", node.attrs.classes.join(" ")));
    }
    if let Some(id) = node.first_id() {
        tr.out.push_fmt(format_args!(" id=\"{id}\""));
    }
    tr.out.push_str(">\n");
    Signal::Continue
}

fn leave_pre(tr: &mut Translator<'_>, _: &Visit<'_, '_>) {
    tr.out.push_str("\n</pre>\n");
}

/// Pass raw content through when it is meant for HTML; drop it otherwise.
fn enter_raw(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    let format = node.get("format").unwrap_or_default();
    if format.split_whitespace().any(|f| f == "html") {
        tr.out.push_fmt(format_args!("{}\n", node.astext()));
    } else {
        tracing::debug!(format, "Dropping raw content of foreign format");
    }
    Signal::SkipChildren
}

fn enter_system_message(tr: &mut Translator<'_>, _: &Visit<'_, '_>) -> Signal {
    if tr.settings.no_system_messages {
        tracing::trace!("Skipping system message");
        return Signal::SkipChildren;
    }
    tr.out
        .push_str("<fieldset>\n<legend>System message</legend>\n");
    Signal::Continue
}

fn enter_substitution_reference(_: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    Signal::Abort(RenderError::UnresolvedSubstitution {
        refname: visit.node.get("refname").unwrap_or_default().to_owned(),
        location: visit.location(),
    })
}

fn enter_admonition(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let name = visit.node.kind.tag_name();
    let mut legend = name.to_owned();
    if let Some(first) = legend.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    tr.out.push_fmt(format_args!(
        "<fieldset class=\"{name}\">\n<legend>{legend}</legend>\n"
    ));
    Signal::Continue
}
