//! Bullet, enumerated, definition and option lists.

use super::{Behavior, Signal, Visit, leave_noop};
use crate::translator::Translator;

pub(crate) static BULLET_LIST: Behavior = Behavior {
    enter: enter_bullet_list,
    leave: |tr, _| tr.out.push_str("</ul>\n\n"),
};

pub(crate) static ENUMERATED_LIST: Behavior = Behavior {
    enter: enter_enumerated_list,
    leave: |tr, _| tr.out.push_str("</ol>\n\n"),
};

pub(crate) static LIST_ITEM: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<li>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</li>\n"),
};

pub(crate) static DEFINITION_LIST: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<dl>\n");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</dl>\n"),
};

/// Opens `<dt>`; the following definition closes it.
pub(crate) static TERM: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<dt>");
        Signal::Continue
    },
    leave: leave_noop,
};

pub(crate) static CLASSIFIER: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str(": <tt>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</tt>"),
};

pub(crate) static DEFINITION: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("</dt>\n<dd>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</dd>\n"),
};

pub(crate) static OPTION: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<code>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</code>"),
};

pub(crate) static OPTION_STRING: Behavior = Behavior {
    enter: |_, _| Signal::Continue,
    leave: |tr, _| tr.out.push_str(" "),
};

pub(crate) static OPTION_ARGUMENT: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<i>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</i>"),
};

/// HTML `type` of a bullet list; unknown bullets render like `*`.
fn bullet_type(bullet: Option<&str>) -> &'static str {
    match bullet {
        Some("-") => "disc",
        Some("+") => "square",
        _ => "circle",
    }
}

/// HTML `type` of an enumerated list; unknown styles render as arabic.
fn enumeration_type(enumtype: Option<&str>) -> &'static str {
    match enumtype {
        Some("loweralpha") => "a",
        Some("upperalpha") => "A",
        Some("lowerroman") => "i",
        Some("upperroman") => "I",
        _ => "1",
    }
}

fn enter_bullet_list(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let kind = bullet_type(visit.node.get("bullet"));
    tr.out.push_fmt(format_args!("<ul type=\"{kind}\">\n"));
    Signal::Continue
}

fn enter_enumerated_list(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let enumtype = visit.node.get("enumtype");
    let kind = enumeration_type(enumtype);
    if kind == "1" && enumtype.is_some_and(|t| t != "arabic") {
        tracing::debug!(enumtype, "Unknown enumeration type, using arabic numerals");
    }
    tr.out.push_fmt(format_args!("<ol type=\"{kind}\">\n"));
    Signal::Continue
}
