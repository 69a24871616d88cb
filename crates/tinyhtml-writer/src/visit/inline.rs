//! Inline behaviors.

use super::{Behavior, Signal, Visit, leave_noop};
use crate::node::NodeKind;
use crate::state::{escape_html, escape_uri};
use crate::translator::Translator;

pub(crate) static TEXT: Behavior = Behavior {
    enter: enter_text,
    leave: leave_noop,
};

pub(crate) static EMPHASIS: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<em>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</em>"),
};

pub(crate) static STRONG: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<b>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</b>"),
};

pub(crate) static LITERAL: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<code>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</code>"),
};

pub(crate) static TITLE_REFERENCE: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<cite>");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</cite> "),
};

pub(crate) static PROBLEMATIC: Behavior = Behavior {
    enter: |tr, _| {
        tr.out.push_str("<span class=\"problematic\">");
        Signal::Continue
    },
    leave: |tr, _| tr.out.push_str("</span>"),
};

pub(crate) static INLINE: Behavior = Behavior {
    enter: enter_inline,
    leave: leave_inline,
};

pub(crate) static REFERENCE: Behavior = Behavior {
    enter: enter_reference,
    leave: |tr, _| tr.out.push_str("</a>"),
};

pub(crate) static TARGET: Behavior = Behavior {
    enter: enter_target,
    leave: leave_noop,
};

pub(crate) static IMAGE: Behavior = Behavior {
    enter: enter_image,
    leave: leave_noop,
};

/// Markup for a highlighted token inside a literal block.
///
/// Code highlighting marks tokens with classes; inside `<pre>` they become
/// plain presentational tags instead of styled spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CodeStyle {
    Keyword,
    Name,
    Escape,
    String,
    Comment,
    Decorator,
    Number,
    OperatorWord,
    Builtin,
}

impl CodeStyle {
    /// Pick the style for a token's classes.
    ///
    /// Tokens can carry several classes; the checks run in a fixed order and
    /// the first match wins.
    pub(crate) fn classify(classes: &[String]) -> Option<Self> {
        let has = |class: &str| classes.iter().any(|c| c == class);

        if has("keyword") {
            Some(Self::Keyword)
        } else if has("function") || has("class") {
            Some(Self::Name)
        } else if has("escape") {
            Some(Self::Escape)
        } else if has("string") {
            Some(Self::String)
        } else if has("comment") {
            Some(Self::Comment)
        } else if has("decorator") {
            Some(Self::Decorator)
        } else if has("number") {
            Some(Self::Number)
        } else if has("operator") && has("word") {
            Some(Self::OperatorWord)
        } else if has("builtin") || has("exception") {
            Some(Self::Builtin)
        } else {
            None
        }
    }

    pub(crate) fn open(self) -> &'static str {
        match self {
            Self::Keyword => "<b>",
            Self::Name => "<em>",
            Self::Escape => "<i><b>",
            Self::String | Self::Comment => "<i>",
            Self::Decorator => "<var>",
            Self::Number => "<u>",
            Self::OperatorWord => "<tt>",
            Self::Builtin => "<kbd>",
        }
    }

    pub(crate) fn close(self) -> &'static str {
        match self {
            Self::Keyword => "</b>",
            Self::Name => "</em>",
            Self::Escape => "</b></i>",
            Self::String | Self::Comment => "</i>",
            Self::Decorator => "</var>",
            Self::Number => "</u>",
            Self::OperatorWord => "</tt>",
            Self::Builtin => "</kbd>",
        }
    }
}

fn enter_text(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    tr.out.push_str(&escape_html(&visit.node.text));
    if visit.parent_is(NodeKind::FieldName) {
        tr.out.push_str(":");
    }
    Signal::Continue
}

fn enter_inline(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let classes = &visit.node.attrs.classes;
    if visit.parent_is(NodeKind::LiteralBlock) {
        if let Some(style) = CodeStyle::classify(classes) {
            tr.out.push_str(style.open());
        }
    } else if classes.is_empty() {
        tr.out.push_str("<span>");
    } else {
        tr.out
            .push_fmt(format_args!("<span class=\"{}\">", classes.join(" ")));
    }
    Signal::Continue
}

fn leave_inline(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) {
    if visit.parent_is(NodeKind::LiteralBlock) {
        if let Some(style) = CodeStyle::classify(&visit.node.attrs.classes) {
            tr.out.push_str(style.close());
        }
    } else {
        tr.out.push_str("</span>");
    }
}

fn enter_reference(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    if let Some(refuri) = node.get("refuri") {
        tr.out
            .push_fmt(format_args!("<a href=\"{}\">", escape_uri(refuri)));
        if let Some(name) = node.get("name") {
            tr.references.insert(name);
        }
    } else if let Some(refid) = node.get("refid") {
        tr.out.push_fmt(format_args!("<a href=\"#{refid}\">"));
    } else {
        tr.out.push_str("<a>");
    }
    Signal::Continue
}

fn enter_target(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    if let Some(refid) = node.get("refid") {
        tr.out.push_fmt(format_args!("<a name=\"{refid}\"></a>"));
    }
    if tr.settings.foot_hyperlinks
        && let (Some(refuri), Some(name)) = (node.get("refuri"), node.first_name())
        && let Some(reference) = tr.references.get(name)
    {
        let reference = reference.to_owned();
        tr.add_hyperlink(&reference, refuri);
    }
    Signal::Continue
}

fn enter_image(tr: &mut Translator<'_>, visit: &Visit<'_, '_>) -> Signal {
    let node = visit.node;
    let src = escape_uri(node.get("uri").unwrap_or_default());
    tr.out.push_fmt(format_args!("<img src=\"{src}\""));
    for key in ["alt", "width", "height"] {
        if let Some(value) = node.get(key) {
            tr.out.push_fmt(format_args!(" {key}=\"{value}\""));
        }
    }
    if let Some(id) = node.first_id() {
        tr.out.push_fmt(format_args!(" id=\"{id}\""));
    }
    tr.out.push_str(">");
    Signal::Continue
}
