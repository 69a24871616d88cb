//! Node behaviors.
//!
//! Every [`NodeKind`] maps to a [`Behavior`]: an enter step run before the
//! node's children and a leave step run after them. Groups of kinds that
//! render alike (admonitions, div-like containers, table-like containers,
//! row-like and cell-like nodes) share one behavior. Kinds without markup of
//! their own use [`PASS_THROUGH`].

mod block;
mod docinfo;
mod inline;
mod list;
mod notes;
mod table;

use crate::error::RenderError;
use crate::node::{DocumentNode, NodeKind};
use crate::translator::Translator;

/// Outcome of a node's enter step.
#[must_use]
pub(crate) enum Signal {
    /// Visit the children, then run the leave step.
    Continue,
    /// The node is fully handled: neither its children nor its leave step run.
    SkipChildren,
    /// Stop rendering with an error.
    Abort(RenderError),
}

pub(crate) type EnterFn = fn(&mut Translator<'_>, &Visit<'_, '_>) -> Signal;
pub(crate) type LeaveFn = fn(&mut Translator<'_>, &Visit<'_, '_>);

/// Enter/leave pair for a node kind.
pub(crate) struct Behavior {
    pub(crate) enter: EnterFn,
    pub(crate) leave: LeaveFn,
}

/// Node being visited, with its ancestors (root first).
pub(crate) struct Visit<'t, 'p> {
    pub(crate) node: &'t DocumentNode,
    ancestors: &'p [&'t DocumentNode],
}

impl<'t, 'p> Visit<'t, 'p> {
    pub(crate) fn new(node: &'t DocumentNode, ancestors: &'p [&'t DocumentNode]) -> Self {
        Self { node, ancestors }
    }

    pub(crate) fn parent(&self) -> Option<&'t DocumentNode> {
        self.ancestors.last().copied()
    }

    pub(crate) fn parent_kind(&self) -> Option<NodeKind> {
        self.parent().map(|p| p.kind)
    }

    pub(crate) fn parent_is(&self, kind: NodeKind) -> bool {
        self.parent_kind() == Some(kind)
    }

    pub(crate) fn grandparent_kind(&self) -> Option<NodeKind> {
        let len = self.ancestors.len();
        (len >= 2).then(|| self.ancestors[len - 2].kind)
    }

    /// Slash-joined kinds from the root down to this node.
    pub(crate) fn location(&self) -> String {
        self.ancestors
            .iter()
            .map(|n| n.kind.tag_name())
            .chain(std::iter::once(self.node.kind.tag_name()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn enter_noop(_: &mut Translator<'_>, _: &Visit<'_, '_>) -> Signal {
    Signal::Continue
}

fn leave_noop(_: &mut Translator<'_>, _: &Visit<'_, '_>) {}

/// Enter a node whose content is consumed elsewhere or not rendered at all.
fn enter_skip(_: &mut Translator<'_>, _: &Visit<'_, '_>) -> Signal {
    Signal::SkipChildren
}

/// Behavior of kinds that add no markup of their own.
pub(crate) static PASS_THROUGH: Behavior = Behavior {
    enter: enter_noop,
    leave: leave_noop,
};

static SKIP: Behavior = Behavior {
    enter: enter_skip,
    leave: leave_noop,
};

/// Behavior for a node kind.
pub(crate) fn behavior_for(kind: NodeKind) -> &'static Behavior {
    match kind {
        NodeKind::Document => &block::DOCUMENT,
        NodeKind::Section => &block::SECTION,
        NodeKind::Title => &block::TITLE,
        NodeKind::Subtitle => &block::SUBTITLE,
        NodeKind::Paragraph => &block::PARAGRAPH,
        NodeKind::BlockQuote => &block::BLOCK_QUOTE,
        NodeKind::LiteralBlock => &block::LITERAL_BLOCK,
        NodeKind::DoctestBlock => &block::DOCTEST_BLOCK,
        NodeKind::MathBlock => &block::MATH_BLOCK,
        NodeKind::Transition => &block::TRANSITION,
        NodeKind::Comment => &block::COMMENT,
        NodeKind::Raw => &block::RAW,
        NodeKind::SystemMessage => &block::SYSTEM_MESSAGE,
        NodeKind::SubstitutionReference => &block::SUBSTITUTION_REFERENCE,
        NodeKind::Figure
        | NodeKind::Caption
        | NodeKind::Legend
        | NodeKind::Topic
        | NodeKind::Sidebar
        | NodeKind::LineBlock
        | NodeKind::Line => &block::DIV,
        NodeKind::Admonition
        | NodeKind::Attention
        | NodeKind::Caution
        | NodeKind::Danger
        | NodeKind::Error
        | NodeKind::Hint
        | NodeKind::Important
        | NodeKind::Note
        | NodeKind::Tip
        | NodeKind::Warning => &block::ADMONITION,

        NodeKind::Text => &inline::TEXT,
        NodeKind::Emphasis => &inline::EMPHASIS,
        NodeKind::Strong => &inline::STRONG,
        NodeKind::Literal => &inline::LITERAL,
        NodeKind::Inline => &inline::INLINE,
        NodeKind::TitleReference => &inline::TITLE_REFERENCE,
        NodeKind::Problematic => &inline::PROBLEMATIC,
        NodeKind::Reference => &inline::REFERENCE,
        NodeKind::Target => &inline::TARGET,
        NodeKind::Image => &inline::IMAGE,

        NodeKind::Footnote => &notes::FOOTNOTE,
        NodeKind::Citation => &notes::CITATION,
        NodeKind::FootnoteReference => &notes::FOOTNOTE_REFERENCE,
        NodeKind::CitationReference => &notes::CITATION_REFERENCE,
        NodeKind::Label => &notes::LABEL,

        NodeKind::BulletList => &list::BULLET_LIST,
        NodeKind::EnumeratedList => &list::ENUMERATED_LIST,
        NodeKind::ListItem => &list::LIST_ITEM,
        NodeKind::DefinitionList => &list::DEFINITION_LIST,
        NodeKind::Term => &list::TERM,
        NodeKind::Classifier => &list::CLASSIFIER,
        NodeKind::Definition => &list::DEFINITION,
        NodeKind::Option => &list::OPTION,
        NodeKind::OptionString => &list::OPTION_STRING,
        NodeKind::OptionArgument => &list::OPTION_ARGUMENT,

        NodeKind::Table | NodeKind::FieldList | NodeKind::OptionList | NodeKind::Docinfo => {
            &table::TABLE
        }
        NodeKind::Thead => &table::THEAD,
        NodeKind::Tbody => &table::TBODY,
        NodeKind::Row | NodeKind::Field | NodeKind::OptionListItem => &table::ROW,
        NodeKind::Entry
        | NodeKind::FieldName
        | NodeKind::FieldBody
        | NodeKind::OptionGroup
        | NodeKind::Description => &table::ENTRY,

        NodeKind::Meta => &docinfo::META,
        NodeKind::Author => &docinfo::AUTHOR,
        NodeKind::Authors => &docinfo::AUTHORS,
        NodeKind::Version => &docinfo::VERSION,
        NodeKind::Status => &docinfo::STATUS,

        NodeKind::SubstitutionDefinition | NodeKind::Pending => &SKIP,

        NodeKind::Tgroup
        | NodeKind::Colspec
        | NodeKind::DefinitionListItem
        | NodeKind::Container
        | NodeKind::Compound
        | NodeKind::Rubric
        | NodeKind::Attribution
        | NodeKind::Generated => &PASS_THROUGH,
    }
}
