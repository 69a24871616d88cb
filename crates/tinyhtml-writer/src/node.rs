//! Document tree handed to the writer.
//!
//! The tree is produced by an external reStructuredText parser after all
//! transforms have run. Each [`DocumentNode`] owns its children exclusively,
//! so traversal order is simply child order.

use std::collections::BTreeMap;

/// Node type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum NodeKind {
    // Structure
    Document,
    Section,
    Title,
    Subtitle,
    Transition,
    Topic,
    Sidebar,
    Container,
    Compound,
    Rubric,
    // Body
    Paragraph,
    BlockQuote,
    Attribution,
    LiteralBlock,
    DoctestBlock,
    MathBlock,
    LineBlock,
    Line,
    Figure,
    Caption,
    Legend,
    Image,
    // Inline
    Text,
    Emphasis,
    Strong,
    Literal,
    Inline,
    TitleReference,
    Reference,
    Target,
    Problematic,
    Generated,
    // Lists
    BulletList,
    EnumeratedList,
    ListItem,
    DefinitionList,
    DefinitionListItem,
    Term,
    Classifier,
    Definition,
    // Field and option lists
    FieldList,
    Field,
    FieldName,
    FieldBody,
    OptionList,
    OptionListItem,
    OptionGroup,
    Option,
    OptionString,
    OptionArgument,
    Description,
    // Bibliographic fields
    Docinfo,
    Author,
    Authors,
    Version,
    Status,
    // Notes
    Footnote,
    FootnoteReference,
    Citation,
    CitationReference,
    Label,
    // Tables
    Table,
    Tgroup,
    Colspec,
    Thead,
    Tbody,
    Row,
    Entry,
    // Admonitions
    Admonition,
    Attention,
    Caution,
    Danger,
    Error,
    Hint,
    Important,
    Note,
    Tip,
    Warning,
    // Special
    SystemMessage,
    Raw,
    SubstitutionDefinition,
    SubstitutionReference,
    Comment,
    Meta,
    Pending,
}

impl NodeKind {
    /// Node type name as used by reStructuredText tooling (`block_quote`, `list_item`, ...).
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Section => "section",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Transition => "transition",
            Self::Topic => "topic",
            Self::Sidebar => "sidebar",
            Self::Container => "container",
            Self::Compound => "compound",
            Self::Rubric => "rubric",
            Self::Paragraph => "paragraph",
            Self::BlockQuote => "block_quote",
            Self::Attribution => "attribution",
            Self::LiteralBlock => "literal_block",
            Self::DoctestBlock => "doctest_block",
            Self::MathBlock => "math_block",
            Self::LineBlock => "line_block",
            Self::Line => "line",
            Self::Figure => "figure",
            Self::Caption => "caption",
            Self::Legend => "legend",
            Self::Image => "image",
            Self::Text => "text",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Literal => "literal",
            Self::Inline => "inline",
            Self::TitleReference => "title_reference",
            Self::Reference => "reference",
            Self::Target => "target",
            Self::Problematic => "problematic",
            Self::Generated => "generated",
            Self::BulletList => "bullet_list",
            Self::EnumeratedList => "enumerated_list",
            Self::ListItem => "list_item",
            Self::DefinitionList => "definition_list",
            Self::DefinitionListItem => "definition_list_item",
            Self::Term => "term",
            Self::Classifier => "classifier",
            Self::Definition => "definition",
            Self::FieldList => "field_list",
            Self::Field => "field",
            Self::FieldName => "field_name",
            Self::FieldBody => "field_body",
            Self::OptionList => "option_list",
            Self::OptionListItem => "option_list_item",
            Self::OptionGroup => "option_group",
            Self::Option => "option",
            Self::OptionString => "option_string",
            Self::OptionArgument => "option_argument",
            Self::Description => "description",
            Self::Docinfo => "docinfo",
            Self::Author => "author",
            Self::Authors => "authors",
            Self::Version => "version",
            Self::Status => "status",
            Self::Footnote => "footnote",
            Self::FootnoteReference => "footnote_reference",
            Self::Citation => "citation",
            Self::CitationReference => "citation_reference",
            Self::Label => "label",
            Self::Table => "table",
            Self::Tgroup => "tgroup",
            Self::Colspec => "colspec",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Row => "row",
            Self::Entry => "entry",
            Self::Admonition => "admonition",
            Self::Attention => "attention",
            Self::Caution => "caution",
            Self::Danger => "danger",
            Self::Error => "error",
            Self::Hint => "hint",
            Self::Important => "important",
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Warning => "warning",
            Self::SystemMessage => "system_message",
            Self::Raw => "raw",
            Self::SubstitutionDefinition => "substitution_definition",
            Self::SubstitutionReference => "substitution_reference",
            Self::Comment => "comment",
            Self::Meta => "meta",
            Self::Pending => "pending",
        }
    }

    /// Whether this is one of the admonition kinds, generic or specific.
    #[must_use]
    pub fn is_admonition(self) -> bool {
        matches!(
            self,
            Self::Admonition
                | Self::Attention
                | Self::Caution
                | Self::Danger
                | Self::Error
                | Self::Hint
                | Self::Important
                | Self::Note
                | Self::Tip
                | Self::Warning
        )
    }

    /// Whether the node holds running text, so its children's text is
    /// concatenated without separators.
    #[must_use]
    pub fn is_text_element(self) -> bool {
        matches!(
            self,
            Self::Title
                | Self::Subtitle
                | Self::Rubric
                | Self::Paragraph
                | Self::Attribution
                | Self::LiteralBlock
                | Self::DoctestBlock
                | Self::MathBlock
                | Self::Line
                | Self::Caption
                | Self::Emphasis
                | Self::Strong
                | Self::Literal
                | Self::Inline
                | Self::TitleReference
                | Self::Reference
                | Self::Target
                | Self::Problematic
                | Self::Generated
                | Self::Term
                | Self::Classifier
                | Self::FieldName
                | Self::OptionString
                | Self::OptionArgument
                | Self::Author
                | Self::Version
                | Self::Status
                | Self::FootnoteReference
                | Self::CitationReference
                | Self::Label
                | Self::Raw
                | Self::SubstitutionDefinition
                | Self::SubstitutionReference
                | Self::Comment
        )
    }
}

/// Node properties.
///
/// The list-valued properties every element carries are typed fields; all
/// other properties (`refid`, `refuri`, `bullet`, `enumtype`, `morecols`,
/// `uri`, `format`, ...) live in `props`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Attributes {
    pub ids: Vec<String>,
    pub names: Vec<String>,
    pub dupnames: Vec<String>,
    pub classes: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(flatten, deserialize_with = "deserialize_props")
    )]
    pub props: BTreeMap<String, String>,
}

/// Read scalar property values, keeping numbers and booleans as their text
/// form. Null values are dropped.
#[cfg(feature = "serde")]
fn deserialize_props<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    let raw = BTreeMap::<String, Option<Scalar>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value? {
                Scalar::Text(text) => text,
                Scalar::Integer(n) => n.to_string(),
                Scalar::Unsigned(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
                Scalar::Flag(b) => b.to_string(),
            };
            Some((key, value))
        })
        .collect())
}

/// Node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentNode {
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<DocumentNode>,
    /// Payload of [`NodeKind::Text`] nodes; empty for elements.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
}

impl DocumentNode {
    /// Create an element node with no properties or children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(NodeKind::Text)
        }
    }

    /// Create an element holding a single text node.
    #[must_use]
    pub fn with_text(kind: NodeKind, text: impl Into<String>) -> Self {
        Self::new(kind).with_child(Self::text(text))
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = DocumentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add an id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.attrs.ids.push(id.into());
        self
    }

    /// Add a name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.attrs.names.push(name.into());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attrs.classes.push(class.into());
        self
    }

    /// Set a scalar property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.props.insert(key.into(), value.into());
        self
    }

    /// Get a scalar property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.props.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn first_id(&self) -> Option<&str> {
        self.attrs.ids.first().map(String::as_str)
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.attrs.names.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs.classes.iter().any(|c| c == class)
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn child(&self, kind: NodeKind) -> Option<&DocumentNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Plain text content of this node and its descendants.
    ///
    /// Text elements join their children directly; other elements separate
    /// child texts with a blank line.
    #[must_use]
    pub fn astext(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.kind == NodeKind::Text {
            out.push_str(&self.text);
            return;
        }
        let separator = if self.kind.is_text_element() {
            ""
        } else {
            "\n\n"
        };
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            child.collect_text(out);
        }
    }
}
