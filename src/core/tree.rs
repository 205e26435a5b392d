//! Positioned document tree consumed by the extractors.
//!
//! The tree is built once per document (see [`crate::core::parsers::mdx`]),
//! owned exclusively by one extraction pass, and dropped afterwards.
//! Kind-specific data lives in named string attributes:
//!
//! | kind | attributes |
//! |---|---|
//! | `Heading` | `depth` |
//! | `Code` | `lang`, `meta` |
//! | `Link` | `url`, `title` |
//! | `Image` | `url`, `alt`, `title` |
//! | `List` | `ordered`, `start` |
//! | `JsxFlow` / `JsxText` | the element's own attributes, with value spans |

use std::fmt;

use super::position::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    /// Leading YAML metadata block. `value` holds the text between the fences.
    Frontmatter,
    /// Top-level ESM block (imports/exports). `value` holds its raw text.
    Esm,
    Heading,
    Paragraph,
    Text,
    Emphasis,
    Strong,
    Delete,
    InlineCode,
    Code,
    Break,
    ThematicBreak,
    Link,
    Image,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    Blockquote,
    /// Container directive (`:::note ... :::`). `name` holds the variant.
    Directive,
    /// The bracketed label of a directive; always its first child.
    DirectiveLabel,
    /// Block-level JSX element. `name` holds the element name.
    JsxFlow,
    /// Inline JSX element. `value` holds its raw source.
    JsxText,
    Html,
    /// MDX `{...}` expression. `value` holds its raw source.
    Expression,
    Other,
}

impl NodeKind {
    /// Kinds rendered as blocks when serialized next to each other.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading
                | NodeKind::Paragraph
                | NodeKind::Code
                | NodeKind::ThematicBreak
                | NodeKind::List
                | NodeKind::Table
                | NodeKind::Blockquote
                | NodeKind::Directive
                | NodeKind::JsxFlow
                | NodeKind::Html
                | NodeKind::Expression
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Root => "root",
            NodeKind::Frontmatter => "frontmatter",
            NodeKind::Esm => "esm",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::InlineCode => "inline-code",
            NodeKind::Code => "code",
            NodeKind::Break => "break",
            NodeKind::ThematicBreak => "thematic-break",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::List => "list",
            NodeKind::ListItem => "list-item",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::TableCell => "table-cell",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Directive => "directive",
            NodeKind::DirectiveLabel => "directive-label",
            NodeKind::JsxFlow => "jsx-flow",
            NodeKind::JsxText => "jsx-text",
            NodeKind::Html => "html",
            NodeKind::Expression => "expression",
            NodeKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// A named string-valued field on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for expression-valued JSX attributes (`title={x}`).
    pub value: Option<String>,
    /// Location of the literal value (quotes excluded), when known.
    pub span: Option<Span>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub value: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub span: Option<Span>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
            span: None,
        }
    }

    /// A text leaf.
    pub fn text(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self::new(NodeKind::Text)
            .with_value(value)
            .with_span(start, end)
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Literal value of a named attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(|a| a.value.as_deref())
    }

    /// Set (or add) a literal attribute value, keeping any recorded span.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => attribute.value = Some(value),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}
