//! MDX source parser (uses the `markdown` crate for the mdast).
//!
//! Converts the mdast into the positioned [`Node`] tree. Positions are the
//! mdast byte offsets, taken as-is. Opaque nodes (JSX, HTML, expressions)
//! keep their raw source slice as `value` so block reconstruction can
//! reproduce them.
//!
//! Container directives are found by [`scan_directives`] first and blanked
//! out of the text handed to the mdast parser. Each directive body is then
//! parsed on its own, again with absolute offsets, and attached as a
//! `Directive` node.

use std::{borrow::Cow, ops::Range};

use markdown::{Constructs, ParseOptions, mdast, to_mdast};

use super::{
    directive::{DirectiveRegion, blank_outside, scan_directives},
    jsx_tag::scan_attributes,
};
use crate::core::{
    error::ExtractError,
    position::Span,
    tree::{Attribute, Node, NodeKind},
};

fn parse_options() -> ParseOptions {
    ParseOptions {
        constructs: Constructs {
            frontmatter: true,
            gfm_table: true,
            gfm_strikethrough: true,
            ..Constructs::mdx()
        },
        ..ParseOptions::mdx()
    }
}

/// Parse MDX source into a positioned tree rooted at a `Root` node.
pub fn parse_document(source: &str) -> Result<Node, ExtractError> {
    parse_range(source, 0..source.len())
}

fn parse_mdast(text: &str) -> Result<mdast::Node, ExtractError> {
    to_mdast(text, &parse_options()).map_err(|e| ExtractError::Parse(e.to_string()))
}

/// Parse `range` of `source`. Spans in the result are offsets into `source`.
fn parse_range(source: &str, range: Range<usize>) -> Result<Node, ExtractError> {
    let directives = scan_directives(source, range.clone());
    let holes: Vec<Span> = directives.iter().map(|d| d.span).collect();

    let text = if range == (0..source.len()) && holes.is_empty() {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(blank_outside(source, range, &holes)?)
    };
    let mut root = convert(&parse_mdast(&text)?, &text);

    for region in &directives {
        let node = directive_node(source, region)?;
        let at = root
            .children
            .iter()
            .position(|c| c.span.is_some_and(|s| s.start > region.span.start))
            .unwrap_or(root.children.len());
        root.children.insert(at, node);
    }
    Ok(root)
}

fn directive_node(source: &str, region: &DirectiveRegion) -> Result<Node, ExtractError> {
    let mut children = Vec::new();
    if let Some(label) = region.label {
        children.push(label_node(source, label)?);
    }
    children.extend(parse_range(source, region.body.clone())?.children);

    Ok(Node::new(NodeKind::Directive)
        .with_name(region.name.as_str())
        .with_children(children)
        .with_span(region.span.start, region.span.end))
}

/// The `[label]` span keeps its brackets; its children are the inline
/// content between them.
fn label_node(source: &str, label: Span) -> Result<Node, ExtractError> {
    let mut node = Node::new(NodeKind::DirectiveLabel).with_span(label.start, label.end);
    let inner = label.start + 1..label.end - 1;
    if inner.is_empty() {
        return Ok(node);
    }

    let text = &source[inner.clone()];
    let mut parsed = convert(&parse_mdast(text)?, text);
    shift_spans(&mut parsed, inner.start);

    let mut blocks = parsed.children;
    node.children = if blocks.len() == 1 && blocks[0].kind == NodeKind::Paragraph {
        blocks.remove(0).children
    } else {
        blocks
    };
    Ok(node)
}

fn shift_spans(node: &mut Node, by: usize) {
    if let Some(span) = node.span.as_mut() {
        *span = Span::new(span.start + by, span.end + by);
    }
    for attribute in &mut node.attributes {
        if let Some(span) = attribute.span.as_mut() {
            *span = Span::new(span.start + by, span.end + by);
        }
    }
    for child in &mut node.children {
        shift_spans(child, by);
    }
}

fn convert(node: &mdast::Node, source: &str) -> Node {
    let span = node
        .position()
        .map(|p| Span::new(p.start.offset, p.end.offset));
    let raw = || {
        span.and_then(|s| s.slice(source))
            .unwrap_or_default()
            .to_string()
    };

    let mut out = match node {
        mdast::Node::Root(_) => Node::new(NodeKind::Root),
        mdast::Node::Yaml(yaml) => Node::new(NodeKind::Frontmatter).with_value(yaml.value.as_str()),
        mdast::Node::MdxjsEsm(esm) => Node::new(NodeKind::Esm).with_value(esm.value.as_str()),
        mdast::Node::Heading(heading) => Node::new(NodeKind::Heading)
            .with_attribute(Attribute::new("depth", heading.depth.to_string())),
        mdast::Node::Paragraph(_) => Node::new(NodeKind::Paragraph),
        mdast::Node::Text(text) => Node::new(NodeKind::Text).with_value(text.value.as_str()),
        mdast::Node::Emphasis(_) => Node::new(NodeKind::Emphasis),
        mdast::Node::Strong(_) => Node::new(NodeKind::Strong),
        mdast::Node::Delete(_) => Node::new(NodeKind::Delete),
        mdast::Node::InlineCode(code) => {
            Node::new(NodeKind::InlineCode).with_value(code.value.as_str())
        }
        mdast::Node::Code(code) => {
            let mut out = Node::new(NodeKind::Code).with_value(code.value.as_str());
            if let Some(lang) = &code.lang {
                out.set_attr("lang", lang.as_str());
            }
            if let Some(meta) = &code.meta {
                out.set_attr("meta", meta.as_str());
            }
            out
        }
        mdast::Node::Break(_) => Node::new(NodeKind::Break),
        mdast::Node::ThematicBreak(_) => Node::new(NodeKind::ThematicBreak),
        mdast::Node::Link(link) => {
            let mut out = Node::new(NodeKind::Link);
            out.set_attr("url", link.url.as_str());
            if let Some(title) = &link.title {
                out.set_attr("title", title.as_str());
            }
            out
        }
        mdast::Node::Image(image) => {
            let mut out = Node::new(NodeKind::Image);
            out.set_attr("url", image.url.as_str());
            out.set_attr("alt", image.alt.as_str());
            if let Some(title) = &image.title {
                out.set_attr("title", title.as_str());
            }
            out
        }
        mdast::Node::List(list) => {
            let mut out = Node::new(NodeKind::List);
            out.set_attr("ordered", list.ordered.to_string());
            if let Some(start) = list.start {
                out.set_attr("start", start.to_string());
            }
            out
        }
        mdast::Node::ListItem(_) => Node::new(NodeKind::ListItem),
        mdast::Node::Table(_) => Node::new(NodeKind::Table),
        mdast::Node::TableRow(_) => Node::new(NodeKind::TableRow),
        mdast::Node::TableCell(_) => Node::new(NodeKind::TableCell),
        mdast::Node::Blockquote(_) => Node::new(NodeKind::Blockquote),
        mdast::Node::MdxJsxFlowElement(element) => {
            let mut out = Node::new(NodeKind::JsxFlow).with_value(raw());
            out.name = element.name.clone();
            if let Some(span) = span {
                out.attributes = scan_attributes(source, span.start);
            }
            out
        }
        mdast::Node::MdxJsxTextElement(element) => {
            let mut out = Node::new(NodeKind::JsxText).with_value(raw());
            out.name = element.name.clone();
            if let Some(span) = span {
                out.attributes = scan_attributes(source, span.start);
            }
            out
        }
        mdast::Node::Html(html) => Node::new(NodeKind::Html).with_value(html.value.as_str()),
        mdast::Node::MdxFlowExpression(_) | mdast::Node::MdxTextExpression(_) => {
            Node::new(NodeKind::Expression).with_value(raw())
        }
        _ => Node::new(NodeKind::Other).with_value(raw()),
    };

    out.span = span;
    if let Some(children) = node.children() {
        out.children = children.iter().map(|child| convert(child, source)).collect();
    }
    out
}
