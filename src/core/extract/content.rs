//! Content tree walker.
//!
//! Walks the allow-listed top-level blocks and emits one change per
//! translatable unit. Containers (lists, tables, collapsible elements) are
//! flattened: each child is extracted as if it were top-level, so every
//! item, row cell or section is translated on its own.
//!
//! | kind | policy |
//! |---|---|
//! | link | rewrite `url` with the locale placeholder, no change |
//! | cross-reference element | `title` attribute as a Title change |
//! | collapsible element | `title` attribute, then each child as top-level |
//! | image | nothing |
//! | list, list item, table, table row | each child as top-level |
//! | heading, paragraph, table cell | one ContentBlock over its children |
//! | directive | DirectiveLabel for the label, ContentBlock for the rest |
//!
//! Any other kind is skipped.
//!
//! A block that contains a flattened child is split around it: the
//! children before and after are emitted as separate ContentBlocks, so no
//! block ever covers a region that also has its own changes.

use log::warn;

use super::{ElementVariant, ExtractOptions, serialize::serialize};
use crate::core::{
    error::ExtractError,
    locale::localize_path,
    position::{Change, ChangeKind, Span},
    tree::{Node, NodeKind},
};

/// Extract content changes from the top-level blocks of `root`.
///
/// The tree is mutated in place: link targets are rewritten and directive
/// labels are removed. Fails if a content-bearing node has no span.
pub fn extract_content(root: &mut Node, options: &ExtractOptions) -> Result<Vec<Change>, ExtractError> {
    let mut walker = ContentWalker::new(options);
    for child in root.children.iter_mut() {
        if walker.is_top_level(child) {
            walker.visit(child)?;
        }
    }
    Ok(walker.changes)
}

struct ContentWalker<'a> {
    options: &'a ExtractOptions,
    token: String,
    changes: Vec<Change>,
}

/// Children accumulated into one pending ContentBlock.
#[derive(Default)]
struct Run {
    text: String,
    span: Option<Span>,
}

impl Run {
    fn push(&mut self, kind: NodeKind, rendered: &str, span: Span, separate_blocks: bool) {
        if !self.text.is_empty() {
            if kind == NodeKind::Code {
                self.text.push('\n');
            } else if separate_blocks {
                self.text.push_str("\n\n");
            }
        }
        if kind.is_block() {
            self.text.push_str(rendered.trim_end_matches('\n'));
        } else {
            self.text.push_str(rendered);
        }
        self.span = Some(match self.span {
            Some(run) => Span::new(run.start, span.end),
            None => span,
        });
    }

    fn take(&mut self) -> Option<(Span, String)> {
        let text = std::mem::take(&mut self.text);
        let span = self.span.take()?;
        if text.trim().is_empty() {
            None
        } else {
            Some((span, text))
        }
    }
}

impl<'a> ContentWalker<'a> {
    fn new(options: &'a ExtractOptions) -> Self {
        Self {
            options,
            token: options.token(),
            changes: Vec::new(),
        }
    }

    fn is_top_level(&self, node: &Node) -> bool {
        match node.kind {
            NodeKind::Directive
            | NodeKind::Heading
            | NodeKind::Image
            | NodeKind::List
            | NodeKind::Paragraph
            | NodeKind::Table => true,
            NodeKind::JsxFlow => self.options.element_variant(node).is_some(),
            _ => false,
        }
    }

    /// Children that emit their own changes instead of joining the
    /// enclosing block's text.
    fn is_flattened(&self, node: &Node) -> bool {
        match node.kind {
            NodeKind::List | NodeKind::Table | NodeKind::Directive => true,
            NodeKind::JsxFlow => self.options.element_variant(node).is_some(),
            _ => false,
        }
    }

    /// Extract `node` as a top-level unit.
    fn visit(&mut self, node: &mut Node) -> Result<(), ExtractError> {
        match node.kind {
            NodeKind::Link => self.localize_links(node),
            NodeKind::JsxFlow => match self.options.element_variant(node) {
                Some(ElementVariant::CrossReference) => self.extract_title_attribute(node)?,
                Some(ElementVariant::Collapsible) => {
                    self.extract_title_attribute(node)?;
                    for child in node.children.iter_mut() {
                        self.visit(child)?;
                    }
                }
                None => {}
            },
            // Image URL localization is not implemented.
            NodeKind::Image => {}
            NodeKind::List | NodeKind::ListItem | NodeKind::Table | NodeKind::TableRow => {
                for child in node.children.iter_mut() {
                    self.visit(child)?;
                }
            }
            NodeKind::Heading | NodeKind::Paragraph | NodeKind::TableCell => {
                self.emit_blocks(&mut node.children, false, "")?;
            }
            NodeKind::Directive => self.visit_directive(node)?,
            _ => {}
        }
        Ok(())
    }

    fn visit_directive(&mut self, node: &mut Node) -> Result<(), ExtractError> {
        let name = node.name.clone().unwrap_or_default();

        if node
            .children
            .first()
            .is_some_and(|child| child.kind == NodeKind::DirectiveLabel)
        {
            let mut label = node.children.remove(0);
            let span = label.span.ok_or(ExtractError::MissingSpan {
                kind: NodeKind::DirectiveLabel,
            })?;
            self.localize_links(&mut label);
            let text = serialize(&label);
            // The label's span includes its brackets.
            if span.len() > 2 && !text.trim().is_empty() {
                self.changes.push(
                    Change::new(
                        ChangeKind::DirectiveLabel,
                        text,
                        Span::new(span.start + 1, span.end - 1),
                    )
                    .with_notes(format!("{} directive label", name)),
                );
            }
        }

        let notes = format!("{} directive", name);
        self.emit_blocks(&mut node.children, true, &notes)
    }

    /// Accumulate `children` into ContentBlocks, splitting around
    /// flattened children.
    fn emit_blocks(
        &mut self,
        children: &mut [Node],
        separate_blocks: bool,
        notes: &str,
    ) -> Result<(), ExtractError> {
        let mut run = Run::default();

        for child in children.iter_mut() {
            if self.is_flattened(child) {
                self.flush(&mut run, notes);
                self.visit(child)?;
                continue;
            }

            let span = child
                .span
                .ok_or(ExtractError::MissingSpan { kind: child.kind })?;
            // Rewrites must land before the child is serialized.
            self.localize_links(child);
            run.push(child.kind, &serialize(child), span, separate_blocks);
        }

        self.flush(&mut run, notes);
        Ok(())
    }

    fn flush(&mut self, run: &mut Run, notes: &str) {
        if let Some((span, text)) = run.take() {
            self.changes
                .push(Change::new(ChangeKind::ContentBlock, text, span).with_notes(notes));
        }
    }

    fn extract_title_attribute(&mut self, node: &Node) -> Result<(), ExtractError> {
        let element = node.name.as_deref().unwrap_or("element");

        let Some(attribute) = node.attribute("title") else {
            warn!("Skipping <{}>: no title attribute", element);
            return Ok(());
        };
        let Some(value) = attribute.value.as_deref() else {
            warn!("Skipping <{}>: title is not a string literal", element);
            return Ok(());
        };
        if value.is_empty() {
            return Ok(());
        }
        let span = attribute
            .span
            .ok_or(ExtractError::MissingSpan { kind: node.kind })?;

        self.changes.push(
            Change::new(ChangeKind::Title, value, span)
                .with_notes(format!("title attribute of <{}>", element)),
        );
        Ok(())
    }

    /// Rewrite the target of every link in the subtree.
    fn localize_links(&self, node: &mut Node) {
        if node.kind == NodeKind::Link {
            if let Some(url) = node.attr("url") {
                let rewritten = localize_path(url, &self.options.default_locale, &self.token);
                if rewritten != url {
                    node.set_attr("url", rewritten);
                }
            }
        }
        for child in node.children.iter_mut() {
            self.localize_links(child);
        }
    }
}
