//! Markdown serialization of tree nodes.
//!
//! Used to reconstruct the text of content blocks. The output is normalized
//! markdown, not a byte-exact copy of the source: emphasis is always `*`,
//! lists always use `-`, and so on. Opaque nodes (JSX, HTML, expressions)
//! are reproduced from their raw source.

use crate::core::tree::{Node, NodeKind};

/// Serialize a node and its subtree to markdown.
pub fn serialize(node: &Node) -> String {
    match node.kind {
        NodeKind::Text => node.value_or_empty().to_string(),
        NodeKind::Emphasis => wrap("*", &inline(node)),
        NodeKind::Strong => wrap("**", &inline(node)),
        NodeKind::Delete => wrap("~~", &inline(node)),
        NodeKind::InlineCode => inline_code(node.value_or_empty()),
        NodeKind::Break => "\\\n".to_string(),
        NodeKind::Link => {
            let url = node.attr("url").unwrap_or_default();
            format!("[{}]({}{})", inline(node), url, title_suffix(node))
        }
        NodeKind::Image => {
            let alt = node.attr("alt").unwrap_or_default();
            let url = node.attr("url").unwrap_or_default();
            format!("![{}]({}{})", alt, url, title_suffix(node))
        }
        NodeKind::Paragraph | NodeKind::TableCell | NodeKind::DirectiveLabel => inline(node),
        NodeKind::Heading => {
            let depth = node
                .attr("depth")
                .and_then(|d| d.parse::<usize>().ok())
                .unwrap_or(1)
                .clamp(1, 6);
            format!("{} {}", "#".repeat(depth), inline(node))
        }
        NodeKind::Code => code_block(node),
        NodeKind::ThematicBreak => "***".to_string(),
        NodeKind::Blockquote => blocks(&node.children)
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::List => list(node),
        NodeKind::ListItem | NodeKind::Root => blocks(&node.children),
        NodeKind::Table => table(node),
        NodeKind::TableRow => table_row(node),
        NodeKind::Directive => directive(node),
        NodeKind::Frontmatter => format!("---\n{}\n---", node.value_or_empty()),
        NodeKind::Esm
        | NodeKind::JsxFlow
        | NodeKind::JsxText
        | NodeKind::Html
        | NodeKind::Expression
        | NodeKind::Other => node.value_or_empty().to_string(),
    }
}

/// Concatenate the serialized children of an inline container.
fn inline(node: &Node) -> String {
    node.children.iter().map(serialize).collect()
}

/// Serialize block children separated by blank lines.
fn blocks(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| serialize(child).trim_end_matches('\n').to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap(marker: &str, content: &str) -> String {
    format!("{marker}{content}{marker}")
}

fn title_suffix(node: &Node) -> String {
    match node.attr("title") {
        Some(title) => format!(" \"{}\"", title.replace('"', "\\\"")),
        None => String::new(),
    }
}

fn inline_code(value: &str) -> String {
    if value.contains('`') {
        format!("`` {} ``", value)
    } else {
        format!("`{}`", value)
    }
}

fn code_block(node: &Node) -> String {
    let value = node.value_or_empty();
    let fence = if value.contains("```") { "~~~" } else { "```" };
    let mut info = node.attr("lang").unwrap_or_default().to_string();
    if let Some(meta) = node.attr("meta") {
        info.push(' ');
        info.push_str(meta);
    }
    format!("{fence}{info}\n{value}\n{fence}")
}

fn list(node: &Node) -> String {
    let ordered = node.attr("ordered") == Some("true");
    let first = node
        .attr("start")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1);

    node.children
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if ordered {
                format!("{}. ", first + i as u32)
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());
            let body = serialize(item);
            let mut lines = body.lines();
            let mut out = format!("{}{}", marker, lines.next().unwrap_or_default());
            for line in lines {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&indent);
                    out.push_str(line);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_row(node: &Node) -> String {
    let cells: Vec<String> = node.children.iter().map(serialize).collect();
    format!("| {} |", cells.join(" | "))
}

fn table(node: &Node) -> String {
    let mut lines = Vec::new();
    for (i, row) in node.children.iter().enumerate() {
        lines.push(table_row(row));
        if i == 0 {
            let delimiter = vec!["-"; row.children.len().max(1)].join(" | ");
            lines.push(format!("| {} |", delimiter));
        }
    }
    lines.join("\n")
}

fn directive(node: &Node) -> String {
    let name = node.name.as_deref().unwrap_or_default();
    let (label, body) = match node.children.split_first() {
        Some((first, rest)) if first.kind == NodeKind::DirectiveLabel => {
            (format!("[{}]", serialize(first)), rest)
        }
        _ => (String::new(), node.children.as_slice()),
    };
    format!(":::{}{}\n{}\n:::", name, label, blocks(body))
}
