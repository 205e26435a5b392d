//! ESM block parser (uses swc for the module AST).
//!
//! Only module source literals are of interest: the `"..."` of
//! `import x from "..."`, `import "..."`, `export { x } from "..."` and
//! `export * from "..."`.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::{ModuleDecl, ModuleItem, Str};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::position::Span;

/// Which statement a source literal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatement {
    Import,
    Export,
}

impl SourceStatement {
    pub fn describe(&self) -> &'static str {
        match self {
            SourceStatement::Import => "import source",
            SourceStatement::Export => "export source",
        }
    }
}

/// A module source literal, located relative to the parsed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    pub statement: SourceStatement,
    /// The path between the quotes.
    pub value: String,
    /// Span of `value` within the parsed code (quotes excluded).
    pub span: Span,
}

/// Parse an ESM block and list its module source literals in order.
pub fn parse_module_sources(code: &str) -> Result<Vec<ModuleSource>> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map.new_source_file(
            FileName::Custom("esm".into()).into(),
            code.to_string(),
        );

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse ESM block: {:?}", e))?;
        let recovered = parser.take_errors();
        if let Some(e) = recovered.first() {
            return Err(anyhow!("Failed to parse ESM block: {:?}", e));
        }

        let base = source_file.start_pos.0;
        let mut sources = Vec::new();

        for item in &module.body {
            let ModuleItem::ModuleDecl(decl) = item else {
                continue;
            };
            let (statement, src): (SourceStatement, &Str) = match decl {
                ModuleDecl::Import(import) => (SourceStatement::Import, &*import.src),
                ModuleDecl::ExportNamed(export) => match &export.src {
                    Some(src) => (SourceStatement::Export, &**src),
                    None => continue,
                },
                ModuleDecl::ExportAll(export) => (SourceStatement::Export, &*export.src),
                _ => continue,
            };

            let (Some(lo), Some(hi)) = (
                src.span.lo.0.checked_sub(base),
                src.span.hi.0.checked_sub(base),
            ) else {
                continue;
            };
            let (lo, hi) = (lo as usize, hi as usize);
            // The literal's span includes its quotes.
            if hi < lo + 2 || hi > code.len() {
                continue;
            }
            let span = Span::new(lo + 1, hi - 1);
            if let Some(value) = span.slice(code) {
                sources.push(ModuleSource {
                    statement,
                    value: value.to_string(),
                    span,
                });
            }
        }

        Ok(sources)
    })
}
