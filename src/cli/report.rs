//! Report formatting and printing utilities.
//!
//! Kept apart from the commands so the core can be used as a library
//! without any terminal output.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Totals of an `extract` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub documents: usize,
    pub strings: usize,
    pub failed: usize,
}

pub fn print_written(source: &Path, payload: &Path, strings: usize) {
    println!(
        "{} {} -> {} ({} string{})",
        SUCCESS_MARK.green(),
        source.display(),
        payload.display(),
        strings,
        plural(strings)
    );
}

pub fn print_failure(path: &Path, err: &anyhow::Error) {
    eprintln!("{} {}: {:#}", FAILURE_MARK.red(), path.display().to_string().bold(), err);
}

pub fn print_extract_summary(summary: &ExtractSummary) {
    print_extract_summary_to(summary, &mut io::stderr().lock());
}

pub fn print_extract_summary_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    let extracted = summary.documents - summary.failed;
    let line = format!(
        "Extracted {} string{} from {} document{}",
        summary.strings,
        plural(summary.strings),
        extracted,
        plural(extracted)
    );

    if summary.failed == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), line.green());
    } else {
        let _ = writeln!(
            writer,
            "{} {}, {} document{} failed",
            FAILURE_MARK.red(),
            line,
            summary.failed,
            plural(summary.failed)
        );
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
