//! Output formatting for scan results.
//!
//! Assembles a [`RepoSnapshot`] into the concatenated text document or JSON,
//! and writes it to disk.

use crate::render::join_blocks;
use crate::stats::{Statistics, extension_label};
use crate::{RepoConcatError, RepoSnapshot};
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Formats the snapshot into a string.
pub fn format_report(
    snapshot: &RepoSnapshot,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, RepoConcatError> {
    match format {
        OutputFormat::Text => Ok(format_text(snapshot)),
        OutputFormat::Json => format_json(snapshot, pretty),
    }
}

/// Writes the formatted snapshot to a file.
pub fn write_report(
    snapshot: &RepoSnapshot,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), RepoConcatError> {
    let content = format_report(snapshot, format, pretty)?;
    fs::write(&path, content).map_err(|e| RepoConcatError::io(path.as_ref(), e))?;
    Ok(())
}

/// The numbered "Code Statistics" section.
pub fn format_statistics(stats: &Statistics) -> String {
    let mut lines = vec![
        "Code Statistics:".to_string(),
        format!("1. Total number of files: {}", stats.total_files),
        format!("2. Total lines of code: {}", stats.total_lines),
        "3. Lines of code per file type:".to_string(),
    ];
    for (ext, count) in &stats.lines_per_type {
        lines.push(format!("   - {}: {}", extension_label(ext), count));
    }
    lines.push("4. Number of files per file type:".to_string());
    for (ext, count) in &stats.files_per_type {
        lines.push(format!("   - {}: {}", extension_label(ext), count));
    }
    lines.push(format!(
        "5. Average file size: {:.2} bytes",
        stats.average_file_size
    ));
    lines.push("6. Largest file:".to_string());
    lines.push(format!("   - Name: {}", stats.largest_file.name));
    lines.push(format!("   - Size: {} bytes", stats.largest_file.size));
    lines.push(format!("   - Lines: {}", stats.largest_file.lines));
    lines.join("\n")
}

// ----------------------- Internal formatting -----------------------

fn format_text(snapshot: &RepoSnapshot) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format_statistics(&snapshot.statistics));
    out.push_str("\n\nFolder Structure:\n");
    out.push_str(&snapshot.structure.join("\n"));
    out.push_str("\n\nFile Index:\n");
    out.push_str(&snapshot.index.join("\n"));
    out.push_str("\n\n");
    out.push_str(&join_blocks(&snapshot.blocks));
    out
}

fn format_json(snapshot: &RepoSnapshot, pretty: bool) -> Result<String, RepoConcatError> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    Ok(json)
}
