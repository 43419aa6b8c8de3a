//! Framed, numbered text blocks for each relevant file.

use crate::policy::ExclusionPolicy;
use crate::types::{RenderedBlock, SourceFile};
use std::path::Path;

pub const SEPARATOR_WIDTH: usize = 80;

/// `FILE_` followed by the zero-padded 1-based index.
pub fn sequence_label(index: usize) -> String {
    format!("FILE_{:04}", index)
}

/// Renders one file. Truncation only applies when `eligible` and the file
/// has more than `threshold` lines.
pub fn render_block(
    index: usize,
    file: &SourceFile,
    eligible: bool,
    threshold: usize,
) -> RenderedBlock {
    let truncated = eligible && file.lines > threshold;
    let body = if truncated {
        let head: Vec<&str> = file.content.split('\n').take(threshold).collect();
        format!(
            "{}\n... [truncated to {} lines, total file length: {} lines]",
            head.join("\n"),
            threshold,
            file.lines
        )
    } else {
        file.content.clone()
    };
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let label = sequence_label(index);
    let text = format!(
        "\n{sep}\n{label}: {path}\n{sep}\n\n{body}\n{sep}\nEND OF {label}: {path}\n{sep}\n\n",
        sep = separator,
        label = label,
        path = file.relative,
        body = body,
    );
    RenderedBlock {
        index,
        path: file.relative.clone(),
        truncated,
        text,
    }
}

/// Renders every file in list order, numbering from 1.
pub fn render_blocks(
    files: &[SourceFile],
    policy: &ExclusionPolicy,
    threshold: usize,
) -> Vec<RenderedBlock> {
    files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let eligible = policy.is_truncate_eligible(Path::new(&file.relative));
            let block = render_block(i + 1, file, eligible, threshold);
            if block.truncated {
                tracing::debug!("Truncated {} ({} lines)", file.relative, file.lines);
            }
            block
        })
        .collect()
}

pub fn join_blocks(blocks: &[RenderedBlock]) -> String {
    blocks.iter().map(|b| b.text.as_str()).collect()
}
