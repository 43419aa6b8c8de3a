//! Per-file and per-extension statistics over the relevant-file list.

use crate::types::SourceFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Display label for files whose extension key is empty.
pub const NO_EXTENSION_LABEL: &str = "No extension";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestFile {
    /// File name without its directory.
    pub name: String,
    pub size: u64,
    pub lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_bytes: u64,
    /// Keyed by extension including the leading dot; `""` for none.
    pub lines_per_type: BTreeMap<String, usize>,
    pub files_per_type: BTreeMap<String, usize>,
    pub average_file_size: f64,
    pub largest_file: LargestFile,
}

impl Statistics {
    pub fn collect(files: &[SourceFile]) -> Self {
        let mut stats = Statistics {
            total_files: files.len(),
            ..Default::default()
        };
        for file in files {
            let key = extension_key(Path::new(&file.relative));
            stats.total_lines += file.lines;
            stats.total_bytes += file.size;
            *stats.lines_per_type.entry(key.clone()).or_default() += file.lines;
            *stats.files_per_type.entry(key).or_default() += 1;
            // First file wins on ties.
            if file.size > stats.largest_file.size {
                stats.largest_file = LargestFile {
                    name: file_name(&file.relative),
                    size: file.size,
                    lines: file.lines,
                };
            }
        }
        if stats.total_files > 0 {
            stats.average_file_size = stats.total_bytes as f64 / stats.total_files as f64;
        }
        stats
    }
}

/// The extension with its leading dot, or `""` when there is none.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub fn extension_label(key: &str) -> &str {
    if key.is_empty() { NO_EXTENSION_LABEL } else { key }
}

fn file_name(relative: &str) -> String {
    relative.rsplit('/').next().unwrap_or(relative).to_string()
}
