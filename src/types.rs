use crate::options::LineCounting;
use crate::stats::Statistics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file that passed the exclusion policy during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantFile {
    /// The full path to the file.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
    /// Size in bytes as reported by the filesystem.
    pub size: u64,
}

/// A relevant file whose text has been loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: String,
    pub size: u64,
    /// The decoded content; invalid UTF-8 is replaced lossily.
    pub content: String,
    pub lines: usize,
}

impl SourceFile {
    pub fn new(file: RelevantFile, content: String, counting: LineCounting) -> Self {
        let lines = counting.count(&content);
        Self {
            path: file.path,
            relative: file.relative,
            size: file.size,
            content,
            lines,
        }
    }
}

/// One entry of the structure tree. Children are sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureNode {
    pub name: String,
    pub is_dir: bool,
    pub children: Vec<StructureNode>,
}

/// A framed, numbered rendering of one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedBlock {
    /// 1-based position in the relevant-file list.
    pub index: usize,
    pub path: String,
    pub truncated: bool,
    pub text: String,
}

/// The complete result of a scan.
#[derive(Debug, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// Display name of the scan root.
    pub root_name: String,
    /// Relevant files, relative to the root, in walk order.
    pub files: Vec<String>,
    /// Rendered structure-tree lines, starting with `<root_name>/`.
    pub structure: Vec<String>,
    /// `"<n>. <path>"` lines, one per relevant file.
    pub index: Vec<String>,
    pub statistics: Statistics,
    pub blocks: Vec<RenderedBlock>,
}
