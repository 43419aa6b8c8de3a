//! Depth-first traversal producing the relevant-file list and the structure tree.
//!
//! Both outputs come from one walk, so they always agree on which entries were
//! kept. The walk is unsorted: within a directory, entries arrive in the order
//! the filesystem returns them and each directory is descended into as soon as
//! it is yielded. Only the structure nodes are sorted.

use crate::error::RepoConcatError;
use crate::options::BinaryDetection;
use crate::pattern::slash_path;
use crate::policy::{EntryKind, ExclusionPolicy};
use crate::tree::build_tree_from_entries;
use crate::types::{RelevantFile, StructureNode};
use ignore::{DirEntry, WalkBuilder};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SNIFF_LEN: u64 = 4096;

#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<RelevantFile>,
    /// Surviving top-level entries of the root, sorted by name.
    pub structure: Vec<StructureNode>,
}

pub struct Walker {
    root: PathBuf,
    policy: Arc<ExclusionPolicy>,
    follow_links: bool,
    binary_detection: BinaryDetection,
}

impl Walker {
    pub fn new(root: impl Into<PathBuf>, policy: Arc<ExclusionPolicy>) -> Self {
        Self {
            root: root.into(),
            policy,
            follow_links: false,
            binary_detection: BinaryDetection::None,
        }
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.binary_detection = method;
        self
    }

    /// Walks the root. Failing to enumerate the root itself is fatal; any
    /// failure below it is logged and the entry skipped.
    pub fn walk(self) -> Result<WalkOutcome, RepoConcatError> {
        fs::read_dir(&self.root).map_err(|e| RepoConcatError::io(&self.root, e))?;

        let mut builder = WalkBuilder::new(&self.root);
        // Relevance is decided by the exclusion policy alone.
        builder
            .standard_filters(false)
            .parents(false)
            .follow_links(self.follow_links);
        let filter = EntryFilter {
            root: self.root.clone(),
            policy: Arc::clone(&self.policy),
            binary_detection: self.binary_detection,
        };
        builder.filter_entry(move |entry| filter.keep(entry));

        let mut files = Vec::new();
        let mut entries = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let relative = slash_path(relative_to(&self.root, entry.path()));
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if !is_dir {
                let size = entry.metadata().map(|m| m.len()).unwrap_or_default();
                files.push(RelevantFile {
                    path: entry.into_path(),
                    relative: relative.clone(),
                    size,
                });
            }
            entries.push((relative, is_dir));
        }
        let structure = build_tree_from_entries(&entries);
        Ok(WalkOutcome { files, structure })
    }
}

/// Per-entry decision run by the walk before an entry is yielded; a rejected
/// directory is not descended into.
struct EntryFilter {
    root: PathBuf,
    policy: Arc<ExclusionPolicy>,
    binary_detection: BinaryDetection,
}

impl EntryFilter {
    fn keep(&self, entry: &DirEntry) -> bool {
        let Some((kind, size)) = classify(entry) else {
            return false;
        };
        let relative = relative_to(&self.root, entry.path());
        if !self.policy.is_relevant(relative, kind, size) {
            tracing::debug!("Excluded {}", relative.display());
            return false;
        }
        if kind == EntryKind::Directory {
            return true;
        }
        match sniff_binary(entry.path(), self.binary_detection) {
            Ok(false) => true,
            Ok(true) => {
                tracing::debug!("Binary file detected: {}", entry.path().display());
                false
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", entry.path().display(), e);
                false
            }
        }
    }
}

/// Resolves the entry kind and size. Symlinks only reach this point unresolved
/// when links are not followed, and are then skipped, as are sockets, FIFOs
/// and devices.
fn classify(entry: &DirEntry) -> Option<(EntryKind, u64)> {
    let file_type = entry.file_type()?;
    if file_type.is_symlink() {
        tracing::debug!("Skipping symlink {}", entry.path().display());
        return None;
    }
    if file_type.is_dir() {
        return Some((EntryKind::Directory, 0));
    }
    if !file_type.is_file() {
        tracing::debug!("Skipping special file {}", entry.path().display());
        return None;
    }
    match entry.metadata() {
        Ok(metadata) => Some((EntryKind::File, metadata.len())),
        Err(e) => {
            tracing::warn!("Failed to stat {}: {}", entry.path().display(), e);
            None
        }
    }
}

fn relative_to<'p>(root: &Path, path: &'p Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn sniff_binary(path: &Path, method: BinaryDetection) -> io::Result<bool> {
    if method == BinaryDetection::None {
        return Ok(false);
    }
    let mut chunk = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut chunk)?;
    Ok(match method {
        BinaryDetection::Simple => chunk.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&chunk).is_binary(),
        BinaryDetection::None => false,
    })
}
