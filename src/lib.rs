//! # Repoconcat
//!
//! `repoconcat` walks a repository, decides which entries are relevant under an
//! ignore file plus static deny-lists, and produces three artifacts from the
//! same relevant-file list: a folder-structure rendering, code statistics, and
//! a numbered concatenation of every file's content.
//!
//! Large structured files (JSON, CSV, YAML, ...) are truncated to a fixed line
//! budget in the concatenation. File contents are loaded in parallel with the
//! `parallel` feature.
//!
//! # Features
//!
//! - `parallel`: Loads file contents in parallel using Rayon.
//!
//! # Example
//!
//! ```no_run
//! use repoconcat::{ConcatBuilder, output, scan};
//!
//! let options = ConcatBuilder::new(".")
//!     .truncate_threshold(300)
//!     .build();
//!
//! let snapshot = scan(options).expect("Failed to scan directory");
//!
//! println!("{}", snapshot.structure.join("\n"));
//! println!("{}", output::format_statistics(&snapshot.statistics));
//! ```

mod engine;
mod error;
mod options;
pub mod output;
pub mod pattern;
pub mod policy;
pub mod render;
pub mod stats;
mod tree;
mod types;
pub mod walker;

pub use engine::{build_policy, root_name, scan};
pub use error::RepoConcatError;
pub use options::{
    BinaryDetection, ConcatBuilder, ConcatOptions, DEFAULT_IGNORE_FILE,
    DEFAULT_TRUNCATE_THRESHOLD, LineCounting, PatternSyntax,
};
pub use pattern::{IgnorePattern, IgnorePredicate};
pub use policy::{EntryKind, ExclusionPolicy, IgnoreRules};
pub use stats::{LargestFile, Statistics};
pub use types::{RelevantFile, RenderedBlock, RepoSnapshot, SourceFile, StructureNode};
