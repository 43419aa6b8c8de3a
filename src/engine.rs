use crate::error::RepoConcatError;
use crate::options::{ConcatOptions, LineCounting};
use crate::policy::{ExclusionPolicy, IgnoreRules, build_glob_set};
use crate::render::render_blocks;
use crate::stats::Statistics;
use crate::tree::render_structure;
use crate::types::{RelevantFile, RepoSnapshot, SourceFile};
use crate::walker::Walker;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Display name of the scan root: its final component after resolution.
pub fn root_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}

/// Builds the exclusion policy for a run, loading the root's ignore file.
pub fn build_policy(options: &ConcatOptions) -> Result<ExclusionPolicy, RepoConcatError> {
    let rules = IgnoreRules::load(&options.root, &options.ignore_file, options.pattern_syntax);
    if rules.is_none() {
        tracing::info!(
            "No {} file found. Proceeding without ignoring any files.",
            options.ignore_file
        );
    }
    let output_name = options
        .output_name
        .clone()
        .unwrap_or_else(|| format!("{}.txt", root_name(&options.root)));
    let mut policy = ExclusionPolicy::new(rules)
        .exclude_name(output_name)
        .exclude_name(options.ignore_file.clone())
        .extra_patterns(build_glob_set(&options.exclude_patterns)?)
        .include_empty(options.include_empty);
    if let Some(tool) = &options.tool_name {
        policy = policy.exclude_name(tool.clone());
    }
    Ok(policy)
}

fn load_file(file: RelevantFile, counting: LineCounting) -> Option<SourceFile> {
    match fs::read(&file.path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes).into_owned();
            Some(SourceFile::new(file, content, counting))
        }
        Err(e) => {
            tracing::warn!("Error while reading {}: {}", file.path.display(), e);
            None
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn load_files(paths: Vec<RelevantFile>, counting: LineCounting) -> Vec<SourceFile> {
    paths
        .into_iter()
        .filter_map(|file| load_file(file, counting))
        .collect()
}

#[cfg(feature = "parallel")]
fn load_files(paths: Vec<RelevantFile>, counting: LineCounting) -> Vec<SourceFile> {
    paths
        .into_par_iter()
        .filter_map(|file| load_file(file, counting))
        .collect()
}

/// Scans `options.root` and produces every artifact from one relevant-file list.
///
/// Unreadable files are dropped before numbering, so the file index, the
/// statistics and the rendered blocks always describe the same list.
pub fn scan(options: ConcatOptions) -> Result<RepoSnapshot, RepoConcatError> {
    tracing::debug!("Starting scan with root: {}", options.root.display());
    let metadata =
        fs::metadata(&options.root).map_err(|e| RepoConcatError::io(&options.root, e))?;
    if !metadata.is_dir() {
        return Err(RepoConcatError::InvalidPath(format!(
            "{} is not a directory",
            options.root.display()
        )));
    }
    let policy = Arc::new(build_policy(&options)?);
    let outcome = Walker::new(&options.root, Arc::clone(&policy))
        .follow_links(options.follow_links)
        .binary_detection(options.binary_detection)
        .walk()?;
    tracing::info!("Found {} relevant files", outcome.files.len());

    let files = load_files(outcome.files, options.line_counting);
    let root_name = root_name(&options.root);
    let structure = render_structure(&root_name, &outcome.structure);
    let statistics = Statistics::collect(&files);
    let blocks = render_blocks(&files, &policy, options.truncate_threshold);
    let index = files
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f.relative))
        .collect();

    Ok(RepoSnapshot {
        root_name,
        files: files.into_iter().map(|f| f.relative).collect(),
        structure,
        index,
        statistics,
        blocks,
    })
}
