use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default line budget for truncate-eligible files.
pub const DEFAULT_TRUNCATE_THRESHOLD: usize = 300;
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}

/// Dialect used to read the ignore file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternSyntax {
    /// Literal characters plus `*` and `?`.
    Simple,
    /// Full gitignore semantics (negation, directory-only, anchoring).
    Gitignore,
}

/// How a file's lines are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCounting {
    /// Number of `\n`-delimited segments; a trailing newline adds an empty segment.
    Segments,
    /// Number of lines as reported by [`str::lines`].
    Lines,
}

impl LineCounting {
    pub fn count(self, content: &str) -> usize {
        match self {
            LineCounting::Segments => content.split('\n').count(),
            LineCounting::Lines => content.lines().count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatOptions {
    pub root: PathBuf,
    pub ignore_file: String,
    pub pattern_syntax: PatternSyntax,
    pub exclude_patterns: Vec<String>,
    /// Name of the produced document; defaults to `<root name>.txt`.
    pub output_name: Option<String>,
    /// Name of the running executable, always excluded.
    pub tool_name: Option<String>,
    pub include_empty: bool,
    pub follow_links: bool,
    pub binary_detection: BinaryDetection,
    pub truncate_threshold: usize,
    pub line_counting: LineCounting,
}
impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            pattern_syntax: PatternSyntax::Simple,
            exclude_patterns: Vec::new(),
            output_name: None,
            tool_name: None,
            include_empty: false,
            follow_links: false,
            binary_detection: BinaryDetection::None,
            truncate_threshold: DEFAULT_TRUNCATE_THRESHOLD,
            line_counting: LineCounting::Segments,
        }
    }
}
#[derive(Debug, Default)]
pub struct ConcatBuilder {
    options: ConcatOptions,
}
impl ConcatBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ConcatOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.options.ignore_file = name.into();
        self
    }
    pub fn pattern_syntax(mut self, syntax: PatternSyntax) -> Self {
        self.options.pattern_syntax = syntax;
        self
    }
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_patterns = patterns;
        self
    }
    pub fn output_name(mut self, name: Option<String>) -> Self {
        self.options.output_name = name;
        self
    }
    pub fn tool_name(mut self, name: Option<String>) -> Self {
        self.options.tool_name = name;
        self
    }
    pub fn include_empty(mut self, yes: bool) -> Self {
        self.options.include_empty = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn truncate_threshold(mut self, lines: usize) -> Self {
        self.options.truncate_threshold = lines;
        self
    }
    pub fn line_counting(mut self, counting: LineCounting) -> Self {
        self.options.line_counting = counting;
        self
    }
    pub fn build(self) -> ConcatOptions {
        self.options
    }
}
