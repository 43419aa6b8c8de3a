//! Compiles ignore-file lines into path predicates.
//!
//! The dialect is deliberately small: `*` matches any run of characters
//! (including `/` and the empty run), `?` matches exactly one character, and
//! everything else matches itself. Each pattern is anchored to the whole
//! candidate string.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
}

/// A single compiled line of an ignore file.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    tokens: Vec<Token>,
    /// Patterns without a `/` also match the bare entry name.
    match_name: bool,
}

impl IgnorePattern {
    pub fn new(line: &str) -> Self {
        let raw = line.to_string();
        let mut body = line.trim_end_matches('/');
        let anchored = body.starts_with('/');
        if anchored {
            body = body.trim_start_matches('/');
        }
        let match_name = !anchored && !body.contains('/');
        Self {
            raw,
            tokens: compile(body),
            match_name,
        }
    }

    /// The pattern text as it appeared in the ignore file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Full-string match against `candidate`.
    pub fn is_match(&self, candidate: &str) -> bool {
        let chars: Vec<char> = candidate.chars().collect();
        matches(&self.tokens, &chars)
    }

    /// Matches a root-relative path, falling back to its file name for
    /// patterns that contain no separator.
    pub fn matches_path(&self, relative: &str) -> bool {
        if self.is_match(relative) {
            return true;
        }
        self.match_name
            && relative
                .rsplit('/')
                .next()
                .is_some_and(|name| name != relative && self.is_match(name))
    }
}

fn compile(body: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(body.len());
    for ch in body.chars() {
        let token = match ch {
            '*' => Token::AnyRun,
            '?' => Token::AnyChar,
            other => Token::Literal(other),
        };
        if token == Token::AnyRun && tokens.last() == Some(&Token::AnyRun) {
            continue;
        }
        tokens.push(token);
    }
    tokens
}

// Greedy scan that backtracks to the most recent `*`.
fn matches(tokens: &[Token], text: &[char]) -> bool {
    let (mut t, mut c) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while c < text.len() {
        match tokens.get(t) {
            Some(Token::AnyRun) => {
                star = Some((t, c));
                t += 1;
            }
            Some(Token::AnyChar) => {
                t += 1;
                c += 1;
            }
            Some(Token::Literal(ch)) if *ch == text[c] => {
                t += 1;
                c += 1;
            }
            _ => match star {
                Some((star_t, star_c)) => {
                    t = star_t + 1;
                    c = star_c + 1;
                    star = Some((star_t, star_c + 1));
                }
                None => return false,
            },
        }
    }
    tokens[t..].iter().all(|token| *token == Token::AnyRun)
}

/// Any-match predicate over every pattern of an ignore file.
#[derive(Debug, Clone, Default)]
pub struct IgnorePredicate {
    patterns: Vec<IgnorePattern>,
}

impl IgnorePredicate {
    /// Parses ignore-file text, skipping blank lines and `#` comments.
    pub fn parse(content: &str) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(IgnorePattern::new)
            .collect();
        Self { patterns }
    }

    /// Reads and parses an ignore file.
    ///
    /// Returns `None` when the file does not exist or cannot be read; an
    /// unreadable file is logged and treated as "no filtering".
    pub fn from_file(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Some(Self::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read ignore file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn add(&mut self, pattern: IgnorePattern) {
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[IgnorePattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pattern matches the root-relative path.
    pub fn is_match(&self, relative: &Path) -> bool {
        let candidate = slash_path(relative);
        self.patterns.iter().any(|p| p.matches_path(&candidate))
    }
}

/// Renders a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
