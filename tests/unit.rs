use repoconcat::render::{join_blocks, render_block, render_blocks, sequence_label};
use repoconcat::stats::{extension_key, extension_label};
use repoconcat::{
    EntryKind, ExclusionPolicy, IgnorePattern, IgnorePredicate, IgnoreRules, LineCounting,
    SourceFile, Statistics,
};
use std::path::{Path, PathBuf};

fn source(relative: &str, size: u64, content: &str) -> SourceFile {
    SourceFile {
        path: PathBuf::from(relative),
        relative: relative.to_string(),
        size,
        content: content.to_string(),
        lines: LineCounting::Segments.count(content),
    }
}

fn numbered_lines(count: usize) -> String {
    (1..=count)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_star_pattern() {
    let pattern = IgnorePattern::new("*.json");
    assert!(pattern.is_match("data.json"));
    assert!(pattern.is_match("a/b/c.json"));
    assert!(!pattern.is_match("data.json.bak"));
}

#[test]
fn test_question_mark_pattern() {
    let pattern = IgnorePattern::new("file?.txt");
    assert!(pattern.is_match("file1.txt"));
    assert!(!pattern.is_match("file10.txt"));
    assert!(!pattern.is_match("file.txt"));
}

#[test]
fn test_special_characters_are_literal() {
    let pattern = IgnorePattern::new("build[1]+.log");
    assert!(pattern.is_match("build[1]+.log"));
    assert!(!pattern.is_match("build1.log"));
    assert!(!IgnorePattern::new("a.b").is_match("axb"));
}

#[test]
fn test_pattern_is_anchored() {
    let pattern = IgnorePattern::new("dist");
    assert!(pattern.is_match("dist"));
    assert!(!pattern.is_match("distribution"));
    assert!(!pattern.is_match("my-dist"));
}

#[test]
fn test_name_fallback_and_anchoring() {
    let predicate = IgnorePredicate::parse("node_modules\n/target/\nsrc/*.tmp\n");
    assert!(predicate.is_match(Path::new("node_modules")));
    assert!(predicate.is_match(Path::new("web/node_modules")));
    assert!(predicate.is_match(Path::new("target")));
    assert!(!predicate.is_match(Path::new("crates/target")));
    assert!(predicate.is_match(Path::new("src/x.tmp")));
    assert!(!predicate.is_match(Path::new("other/x.tmp")));
}

#[test]
fn test_parse_skips_blank_and_comment_lines() {
    let predicate = IgnorePredicate::parse("# comment\n\n   \n*.log\n  # indented\n");
    assert_eq!(predicate.patterns().len(), 1);
    assert_eq!(predicate.patterns()[0].as_str(), "*.log");
}

#[test]
fn test_relevance_is_monotonic() {
    let paths = ["a.rs", "b.log", "docs/readme.md", "docs/x.log", "file1.txt"];
    let mut predicate = IgnorePredicate::parse("");
    let mut previous = paths.len();
    for line in ["*.log", "docs/*", "file?.txt"] {
        predicate.add(IgnorePattern::new(line));
        let policy = ExclusionPolicy::new(Some(IgnoreRules::Patterns(predicate.clone())));
        let relevant = paths
            .iter()
            .filter(|p| policy.is_relevant(Path::new(p), EntryKind::File, 10))
            .count();
        assert!(relevant <= previous);
        previous = relevant;
    }
    assert_eq!(previous, 1);
}

#[test]
fn test_policy_static_rules() {
    let policy = ExclusionPolicy::new(None)
        .exclude_name("repo.txt")
        .exclude_name(".gitignore");
    assert!(policy.is_relevant(Path::new("src/main.rs"), EntryKind::File, 10));
    assert!(!policy.is_relevant(Path::new("repo.txt"), EntryKind::File, 10));
    assert!(!policy.is_relevant(Path::new(".gitignore"), EntryKind::File, 10));
    assert!(!policy.is_relevant(Path::new("sub/.DS_Store"), EntryKind::File, 10));
    assert!(!policy.is_relevant(Path::new("logo.PNG"), EntryKind::File, 10));
    assert!(!policy.is_relevant(Path::new("empty.rs"), EntryKind::File, 0));
    assert!(!policy.is_relevant(Path::new(".git"), EntryKind::Directory, 0));
    assert!(policy.is_relevant(Path::new("assets.png"), EntryKind::Directory, 0));
}

#[test]
fn test_policy_include_empty() {
    let policy = ExclusionPolicy::new(None).include_empty(true);
    assert!(policy.is_relevant(Path::new("empty.rs"), EntryKind::File, 0));
}

#[test]
fn test_truncate_eligibility() {
    let policy = ExclusionPolicy::new(None);
    assert!(policy.is_truncate_eligible(Path::new("data/big.JSON")));
    assert!(policy.is_truncate_eligible(Path::new("table.csv")));
    assert!(!policy.is_truncate_eligible(Path::new("main.rs")));
}

#[test]
fn test_statistics_example() {
    let mut files = vec![source("a.ts", 100, ""), source("b.json", 50, "")];
    files[0].lines = 10;
    files[1].lines = 5;
    let stats = Statistics::collect(&files);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_lines, 15);
    assert_eq!(stats.lines_per_type[".ts"], 10);
    assert_eq!(stats.lines_per_type[".json"], 5);
    assert_eq!(stats.files_per_type[".ts"], 1);
    assert_eq!(stats.average_file_size, 75.0);
    assert_eq!(stats.largest_file.name, "a.ts");
    assert_eq!(stats.largest_file.size, 100);
    assert_eq!(stats.largest_file.lines, 10);
}

#[test]
fn test_statistics_empty() {
    let stats = Statistics::collect(&[]);
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.average_file_size, 0.0);
    assert_eq!(stats.largest_file.name, "");
}

#[test]
fn test_largest_file_first_wins_on_tie() {
    let files = vec![
        source("src/first.rs", 40, "a"),
        source("src/second.rs", 40, "b"),
    ];
    let stats = Statistics::collect(&files);
    assert_eq!(stats.largest_file.name, "first.rs");
}

#[test]
fn test_extension_keys() {
    assert_eq!(extension_key(Path::new("a/b.rs")), ".rs");
    assert_eq!(extension_key(Path::new("Makefile")), "");
    assert_eq!(extension_key(Path::new(".bashrc")), "");
    assert_eq!(extension_key(Path::new("x.tar.gz")), ".gz");
    assert_eq!(extension_label(""), "No extension");
    assert_eq!(extension_label(".rs"), ".rs");
}

#[test]
fn test_line_counting_modes() {
    assert_eq!(LineCounting::Segments.count("a\nb\n"), 3);
    assert_eq!(LineCounting::Lines.count("a\nb\n"), 2);
    assert_eq!(LineCounting::Segments.count("a\nb"), 2);
}

#[test]
fn test_truncates_large_json() {
    let file = source("data.json", 4000, &numbered_lines(500));
    let block = render_block(1, &file, true, 300);
    assert!(block.truncated);
    assert!(block.text.contains("line 300\n"));
    assert!(!block.text.contains("line 301"));
    assert!(
        block
            .text
            .contains("truncated to 300 lines, total file length: 500 lines")
    );
}

#[test]
fn test_small_json_rendered_in_full() {
    let content = numbered_lines(250);
    let file = source("data.json", 2000, &content);
    let block = render_block(1, &file, true, 300);
    assert!(!block.truncated);
    assert!(block.text.contains(&content));
    assert!(!block.text.contains("truncated"));
}

#[test]
fn test_ineligible_file_never_truncated() {
    let file = source("big.rs", 4000, &numbered_lines(500));
    let block = render_block(1, &file, false, 300);
    assert!(!block.truncated);
    assert!(block.text.contains("line 500"));
}

#[test]
fn test_block_framing() {
    let file = source("src/main.rs", 12, "fn main() {}");
    let block = render_block(7, &file, false, 300);
    let sep = "=".repeat(80);
    let expected = format!(
        "\n{sep}\nFILE_0007: src/main.rs\n{sep}\n\nfn main() {{}}\n{sep}\nEND OF FILE_0007: src/main.rs\n{sep}\n\n"
    );
    assert_eq!(block.text, expected);
    assert_eq!(sequence_label(42), "FILE_0042");
}

#[test]
fn test_blocks_follow_list_order() {
    let files = vec![source("b.rs", 1, "b"), source("a.json", 1, "a")];
    let blocks = render_blocks(&files, &ExclusionPolicy::new(None), 300);
    assert_eq!(blocks[0].index, 1);
    assert_eq!(blocks[0].path, "b.rs");
    assert_eq!(blocks[1].index, 2);
    assert_eq!(blocks[1].path, "a.json");
    let joined = join_blocks(&blocks);
    let first = joined.find("FILE_0001: b.rs").unwrap();
    let second = joined.find("FILE_0002: a.json").unwrap();
    assert!(first < second);
}
