//! Internal module for building and rendering the structure tree.

use crate::types::StructureNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Builds the structure tree from walk output.
///
/// `entries` holds `/`-separated root-relative paths with a directory flag,
/// in walk (pre-order) order, so a parent always precedes its children.
/// Siblings are sorted by name at every level.
pub(crate) fn build_tree_from_entries(entries: &[(String, bool)]) -> Vec<StructureNode> {
    let mut nodes = Vec::new();
    for (relative, is_dir) in entries {
        let components: Vec<&str> = relative.split('/').collect();
        insert(&mut nodes, &components, *is_dir);
    }
    sort_nodes(&mut nodes);
    nodes
}

fn insert(nodes: &mut Vec<StructureNode>, components: &[&str], is_dir: bool) {
    let Some((name, rest)) = components.split_first() else {
        return;
    };
    if rest.is_empty() {
        nodes.push(StructureNode {
            name: name.to_string(),
            is_dir,
            children: Vec::new(),
        });
    } else if let Some(parent) = nodes.iter_mut().find(|n| n.is_dir && n.name == *name) {
        insert(&mut parent.children, rest, is_dir);
    }
}

fn sort_nodes(nodes: &mut [StructureNode]) {
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    for node in nodes {
        sort_nodes(&mut node.children);
    }
}

/// Renders the structure tree as lines similar to the `tree` command.
///
/// The first line is `<root_name>/`; directories carry a trailing `/`.
pub(crate) fn render_structure(root_name: &str, nodes: &[StructureNode]) -> Vec<String> {
    let mut lines = vec![format!("{}/", root_name)];
    push_lines(nodes, "", &mut lines);
    lines
}

fn push_lines(nodes: &[StructureNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let branch = if is_last { LAST_BRANCH } else { BRANCH };
        let suffix = if node.is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, branch, node.name, suffix));
        if node.is_dir {
            let continuation = if is_last { SPACE } else { PIPE };
            push_lines(&node.children, &format!("{}{}", prefix, continuation), lines);
        }
    }
}
