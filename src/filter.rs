//! Sidebar filtering by title.
//!
//! Keeps the nodes whose title contains the query (case-insensitive) together
//! with the directories leading to them. A directory that matches on its own
//! title but has no matching descendants is kept bare, with no children,
//! rather than expanded with everything it holds. Order is never changed.
//!
//! The generated site runs the same rules in `static/docs.js` against the
//! rendered sidebar; this module is the reference used by the CLI and tests.

use crate::types::ContentNode;

/// Filter a tree by a free-text query matched against node titles.
///
/// An empty query returns the tree unchanged.
pub fn filter_nodes(tree: &[ContentNode], query: &str) -> Vec<ContentNode> {
    if query.is_empty() {
        return tree.to_vec();
    }
    let needle = query.to_lowercase();
    filter_level(tree, &needle)
}

fn filter_level(nodes: &[ContentNode], needle: &str) -> Vec<ContentNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let title_matches = node.title.to_lowercase().contains(needle);
            if !node.is_directory {
                return title_matches.then(|| node.clone());
            }

            let children = filter_level(&node.children, needle);
            (title_matches || !children.is_empty()).then(|| ContentNode {
                slug: node.slug.clone(),
                title: node.title.clone(),
                is_directory: true,
                has_index: node.has_index,
                children,
            })
        })
        .collect()
}

/// Number of nodes in a tree, directories included.
pub fn count_nodes(tree: &[ContentNode]) -> usize {
    tree.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}
