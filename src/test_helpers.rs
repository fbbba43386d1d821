//! Shared test utilities for the simple-docs test suite.
//!
//! Provides fixture setup, lookup helpers that panic with the available
//! choices on a miss, and a tree shape assertion for the sidebar hierarchy.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let guides = find_node(&manifest.tree, "guides");
//! assert!(guides.has_index);
//!
//! assert_tree_shape(&manifest.tree, &[
//!     ("User Guides", &["Installation", "Setup"]),
//!     ("Faq", &[]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::ContentNode;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Tree lookups: panic with a clear message on miss
// =========================================================================

/// Find a node anywhere in the tree by slug. Panics if not found.
pub fn find_node<'a>(tree: &'a [ContentNode], slug: &str) -> &'a ContentNode {
    crate::hierarchy::find_node(tree, slug).unwrap_or_else(|| {
        let slugs = all_slugs(tree);
        panic!("node '{slug}' not found. Available: {slugs:?}")
    })
}

/// Every slug in the tree, depth-first.
pub fn all_slugs(tree: &[ContentNode]) -> Vec<&str> {
    fn walk<'a>(nodes: &'a [ContentNode], out: &mut Vec<&'a str>) {
        for node in nodes {
            out.push(&node.slug);
            walk(&node.children, out);
        }
    }
    let mut out = Vec::new();
    walk(tree, &mut out);
    out
}

// =========================================================================
// Shape helpers
// =========================================================================

/// Top-level titles in order.
pub fn tree_titles(tree: &[ContentNode]) -> Vec<&str> {
    tree.iter().map(|n| n.title.as_str()).collect()
}

/// Child titles under a top-level node. Panics if the parent is not found.
pub fn child_titles<'a>(tree: &'a [ContentNode], parent_title: &str) -> Vec<&'a str> {
    tree.iter()
        .find(|n| n.title == parent_title)
        .map(|n| tree_titles(&n.children))
        .unwrap_or_else(|| {
            let titles = tree_titles(tree);
            panic!("node '{parent_title}' not found. Available: {titles:?}")
        })
}

/// Assert that the top two levels of the tree match an expected shape.
///
/// Each entry is `(title, children)`. Use `&[]` for leaves.
pub fn assert_tree_shape(tree: &[ContentNode], expected: &[(&str, &[&str])]) {
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(tree_titles(tree), expected_titles, "top-level titles mismatch");

    for (title, children) in expected {
        assert_eq!(
            child_titles(tree, title),
            children.to_vec(),
            "children of '{title}' mismatch"
        );
    }
}
