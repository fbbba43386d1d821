//! Sidebar tree construction.
//!
//! Turns the flat list of markdown paths from the scanner into the nested,
//! ordered tree every page's sidebar is rendered from.
//!
//! ## Construction
//!
//! Paths are inserted segment by segment into a name-keyed builder tree, then
//! flattened into ordered [`ContentNode`] vectors:
//!
//! ```text
//! faq.md                    Guides/            (directory, has_index)
//! guides/index.md     →       Setup            (guides/setup)
//! guides/setup.md           Faq                (faq)
//! ```
//!
//! ## Rules
//!
//! - A segment that is not the last of some path is a directory.
//! - `dir/index.md` sets `has_index` on `dir` and never becomes a leaf.
//! - Directories sort before files; each group sorts by display title,
//!   ignoring case.
//! - Titles are title-cased names unless a directory title override is given.
//!
//! The builder is a pure function of its inputs, so the whole tree can be
//! recomputed whenever the content changes.

use crate::naming::{self, INDEX_NAME};
use crate::types::ContentNode;
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path};

/// Directory slug → title override, usually from `_meta.json` files.
pub type DirTitles = HashMap<String, String>;

#[derive(Default)]
struct BuilderNode {
    slug: String,
    is_directory: bool,
    has_index: bool,
    children: BTreeMap<String, BuilderNode>,
}

/// Build the sidebar tree from markdown paths relative to the content root.
///
/// Extensions are stripped; paths that are not relative are skipped.
pub fn build_hierarchy<P: AsRef<Path>>(files: &[P], dir_titles: &DirTitles) -> Vec<ContentNode> {
    let mut root: BTreeMap<String, BuilderNode> = BTreeMap::new();

    for file in files {
        let Some(parts) = path_segments(file.as_ref()) else {
            log::debug!("skipping non-relative path {}", file.as_ref().display());
            continue;
        };
        insert_path(&mut root, &parts);
    }

    flatten(root, dir_titles)
}

/// Split a relative path into segments with the extension removed from the
/// final one. `guides/setup.md` → `["guides", "setup"]`.
pub fn path_segments(path: &Path) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    for component in path.with_extension("").components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!parts.is_empty()).then_some(parts)
}

fn insert_path(root: &mut BTreeMap<String, BuilderNode>, parts: &[String]) {
    let is_index_file = parts.last().is_some_and(|p| p == INDEX_NAME);
    let last = parts.len() - 1;

    let mut level = root;
    let mut slug = String::new();
    for (i, part) in parts.iter().enumerate() {
        if !slug.is_empty() {
            slug.push('/');
        }
        slug.push_str(part);

        let node = level.entry(part.clone()).or_insert_with(|| BuilderNode {
            slug: slug.clone(),
            ..BuilderNode::default()
        });
        // A name seen as a file in one path and a folder in another is a folder.
        if i != last {
            node.is_directory = true;
        }
        if is_index_file && i + 1 == last {
            node.has_index = true;
        }
        level = &mut node.children;
    }
}

fn flatten(level: BTreeMap<String, BuilderNode>, dir_titles: &DirTitles) -> Vec<ContentNode> {
    let mut nodes: Vec<ContentNode> = level
        .into_iter()
        .filter(|(name, node)| node.is_directory || name != INDEX_NAME)
        .map(|(name, node)| {
            let declared = if node.is_directory {
                dir_titles.get(&node.slug).cloned()
            } else {
                None
            };
            let title = declared.unwrap_or_else(|| naming::display_title(&name));

            ContentNode {
                slug: node.slug,
                title,
                is_directory: node.is_directory,
                has_index: node.has_index,
                children: flatten(node.children, dir_titles),
            }
        })
        .collect();

    sort_siblings(&mut nodes);
    nodes
}

/// Directories first, then by title ignoring case; the exact title and then
/// the slug break ties.
pub fn sort_siblings(nodes: &mut [ContentNode]) {
    nodes.sort_by_cached_key(|n| {
        (
            !n.is_directory,
            n.title.to_lowercase(),
            n.title.clone(),
            n.slug.clone(),
        )
    });
}

/// Depth-first lookup of a node by slug.
pub fn find_node<'a>(tree: &'a [ContentNode], slug: &str) -> Option<&'a ContentNode> {
    tree.iter().find_map(|node| {
        if node.slug == slug {
            Some(node)
        } else {
            find_node(&node.children, slug)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn build(paths: &[&str]) -> Vec<ContentNode> {
        let files: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
        build_hierarchy(&files, &DirTitles::new())
    }

    fn slugs(nodes: &[ContentNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.slug.as_str()).collect()
    }

    fn assert_siblings_ordered(nodes: &[ContentNode]) {
        let first_file = nodes.iter().position(|n| !n.is_directory).unwrap_or(nodes.len());
        assert!(
            nodes[first_file..].iter().all(|n| !n.is_directory),
            "directory after file in {:?}",
            slugs(nodes)
        );
        for group in [&nodes[..first_file], &nodes[first_file..]] {
            assert!(
                group
                    .windows(2)
                    .all(|w| w[0].title.to_lowercase() <= w[1].title.to_lowercase())
            );
        }
        for node in nodes {
            assert_siblings_ordered(&node.children);
        }
    }

    fn assert_no_index_leaves(nodes: &[ContentNode]) {
        for node in nodes {
            assert!(
                node.is_directory || naming::last_segment(&node.slug) != INDEX_NAME,
                "index leaf {}",
                node.slug
            );
            assert_no_index_leaves(&node.children);
        }
    }

    #[test]
    fn guides_example() {
        let tree = build(&["guides/index.md", "guides/setup.md", "faq.md"]);

        assert_eq!(
            tree,
            vec![
                ContentNode {
                    slug: "guides".into(),
                    title: "Guides".into(),
                    is_directory: true,
                    has_index: true,
                    children: vec![ContentNode {
                        slug: "guides/setup".into(),
                        title: "Setup".into(),
                        is_directory: false,
                        has_index: false,
                        children: vec![],
                    }],
                },
                ContentNode {
                    slug: "faq".into(),
                    title: "Faq".into(),
                    is_directory: false,
                    has_index: false,
                    children: vec![],
                },
            ]
        );
    }

    #[test]
    fn index_only_directory_is_clickable_leaf() {
        let tree = build(&["about/index.md"]);
        assert_eq!(tree.len(), 1);
        let about = &tree[0];
        assert!(about.is_directory);
        assert!(about.has_index);
        assert!(about.children.is_empty());
        assert!(about.is_clickable());
    }

    #[test]
    fn directory_without_index_not_clickable() {
        let tree = build(&["reference/cli.md"]);
        let reference = &tree[0];
        assert!(reference.is_directory);
        assert!(!reference.has_index);
        assert!(!reference.is_clickable());
        assert_eq!(slugs(&reference.children), vec!["reference/cli"]);
    }

    #[test]
    fn root_index_hidden() {
        let tree = build(&["index.md", "faq.md"]);
        assert_eq!(slugs(&tree), vec!["faq"]);
    }

    #[test]
    fn nested_index_only_marks_immediate_parent() {
        let tree = build(&["a/b/index.md", "a/page.md"]);
        let a = &tree[0];
        assert!(!a.has_index);
        let b = find_node(&tree, "a/b").unwrap();
        assert!(b.has_index);
        assert!(b.children.is_empty());
    }

    #[test]
    fn directory_named_index_is_kept() {
        let tree = build(&["index/page.md"]);
        assert_eq!(slugs(&tree), vec!["index"]);
        assert!(tree[0].is_directory);
    }

    #[test]
    fn directories_before_files_then_title() {
        let tree = build(&["zeta.md", "alpha.md", "beta/x.md", "gamma/y.md"]);
        assert_eq!(slugs(&tree), vec!["beta", "gamma", "alpha", "zeta"]);
        assert_siblings_ordered(&tree);
    }

    #[test]
    fn titles_are_title_cased() {
        let tree = build(&["getting-started/first-steps.md"]);
        assert_eq!(tree[0].title, "Getting Started");
        assert_eq!(tree[0].children[0].title, "First Steps");
    }

    #[test]
    fn dir_title_override_applies_and_sorts() {
        let files = vec![PathBuf::from("guides/a.md"), PathBuf::from("howto/b.md")];
        let mut titles = DirTitles::new();
        titles.insert("guides".into(), "User Guides".into());

        let tree = build_hierarchy(&files, &titles);
        assert_eq!(tree[0].title, "Howto");
        assert_eq!(tree[1].title, "User Guides");
    }

    #[test]
    fn override_ignored_for_files() {
        let files = vec![PathBuf::from("faq.md")];
        let mut titles = DirTitles::new();
        titles.insert("faq".into(), "Questions".into());

        let tree = build_hierarchy(&files, &titles);
        assert_eq!(tree[0].title, "Faq");
    }

    #[test]
    fn file_and_directory_with_same_name_merge() {
        // `setup.md` next to `setup/` addresses the same slug as the folder.
        let tree = build(&["setup.md", "setup/linux.md"]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_directory);
        assert_eq!(slugs(&tree[0].children), vec!["setup/linux"]);
    }

    #[test]
    fn deep_tree_invariants_hold() {
        let tree = build(&[
            "index.md",
            "faq.md",
            "guides/index.md",
            "guides/setup.md",
            "guides/advanced/index.md",
            "guides/advanced/tuning.md",
            "guides/advanced/deploy-to-production.md",
            "reference/cli.md",
            "reference/api/index.md",
            "changelog.md",
        ]);
        assert_siblings_ordered(&tree);
        assert_no_index_leaves(&tree);
        assert_eq!(slugs(&tree), vec!["guides", "reference", "changelog", "faq"]);
    }

    #[test]
    fn absolute_and_parent_paths_skipped() {
        let files = vec![
            PathBuf::from("/etc/passwd.md"),
            PathBuf::from("../outside.md"),
            PathBuf::from("ok.md"),
        ];
        let tree = build_hierarchy(&files, &DirTitles::new());
        assert_eq!(slugs(&tree), vec!["ok"]);
    }

    #[test]
    fn empty_input_empty_tree() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn find_node_descends() {
        let tree = build(&["a/b/c.md"]);
        assert_eq!(find_node(&tree, "a/b/c").unwrap().title, "C");
        assert!(find_node(&tree, "a/x").is_none());
    }

    #[test]
    fn titles_sort_ignoring_case() {
        let mut titles = DirTitles::new();
        titles.insert("api".to_string(), "API Docs".to_string());
        let files: Vec<PathBuf> = ["api/x.md", "about/y.md", "zeta.md", "Alpha.md"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let tree = build_hierarchy(&files, &titles);
        assert_eq!(slugs(&tree), vec!["about", "api", "Alpha", "zeta"]);
    }

    #[test]
    fn case_only_difference_is_stable() {
        let tree = build(&["faq.md", "FAQ.md"]);
        assert_eq!(slugs(&tree), vec!["FAQ", "faq"]);
    }

    #[test]
    fn path_segments_strip_extension() {
        assert_eq!(
            path_segments(Path::new("guides/setup.md")),
            Some(vec!["guides".to_string(), "setup".to_string()])
        );
        assert_eq!(path_segments(Path::new("./faq.md")), Some(vec!["faq".to_string()]));
        assert_eq!(path_segments(Path::new("")), None);
    }
}
