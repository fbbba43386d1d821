//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entry leads with
//! its positional index and title; filesystem paths and URLs follow as
//! indented context lines. The output reads as a table of contents while
//! still letting users trace each entry back to a file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Home
//!     Source: index.md
//!
//! Pages
//! 001 User Guides (3 pages)
//!     Source: guides/
//!     Landing page: guides/index.md
//!     001 Advanced (1 page)
//!         Source: guides/advanced/
//!         001 Deploy To Production
//!             Source: guides/advanced/deploy-to-production.md
//!     002 Setup
//!         Source: guides/setup.md
//! 002 Faq
//!     Source: faq.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Search
//!
//! ```text
//! Matches for "setup"
//! 001 User Guides → /guides/
//!     001 Setup → /guides/setup/
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html (from index.md)
//! 001 User Guides → guides/index.html
//! 002 Setup → guides/setup/index.html
//! Not found → 404.html
//! Assets: 1 file copied
//! Generated 2 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::{GenerateReport, page_href};
use crate::navigation::{self, PrevNext};
use crate::naming::{INDEX_NAME, MARKDOWN_EXT};
use crate::scan::Manifest;
use crate::types::{ContentNode, Document};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `3 pages`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format an entity header: positional index + title, with an optional page
/// count for sections.
///
/// ```text
/// 001 User Guides (3 pages)
/// 002 Faq
/// ```
fn entity_header(index: usize, title: &str, pages: Option<usize>) -> String {
    match pages {
        Some(n) => format!("{} {} ({})", format_index(index), title, plural(n, "page")),
        None => format!("{} {}", format_index(index), title),
    }
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the content tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    node: &'a ContentNode,
}

/// Walk the content tree, assigning positional indices per sibling level.
/// Returns a flat list of nodes with depth and position for formatting.
fn walk_tree(tree: &[ContentNode]) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_tree_recursive(tree, 0, &mut nodes);
    nodes
}

fn walk_tree_recursive<'a>(items: &'a [ContentNode], depth: usize, nodes: &mut Vec<TreeNode<'a>>) {
    for (i, node) in items.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            node,
        });
        walk_tree_recursive(&node.children, depth + 1, nodes);
    }
}

/// Pages reachable inside a section, its own landing page included.
fn section_pages(node: &ContentNode) -> usize {
    navigation::pages(std::slice::from_ref(node)).len()
}

// ============================================================================
// Scan
// ============================================================================

/// Format scan output showing the discovered content tree.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let root_index = format!("{INDEX_NAME}.{MARKDOWN_EXT}");

    if manifest.files.contains(&root_index) {
        lines.push("Home".to_string());
        lines.push(format!("    Source: {root_index}"));
        lines.push(String::new());
    }

    lines.push("Pages".to_string());
    if manifest.tree.is_empty() {
        lines.push("    (no markdown files)".to_string());
    }

    for entry in walk_tree(&manifest.tree) {
        let base_indent = indent(entry.depth);
        let node = entry.node;

        if node.is_directory {
            let header = entity_header(entry.position, &node.title, Some(section_pages(node)));
            lines.push(format!("{}{}", base_indent, header));
            lines.push(format!("{}    Source: {}/", base_indent, node.slug));
            if node.has_index {
                lines.push(format!(
                    "{}    Landing page: {}/{}",
                    base_indent, node.slug, root_index
                ));
            }
        } else {
            let header = entity_header(entry.position, &node.title, None);
            lines.push(format!("{}{}", base_indent, header));
            lines.push(format!(
                "{}    Source: {}.{}",
                base_indent, node.slug, MARKDOWN_EXT
            ));
        }
    }

    // Config section
    lines.push(String::new());
    lines.push("Config".to_string());
    let config_path = source_root.join(crate::config::CONFIG_FILE);
    if config_path.exists() {
        lines.push(format!("    {}", crate::config::CONFIG_FILE));
    }
    let assets_path = source_root.join(&manifest.config.assets_dir);
    if assets_path.is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Format an already-filtered tree as search results.
///
/// Entries with a page carry their URL; directories without one are shown
/// only as context for what they contain.
pub fn format_search_output(filtered: &[ContentNode], query: &str) -> Vec<String> {
    if filtered.is_empty() {
        return vec![format!("No pages match \"{query}\"")];
    }

    let mut lines = vec![format!("Matches for \"{query}\"")];
    for entry in walk_tree(filtered) {
        let header = entity_header(entry.position, &entry.node.title, None);
        let line = if entry.node.is_clickable() {
            format!(
                "{}{} \u{2192} {}",
                indent(entry.depth),
                header,
                page_href(&entry.node.slug)
            )
        } else {
            format!("{}{}", indent(entry.depth), header)
        };
        lines.push(line);
    }
    lines
}

/// Print search output to stdout.
pub fn print_search_output(filtered: &[ContentNode], query: &str) {
    for line in format_search_output(filtered, query) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

/// Format a resolved document: metadata, neighbours, then the raw body.
pub fn format_document(doc: &Document, around: &PrevNext) -> Vec<String> {
    let mut lines = vec![doc.meta.title.clone()];

    let slug = if doc.slug.is_empty() { "(home)" } else { &doc.slug };
    lines.push(format!("    Slug: {slug}"));
    if !doc.meta.description.is_empty() {
        lines.push(format!("    Description: {}", doc.meta.description));
    }

    let trail: Vec<&str> = std::iter::once("Home")
        .chain(doc.breadcrumbs.iter().map(|c| c.title.as_str()))
        .collect();
    lines.push(format!("    Breadcrumbs: {}", trail.join(" / ")));

    if let Some(prev) = around.prev {
        lines.push(format!(
            "    Previous: {} \u{2192} {}",
            prev.title,
            page_href(&prev.slug)
        ));
    }
    if let Some(next) = around.next {
        lines.push(format!(
            "    Next: {} \u{2192} {}",
            next.title,
            page_href(&next.slug)
        ));
    }

    lines.push(String::new());
    lines.extend(doc.content.lines().map(str::to_string));
    lines
}

/// Print a document to stdout.
pub fn print_document(doc: &Document, around: &PrevNext) {
    for line in format_document(doc, around) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format build output showing every generated HTML file.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    let home_source = if report.home_from_content {
        "from index.md"
    } else {
        "welcome page"
    };
    lines.push(format!("Home \u{2192} index.html ({home_source})"));

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.output
        ));
    }
    lines.push("Not found \u{2192} 404.html".to_string());

    for slug in &report.skipped {
        lines.push(format!("Skipped: {slug} (did not resolve)"));
    }
    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets: {} copied",
            plural(report.assets_copied, "file")
        ));
    }

    lines.push(format!("Generated {}", plural(report.pages.len(), "page")));
    lines
}

/// Print build output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_nodes;
    use crate::generate::GeneratedPage;
    use crate::navigation::NavEntry;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use crate::types::{Breadcrumb, DocMeta};

    fn leaf(slug: &str, title: &str) -> ContentNode {
        ContentNode {
            slug: slug.to_string(),
            title: title.to_string(),
            is_directory: false,
            has_index: false,
            children: vec![],
        }
    }

    fn dir(slug: &str, title: &str, has_index: bool, children: Vec<ContentNode>) -> ContentNode {
        ContentNode {
            slug: slug.to_string(),
            title: title.to_string(),
            is_directory: true,
            has_index,
            children,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_triple_digit() {
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "file"), "3 files");
    }

    #[test]
    fn entity_header_with_count() {
        assert_eq!(entity_header(1, "Guides", Some(3)), "001 Guides (3 pages)");
    }

    #[test]
    fn entity_header_without_count() {
        assert_eq!(entity_header(2, "Faq", None), "002 Faq");
    }

    // =========================================================================
    // Tree walker tests
    // =========================================================================

    #[test]
    fn walk_tree_positions_per_level() {
        let tree = vec![
            dir(
                "guides",
                "Guides",
                true,
                vec![leaf("guides/a", "A"), leaf("guides/b", "B")],
            ),
            leaf("faq", "Faq"),
        ];
        let nodes = walk_tree(&tree);
        let shape: Vec<(usize, usize, &str)> = nodes
            .iter()
            .map(|n| (n.depth, n.position, n.node.slug.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, 1, "guides"),
                (1, 1, "guides/a"),
                (1, 2, "guides/b"),
                (0, 2, "faq"),
            ]
        );
    }

    #[test]
    fn section_pages_counts_landing_page() {
        let with_index = dir("g", "G", true, vec![leaf("g/a", "A")]);
        let without = dir("r", "R", false, vec![leaf("r/a", "A")]);
        assert_eq!(section_pages(&with_index), 2);
        assert_eq!(section_pages(&without), 1);
    }

    // =========================================================================
    // Scan output tests
    // =========================================================================

    #[test]
    fn scan_output_fixture() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Home");
        assert_eq!(lines[1], "    Source: index.md");
        assert!(lines.contains(&"Pages".to_string()));
        assert!(lines.contains(&"003 User Guides (4 pages)".to_string()));
        assert!(lines.contains(&"    Landing page: guides/index.md".to_string()));
        assert!(lines.contains(&"    001 Advanced (1 page)".to_string()));
        assert!(lines.contains(&"            Source: guides/advanced/deploy-to-production.md".to_string()));
        assert!(lines.contains(&"005 Faq".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    assets/".to_string()));
    }

    #[test]
    fn scan_output_no_landing_page_line_without_index() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert!(!lines.iter().any(|l| l.contains("reference/index.md")));
    }

    #[test]
    fn scan_output_empty_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "    (no markdown files)");
        assert_eq!(lines.last().unwrap(), "Config");
    }

    // =========================================================================
    // Search output tests
    // =========================================================================

    #[test]
    fn search_output_marks_urls() {
        let tree = vec![
            dir("guides", "Guides", true, vec![leaf("guides/setup", "Setup")]),
            dir("reference", "Reference", false, vec![leaf("reference/setup-options", "Setup Options")]),
        ];
        let lines = format_search_output(&filter_nodes(&tree, "setup"), "setup");
        assert_eq!(
            lines,
            vec![
                "Matches for \"setup\"",
                "001 Guides \u{2192} /guides/",
                "    001 Setup \u{2192} /guides/setup/",
                "002 Reference",
                "    001 Setup Options \u{2192} /reference/setup-options/",
            ]
        );
    }

    #[test]
    fn search_output_no_matches() {
        let lines = format_search_output(&[], "zzz");
        assert_eq!(lines, vec!["No pages match \"zzz\""]);
    }

    // =========================================================================
    // Document output tests
    // =========================================================================

    #[test]
    fn document_output_full() {
        let doc = Document {
            slug: "guides/setup".into(),
            content: "line one\nline two".into(),
            meta: DocMeta {
                title: "Setup".into(),
                description: "Prepare".into(),
            },
            breadcrumbs: vec![Breadcrumb {
                slug: "guides".into(),
                title: "User Guides".into(),
            }],
        };
        let prev = NavEntry {
            slug: "guides".into(),
            title: "Guides Overview".into(),
        };
        let around = PrevNext {
            prev: Some(&prev),
            next: None,
        };
        let lines = format_document(&doc, &around);
        assert_eq!(
            lines,
            vec![
                "Setup",
                "    Slug: guides/setup",
                "    Description: Prepare",
                "    Breadcrumbs: Home / User Guides",
                "    Previous: Guides Overview \u{2192} /guides/",
                "",
                "line one",
                "line two",
            ]
        );
    }

    #[test]
    fn document_output_home() {
        let doc = Document {
            slug: String::new(),
            content: String::new(),
            meta: DocMeta {
                title: "Welcome".into(),
                description: String::new(),
            },
            breadcrumbs: vec![],
        };
        let lines = format_document(&doc, &PrevNext::default());
        assert_eq!(lines[1], "    Slug: (home)");
        assert_eq!(lines[2], "    Breadcrumbs: Home");
    }

    // =========================================================================
    // Generate output tests
    // =========================================================================

    #[test]
    fn generate_output_lists_pages() {
        let report = GenerateReport {
            home_from_content: false,
            pages: vec![
                GeneratedPage {
                    slug: "guides".into(),
                    title: "Guides".into(),
                    output: "guides/index.html".into(),
                },
                GeneratedPage {
                    slug: "faq".into(),
                    title: "Faq".into(),
                    output: "faq/index.html".into(),
                },
            ],
            skipped: vec!["ghost".into()],
            assets_copied: 1,
        };
        assert_eq!(
            format_generate_output(&report),
            vec![
                "Home \u{2192} index.html (welcome page)",
                "001 Guides \u{2192} guides/index.html",
                "002 Faq \u{2192} faq/index.html",
                "Not found \u{2192} 404.html",
                "Skipped: ghost (did not resolve)",
                "Assets: 1 file copied",
                "Generated 2 pages",
            ]
        );
    }

    #[test]
    fn generate_output_omits_assets_when_none() {
        let report = GenerateReport::default();
        let lines = format_generate_output(&report);
        assert!(!lines.iter().any(|l| l.starts_with("Assets")));
        assert_eq!(lines.last().unwrap(), "Generated 0 pages");
    }
}
