//! Reading order and previous/next links.
//!
//! Two walks over the sidebar tree, both depth-first with parents before
//! children:
//!
//! - [`pages`] lists every node that has a page: files, and directories
//!   with an `index.md`. This is what gets rendered.
//! - [`flatten`] lists the reading order used for previous/next links. Only
//!   entries without children are stops, so a section's landing page is
//!   reached from the sidebar but never by stepping through the pages.
//!   A directory holding nothing but its `index.md` is a stop.
//!
//! ```text
//! Guides/ (index)      pages:    guides, guides/advanced/tuning,
//!   Advanced/                    guides/setup, faq
//!     Tuning           flatten:  guides/advanced/tuning, guides/setup, faq
//!   Setup
//! Faq
//! ```

use crate::types::ContentNode;
use serde::Serialize;

/// A page in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub slug: String,
    pub title: String,
}

/// Neighbours of a page in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrevNext<'a> {
    pub prev: Option<&'a NavEntry>,
    pub next: Option<&'a NavEntry>,
}

/// Flatten the tree into reading order: clickable entries with no children.
pub fn flatten(tree: &[ContentNode]) -> Vec<NavEntry> {
    let mut out = Vec::new();
    walk(tree, true, &mut out);
    out
}

/// Every node with a page, parents before children.
pub fn pages(tree: &[ContentNode]) -> Vec<NavEntry> {
    let mut out = Vec::new();
    walk(tree, false, &mut out);
    out
}

fn walk(nodes: &[ContentNode], leaves_only: bool, out: &mut Vec<NavEntry>) {
    for node in nodes {
        let stop = !leaves_only || node.children.is_empty();
        if stop && node.is_clickable() {
            out.push(NavEntry {
                slug: node.slug.clone(),
                title: node.title.clone(),
            });
        }
        walk(&node.children, leaves_only, out);
    }
}

/// Previous and next pages around `slug`; both empty if `slug` is not listed.
pub fn neighbours<'a>(flat: &'a [NavEntry], slug: &str) -> PrevNext<'a> {
    match flat.iter().position(|e| e.slug == slug) {
        Some(i) => PrevNext {
            prev: i.checked_sub(1).and_then(|p| flat.get(p)),
            next: flat.get(i + 1),
        },
        None => PrevNext::default(),
    }
}
