//! Shared types passed between indexing, navigation and generation.
//!
//! [`ContentNode`] is serialized into the scan manifest with camelCase keys
//! (`isDirectory`, `hasIndex`) so the JSON reads the same as the sidebar data
//! the site's client-side filter works against.

use serde::{Deserialize, Serialize};

/// A node in the sidebar tree: a markdown file or a directory of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    /// `/`-joined relative path without extension, e.g. `guides/setup`.
    pub slug: String,
    /// Display title: title-cased name or a `_meta.json` override.
    pub title: String,
    pub is_directory: bool,
    /// True iff the directory holds an `index.md` landing page.
    #[serde(default)]
    pub has_index: bool,
    #[serde(default)]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Whether the node has a page to land on.
    ///
    /// Files always do; directories only when they carry an index document.
    pub fn is_clickable(&self) -> bool {
        !self.is_directory || self.has_index
    }
}

/// A single resolved document, built fresh on every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub slug: String,
    /// Raw markdown body with the front-matter block removed.
    pub content: String,
    pub meta: DocMeta,
    /// Ancestor directories, root first, immediate parent last.
    pub breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMeta {
    pub title: String,
    /// Empty when the front matter declares none.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Cumulative slug of the ancestor directory.
    pub slug: String,
    pub title: String,
}

/// Contents of a directory's `_meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
