//! Content discovery and manifest generation.
//!
//! Stage 1 of the build. Walks the content tree, collects every markdown
//! file, reads directory metadata, and builds the sidebar hierarchy that every
//! later stage shares.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── index.md                     # Home page body (optional, not in sidebar)
//! ├── faq.md                       # Page → /faq/
//! ├── assets/                      # Copied verbatim to the output root
//! ├── guides/                      # Section (clickable: has index.md)
//! │   ├── _meta.json               # {"title": "User Guides"} (optional)
//! │   ├── index.md                 # Section landing page → /guides/
//! │   ├── setup.md                 # → /guides/setup/
//! │   └── advanced/                # Nested section without a landing page
//! │       └── deploy-to-production.md
//! └── about/
//!     └── index.md                 # Section with only a landing page
//! ```
//!
//! ## Rules
//!
//! - Every `*.md` file at any depth is content; nothing else is filtered.
//! - A missing or unreadable content root is fatal and aborts the build.
//! - Unreadable or malformed `_meta.json` files only lose their title override.

use crate::config::{self, SiteConfig};
use crate::hierarchy::{self, DirTitles};
use crate::metadata;
use crate::naming::MARKDOWN_EXT;
use crate::types::ContentNode;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content root not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot read content tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Sidebar tree shared by every page.
    pub tree: Vec<ContentNode>,
    /// Markdown files relative to the content root, sorted.
    pub files: Vec<String>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let files = collect_markdown_files(root)?;
    let dir_titles = load_dir_titles(root, &files);
    let tree = hierarchy::build_hierarchy(&files, &dir_titles);

    // Uses defaults if config.toml doesn't exist
    let config = config::load_config(root)?;

    Ok(Manifest {
        tree,
        files: files.iter().map(|p| slash_path(p)).collect(),
        config,
    })
}

/// List every markdown file under `root`, relative to it, sorted.
///
/// Traversal depth is unbounded. Any unreadable directory fails the whole
/// scan: content is a build input and a partial sidebar would be wrong.
pub fn collect_markdown_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            log::trace!("found {}", rel.display());
            files.push(rel.to_path_buf());
        }
    }

    files.sort();
    log::debug!("found {} markdown files under {}", files.len(), root.display());
    Ok(files)
}

/// Title overrides for every directory that holds markdown.
///
/// Reads `<dir>/_meta.json` once per directory; directories without one are
/// left out of the map and keep their derived title.
pub fn load_dir_titles(root: &Path, files: &[PathBuf]) -> DirTitles {
    let dirs: BTreeSet<&Path> = files
        .iter()
        .flat_map(|f| f.ancestors().skip(1))
        .filter(|d| !d.as_os_str().is_empty())
        .collect();

    dirs.into_iter()
        .filter_map(|dir| {
            let meta = metadata::read_dir_meta(&root.join(dir))?;
            let title = metadata::resolve(&[Some(meta.title.as_str())])?;
            Some((slash_path(dir), title))
        })
        .collect()
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MARKDOWN_EXT)
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
