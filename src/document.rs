//! Slug to document resolution.
//!
//! A slug addresses either a file or a directory's landing page:
//!
//! ```text
//! guides/setup  →  content/guides/setup.md
//! guides        →  content/guides.md, else content/guides/index.md
//! ""            →  content/index.md            (home page body)
//! ```
//!
//! Not-found is an ordinary outcome reported as `None`: a missing file, a
//! directory without `index.md`, an unsafe slug, or a read failure. Nothing
//! here aborts a build; the caller renders a "page not found" view instead.
//!
//! Documents are read fresh on every call and never cached, so resolving the
//! same slug twice after an edit sees the edit.

use crate::metadata::{self, FrontMatter};
use crate::naming::{self, INDEX_NAME, MARKDOWN_EXT};
use crate::types::{Breadcrumb, DocMeta, Document};
use std::fs;
use std::path::PathBuf;

/// Resolves slugs against a content root.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
}

impl DocumentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a slug to its document, or `None` when there is none.
    pub fn resolve(&self, slug: &str) -> Option<Document> {
        let segments = slug_segments(slug)?;
        let path = self.locate(&segments)?;

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                return None;
            }
        };
        log::debug!("resolved '{slug}' to {}", path.display());

        let (front_matter, content) = metadata::split_front_matter(&raw);
        let slug = segments.join("/");
        Some(Document {
            meta: doc_meta(&front_matter, &slug),
            slug,
            content,
            breadcrumbs: self.breadcrumbs(&segments),
        })
    }

    /// `slug.md` first, then `slug/index.md` if `slug` is a directory.
    fn locate(&self, segments: &[&str]) -> Option<PathBuf> {
        let base = segments.iter().fold(self.root.clone(), |p, s| p.join(s));

        if let Some(name) = segments.last() {
            let file = base.with_file_name(format!("{name}.{MARKDOWN_EXT}"));
            if file.is_file() {
                return Some(file);
            }
        }

        if base.is_dir() {
            let index = base.join(format!("{INDEX_NAME}.{MARKDOWN_EXT}"));
            if index.is_file() {
                return Some(index);
            }
        }
        None
    }

    /// One crumb per ancestor directory, root first, excluding the document.
    ///
    /// Crumbs follow the slug rather than the file, so `guides` resolved
    /// through `guides/index.md` has no crumbs, the same as `faq`.
    fn breadcrumbs(&self, segments: &[&str]) -> Vec<Breadcrumb> {
        let parents = segments.len().saturating_sub(1);
        let mut crumbs = Vec::with_capacity(parents);
        let mut dir = self.root.clone();
        for (i, name) in segments.iter().take(parents).enumerate() {
            dir.push(name);
            crumbs.push(Breadcrumb {
                slug: segments[..=i].join("/"),
                title: metadata::dir_title(&dir, name),
            });
        }
        crumbs
    }
}

fn doc_meta(front_matter: &FrontMatter, slug: &str) -> DocMeta {
    DocMeta {
        title: metadata::resolve(&[front_matter.title.as_deref()])
            .unwrap_or_else(|| naming::fallback_page_title(slug)),
        description: metadata::resolve(&[front_matter.description.as_deref()]).unwrap_or_default(),
    }
}

/// Split a slug into path segments, rejecting anything that could leave the
/// content root. The empty slug is the root itself.
fn slug_segments(slug: &str) -> Option<Vec<&str>> {
    let trimmed = slug.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    if trimmed.starts_with('/') || trimmed.contains('\\') {
        return None;
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    let safe = segments
        .iter()
        .all(|s| !s.is_empty() && *s != "." && *s != ".." && !s.contains('\0'));
    safe.then_some(segments)
}
