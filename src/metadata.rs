//! Document and directory metadata.
//!
//! ## Front matter
//!
//! A markdown file may open with a metadata block. Two fence styles are
//! recognised:
//!
//! ```text
//! ---                      +++
//! title: Setup             title = "Setup"
//! description: First run   description = "First run"
//! ---                      +++
//! ```
//!
//! YAML (`---`) is parsed with `serde_yaml`, TOML (`+++`) with `toml`. Only
//! `title` and `description` are read; other keys are ignored. A block that
//! fails to parse is dropped from the body and contributes no fields, so the
//! page still renders with its fallback title.
//!
//! ## Directory metadata
//!
//! A directory may hold a `_meta.json` with at least a `title`. It renames the
//! directory in the sidebar and in breadcrumbs. Missing or malformed files
//! fall back to the title-cased directory name.
//!
//! ## Resolution priority
//!
//! Each field is resolved independently, first non-empty value wins:
//!
//! - **Page title**: front matter `title` → last slug segment (dashes → spaces)
//! - **Description**: front matter `description` → empty
//! - **Directory title**: `_meta.json` `title` → title-cased directory name

use crate::naming::{self, DIR_META_FILE};
use crate::types::DirMeta;
use serde::Deserialize;
use std::path::Path;

/// Fields read from a front-matter block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resolve a metadata field from multiple sources.
///
/// Takes optional values in priority order and returns the first non-None,
/// non-blank value, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Split raw file contents into front matter and markdown body.
///
/// Returns default (empty) front matter and the whole input when the file
/// does not start with a fence or the closing fence is missing.
pub fn split_front_matter(raw: &str) -> (FrontMatter, String) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some((fence, block, body)) = fenced_block(raw) else {
        return (FrontMatter::default(), raw.to_string());
    };

    let parsed = match fence {
        "---" => {
            if block.trim().is_empty() {
                Ok(FrontMatter::default())
            } else {
                serde_yaml::from_str::<FrontMatter>(block).map_err(|e| e.to_string())
            }
        }
        _ => toml::from_str::<FrontMatter>(block).map_err(|e| e.to_string()),
    };

    let front_matter = parsed.unwrap_or_else(|e| {
        log::warn!("ignoring malformed front matter: {e}");
        FrontMatter::default()
    });
    (front_matter, body.to_string())
}

/// Locate a leading `---`/`+++` block. Returns `(fence, block, body)`.
fn fenced_block(raw: &str) -> Option<(&'static str, &str, &str)> {
    let fence = ["---", "+++"]
        .into_iter()
        .find(|f| raw.lines().next().map(str::trim_end) == Some(*f))?;

    let after_open = raw.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((fence, block, body));
        }
        offset += line.len();
    }
    None
}

/// Read `_meta.json` from a directory.
///
/// `None` when the file is absent or does not parse; a parse failure is
/// logged so a typo in a title does not go unnoticed.
pub fn read_dir_meta(dir: &Path) -> Option<DirMeta> {
    let path = dir.join(DIR_META_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<DirMeta>(&content) {
        Ok(meta) => Some(meta),
        Err(e) => {
            log::warn!("ignoring {}: {e}", path.display());
            None
        }
    }
}

/// Title for a directory: its `_meta.json` title, else the title-cased name.
pub fn dir_title(dir: &Path, name: &str) -> String {
    let declared = read_dir_meta(dir).map(|m| m.title);
    resolve(&[declared.as_deref()]).unwrap_or_else(|| naming::display_title(name))
}
