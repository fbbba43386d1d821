//! # Simple Docs
//!
//! A minimal static documentation site generator. Your filesystem is the data
//! source: directories become sidebar sections, markdown files become pages,
//! and an optional `_meta.json` renames a section.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → sidebar tree)
//! 2. Generate  content/  →  dist/            (final HTML site)
//! ```
//!
//! The scan manifest is human-readable JSON: the sidebar tree every page
//! shares, the list of markdown files, and the resolved config. Generation
//! rescans rather than reading the manifest back, so `build` always reflects
//! the content on disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content root, collects markdown files, builds the manifest |
//! | [`hierarchy`] | Turns relative file paths into the ordered sidebar tree |
//! | [`document`] | Resolves a slug to a page: body, title, description, breadcrumbs |
//! | [`filter`] | Title search over the sidebar tree, keeping ancestors of matches |
//! | [`navigation`] | Reading order and previous/next links |
//! | [`generate`] | Stage 2: renders the final HTML site using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`metadata`] | Front matter parsing and `_meta.json` directory titles |
//! | [`naming`] | Slug and title conventions shared by every module |
//! | [`types`] | Shared types (`ContentNode`, `Document`) |
//! | [`output`] | CLI output formatting: tree-based display of each command |
//!
//! # Design Decisions
//!
//! ## Filesystem Order Is Not Display Order
//!
//! Sibling entries are sorted directories first, then by title. Renaming a
//! section through `_meta.json` moves it in the sidebar accordingly; there is
//! no separate ordering file.
//!
//! ## Slugs Address Pages, Not Files
//!
//! `guides/setup` is backed by `guides/setup.md`; `guides` is backed by
//! `guides.md` or `guides/index.md`. A section without a landing page is
//! shown in the sidebar but has no URL of its own.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Static Output
//!
//! The generated site is plain HTML with inlined CSS and a small script for
//! the sidebar filter and arrow-key navigation. It can be dropped on any file
//! server.

pub mod config;
pub mod document;
pub mod filter;
pub mod generate;
pub mod hierarchy;
pub mod metadata;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
