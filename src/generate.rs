//! HTML site generation.
//!
//! Stage 2 of the build. Scans the content root, resolves every page in the
//! sidebar and writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): root `index.md` if present, else a welcome
//!   block; followed by cards for the first top-level sections
//! - **Pages** (`/{slug}/index.html`): one per file and per directory with an
//!   `index.md`, with sidebar, breadcrumbs and previous/next links
//! - **Not found** (`/404.html`): served by most static hosts for unknown URLs
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── favicon.svg              # From content/assets/
//! ├── faq/index.html
//! └── guides/
//!     ├── index.html           # guides/index.md
//!     └── setup/index.html
//! ```
//!
//! ## Rendering
//!
//! Markdown goes through `pulldown-cmark` with the GitHub extensions (tables,
//! strikethrough, task lists, footnotes). Fenced code keeps its
//! `language-*` class for client-side highlighters. HTML is built with
//! [maud](https://maud.lambda.xyz/), which escapes every interpolated value.
//!
//! Pages render in parallel on the rayon pool. Each render reads only the
//! immutable content tree and writes its own output file.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined in every page:
//! - `static/style.css`: layout (colors injected from config)
//! - `static/docs.js`: sidebar filter, section toggles, arrow-key navigation

use crate::config::{self, SiteConfig};
use crate::document::DocumentLoader;
use crate::metadata;
use crate::navigation::{self, NavEntry, PrevNext};
use crate::scan::{self, ScanError};
use crate::types::{ContentNode, Document};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// What a build wrote, for the CLI summary.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Whether the home page used `index.md` from the content root.
    pub home_from_content: bool,
    /// Every rendered page, section landing pages before their children.
    pub pages: Vec<GeneratedPage>,
    /// Sidebar entries that failed to resolve when rendered.
    pub skipped: Vec<String>,
    /// Files copied from the assets directory.
    pub assets_copied: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub slug: String,
    pub title: String,
    /// Output path relative to the output directory.
    pub output: String,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/docs.js");

/// Everything a page render needs besides its own document.
struct SiteContext<'a> {
    tree: &'a [ContentNode],
    reading_order: &'a [NavEntry],
    config: &'a SiteConfig,
    css: &'a str,
}

pub fn generate(source: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let manifest = scan::scan(source)?;
    let loader = DocumentLoader::new(source);
    let reading_order = navigation::flatten(&manifest.tree);
    let pages = navigation::pages(&manifest.tree);

    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let ctx = SiteContext {
        tree: &manifest.tree,
        reading_order: &reading_order,
        config: &manifest.config,
        css: &css,
    };

    fs::create_dir_all(output_dir)?;

    let mut report = GenerateReport {
        assets_copied: copy_assets(&source.join(&manifest.config.assets_dir), output_dir)?,
        ..GenerateReport::default()
    };

    // Home page
    let home_doc = loader.resolve("");
    report.home_from_content = home_doc.is_some();
    let home_html = render_home(&ctx, home_doc.as_ref(), source);
    fs::write(output_dir.join("index.html"), home_html.into_string())?;
    log::debug!("wrote index.html");

    let not_found = render_not_found(&ctx);
    fs::write(output_dir.join("404.html"), not_found.into_string())?;

    let results: Vec<Result<Option<GeneratedPage>, GenerateError>> = pages
        .par_iter()
        .map(|entry| {
            let Some(doc) = loader.resolve(&entry.slug) else {
                log::warn!("'{}' is in the sidebar but did not resolve", entry.slug);
                return Ok(None);
            };
            let rel = page_output_path(&doc.slug);
            let path = output_dir.join(&rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, render_doc_page(&ctx, &doc).into_string())?;
            log::debug!("wrote {}", rel.display());
            Ok(Some(GeneratedPage {
                slug: doc.slug,
                title: doc.meta.title,
                output: scan::slash_path(&rel),
            }))
        })
        .collect();

    for (entry, result) in pages.iter().zip(results) {
        match result? {
            Some(page) => report.pages.push(page),
            None => report.skipped.push(entry.slug.clone()),
        }
    }

    Ok(report)
}

/// `guides/setup` → `guides/setup/index.html`.
pub fn page_output_path(slug: &str) -> PathBuf {
    let mut path: PathBuf = slug.split('/').filter(|s| !s.is_empty()).collect();
    path.push("index.html");
    path
}

/// Site-absolute URL of a page: `guides/setup` → `/guides/setup/`.
///
/// Each segment is percent-encoded, so `c#-notes` links to `/c%23-notes/`.
pub fn page_href(slug: &str) -> String {
    if slug.is_empty() {
        return "/".to_string();
    }
    let encoded: Vec<_> = slug.split('/').map(urlencoding::encode).collect();
    format!("/{}/", encoded.join("/"))
}

/// Copy the assets directory into the output root. Returns the file count.
fn copy_assets(assets: &Path, output_dir: &Path) -> std::io::Result<usize> {
    if !assets.is_dir() {
        return Ok(0);
    }
    copy_dir_recursive(assets, output_dir)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Convert markdown to HTML with the GitHub-flavored extensions.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Two-column layout: sidebar on the left, page content on the right.
fn page_layout(ctx: &SiteContext, current_slug: &str, main: Markup) -> Markup {
    html! {
        div.layout {
            aside.sidebar {
                h3.sidebar-heading { "Table of Contents" }
                (render_search_bar())
                (render_sidebar(ctx.tree, current_slug))
            }
            main.content { (main) }
        }
    }
}

fn render_search_bar() -> Markup {
    html! {
        form.search-bar role="search" {
            input #doc-filter type="search" placeholder="Search documentation..."
                autocomplete="off" aria-label="Filter pages";
        }
    }
}

/// Renders the sidebar tree.
pub fn render_sidebar(tree: &[ContentNode], current_slug: &str) -> Markup {
    html! {
        nav.sidebar-nav {
            ul.sidebar-list {
                @for node in tree {
                    (render_sidebar_item(node, current_slug, 0))
                }
            }
        }
    }
}

/// Renders one sidebar entry and its children.
///
/// Top-level sections and ancestors of the current page start expanded.
/// Directories without a landing page render as plain labels.
fn render_sidebar_item(node: &ContentNode, current_slug: &str, level: usize) -> Markup {
    let is_active = node.slug == current_slug;
    let is_ancestor = current_slug.starts_with(&format!("{}/", node.slug));
    let expanded = level == 0 || is_active || is_ancestor;
    let has_children = !node.children.is_empty();

    let mut classes = vec!["sidebar-item"];
    if node.is_directory {
        classes.push("directory");
    }
    if has_children && expanded {
        classes.push("expanded");
    }

    html! {
        li class=(classes.join(" "))
            data-title=(node.title)
            data-directory=(flag(node.is_directory))
            data-expanded=(flag(has_children && expanded)) {
            div.sidebar-row style=(format!("--level: {level}")) {
                @if has_children {
                    button.sidebar-toggle type="button" aria-label="Toggle section" { "›" }
                } @else {
                    span.sidebar-spacer {}
                }
                @if node.is_clickable() {
                    a href=(page_href(&node.slug))
                        class=[is_active.then_some("active").or(is_ancestor.then_some("ancestor"))] {
                        (node.title)
                    }
                } @else {
                    span.sidebar-label { (node.title) }
                }
            }
            @if has_children {
                ul.sidebar-children {
                    @for child in &node.children {
                        (render_sidebar_item(child, current_slug, level + 1))
                    }
                }
            }
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Renders the breadcrumb trail, always starting at Home.
fn render_breadcrumbs(doc: &Document) -> Markup {
    html! {
        nav.breadcrumbs aria-label="Breadcrumb" {
            a href="/" { "Home" }
            @for crumb in &doc.breadcrumbs {
                span.crumb-separator { "/" }
                a href=(page_href(&crumb.slug)) { (crumb.title) }
            }
        }
    }
}

/// Renders previous/next links; data attributes drive arrow-key navigation.
fn render_page_nav(around: &PrevNext) -> Markup {
    let prev_href = around.prev.map(|e| page_href(&e.slug));
    let next_href = around.next.map(|e| page_href(&e.slug));
    html! {
        nav.page-nav data-prev=[prev_href.as_deref()] data-next=[next_href.as_deref()] {
            @if let Some(prev) = around.prev {
                a.page-prev href=(page_href(&prev.slug)) rel="prev" { "← " (prev.title) }
            }
            span.page-nav-spacer {}
            @if let Some(next) = around.next {
                a.page-next href=(page_href(&next.slug)) rel="next" { (next.title) " →" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a documentation page.
fn render_doc_page(ctx: &SiteContext, doc: &Document) -> Markup {
    let around = navigation::neighbours(ctx.reading_order, &doc.slug);
    let body_html = render_markdown(&doc.content);

    let main = html! {
        article.doc-card {
            header.doc-header {
                (render_breadcrumbs(doc))
                h1 { (doc.meta.title) }
                @if !doc.meta.description.is_empty() {
                    p.doc-description { (doc.meta.description) }
                }
            }
            div.markdown-body {
                (PreEscaped(body_html))
            }
        }
        (render_page_nav(&around))
    };

    let title = format!("{} | {}", doc.meta.title, ctx.config.site.title);
    base_document(
        &title,
        &doc.meta.description,
        ctx.css,
        page_layout(ctx, &doc.slug, main),
    )
}

/// A top-level section featured on the home page.
struct SectionCard {
    title: String,
    description: String,
    href: Option<String>,
}

fn featured_sections(ctx: &SiteContext, source: &Path) -> Vec<SectionCard> {
    ctx.tree
        .iter()
        .filter(|n| n.is_directory)
        .take(ctx.config.sidebar.featured_sections)
        .map(|section| {
            let description = metadata::read_dir_meta(&source.join(&section.slug))
                .and_then(|m| m.description)
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "Explore this category".to_string());
            // Sections without a landing page link to their first page.
            let href = navigation::pages(std::slice::from_ref(section))
                .first()
                .map(|e| page_href(&e.slug));
            SectionCard {
                title: section.title.clone(),
                description,
                href,
            }
        })
        .collect()
}

/// Renders the home page.
fn render_home(ctx: &SiteContext, home: Option<&Document>, source: &Path) -> Markup {
    let site = &ctx.config.site;
    let heading = home
        .map(|d| d.meta.title.as_str())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(site.home_heading.as_str());
    let tagline = home
        .map(|d| d.meta.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or(site.home_tagline.as_str());
    let sections = featured_sections(ctx, source);

    let main = html! {
        header.home-header {
            h1 { (heading) }
            p.home-tagline { (tagline) }
        }
        @if let Some(doc) = home {
            article.doc-card {
                div.markdown-body { (PreEscaped(render_markdown(&doc.content))) }
            }
        }
        @if !sections.is_empty() {
            section.doc-card.home-sections {
                h2 { "Getting Started" }
                div.section-grid {
                    @for card in &sections {
                        @if let Some(href) = &card.href {
                            a.section-card href=(href) {
                                h3 { (card.title) }
                                p { (card.description) }
                                span.section-more { "Explore section →" }
                            }
                        } @else {
                            div.section-card {
                                h3 { (card.title) }
                                p { (card.description) }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(
        &site.title,
        &site.description,
        ctx.css,
        page_layout(ctx, "", main),
    )
}

/// Renders the page served for unknown URLs.
fn render_not_found(ctx: &SiteContext) -> Markup {
    let main = html! {
        article.doc-card.not-found {
            h1 { "Page not found" }
            p { "The page you're looking for doesn't exist." }
            a.button href="/" { "Go back home" }
        }
    };
    let title = format!("Page not found | {}", ctx.config.site.title);
    base_document(&title, "", ctx.css, page_layout(ctx, "", main))
}

// ============================================================================
// Tests
// ============================================================================
