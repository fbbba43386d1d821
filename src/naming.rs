//! Filename to title conversion shared by the sidebar, breadcrumbs and pages.
//!
//! Content files carry no ordering prefix: the path *is* the address. Two
//! display forms are derived from a path segment:
//!
//! - **Node title** ([`display_title`]): dashes split the name into words and
//!   each word gets an upper-case first letter.
//!   `getting-started` → "Getting Started", used in the sidebar and breadcrumbs.
//! - **Page fallback title** ([`fallback_page_title`]): dashes become spaces,
//!   case untouched. `getting-started` → "getting started", used as the
//!   document heading when front matter has no `title`.

/// Name of the landing-page document inside a directory.
pub const INDEX_NAME: &str = "index";

/// Per-directory metadata file (JSON) carrying title overrides.
pub const DIR_META_FILE: &str = "_meta.json";

/// Markdown file extension recognised by the scanner.
pub const MARKDOWN_EXT: &str = "md";

/// Title-case a path segment: `deploy-to-production` → "Deploy To Production".
///
/// Empty words (from `a--b` or a trailing dash) are kept so the word count
/// matches the dash count, the same as a plain split would give.
pub fn display_title(name: &str) -> String {
    name.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page heading used when a document declares no title.
///
/// Takes the last segment of the slug and turns dashes into spaces.
pub fn fallback_page_title(slug: &str) -> String {
    last_segment(slug).replace('-', " ")
}

/// Last `/`-separated segment of a slug.
pub fn last_segment(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
