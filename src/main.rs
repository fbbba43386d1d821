use clap::{ArgAction, Parser, Subcommand};
use simple_docs::document::DocumentLoader;
use simple_docs::{config, filter, generate, navigation, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-docs")]
#[command(about = "Static site generator for markdown documentation")]
#[command(long_about = "\
Static site generator for markdown documentation

Your filesystem is the data source. Directories become sidebar sections,
markdown files become pages, and _meta.json renames a section.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets (favicon, images) → copied to output root
  ├── index.md                     # Home page body (optional)
  ├── faq.md                       # Page → /faq/
  ├── guides/                      # Section with a landing page
  │   ├── _meta.json               # {\"title\": \"User Guides\"}
  │   ├── index.md                 # → /guides/
  │   ├── setup.md                 # → /guides/setup/
  │   └── advanced/                # Section without a landing page (label only)
  │       └── deploy.md            # → /guides/advanced/deploy/
  └── about/
      └── index.md                 # → /about/

Metadata resolution (first available wins):
  Page title:    front matter title → file name (getting-started.md → \"getting started\")
  Section title: _meta.json title → directory name (user-guides → \"User Guides\")

Front matter is YAML between --- fences or TOML between +++ fences.

Run 'simple-docs gen-config' to generate a documented config.toml.")]
#[command(version = env!("SIMPLE_DOCS_VERSION"))]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".simple-docs-temp", global = true)]
    temp_dir: PathBuf,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Print a page's metadata, breadcrumbs and neighbours
    Show {
        /// Page slug, e.g. guides/setup (empty for the home page)
        #[arg(default_value = "")]
        slug: String,
    },
    /// Filter the sidebar by title
    Search {
        /// Case-insensitive text matched against titles
        query: String,
    },
    /// Produce the final HTML site
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            log::debug!("wrote {}", manifest_path.display());
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Show { slug } => {
            let manifest = scan::scan(&cli.source)?;
            let loader = DocumentLoader::new(&cli.source);
            match loader.resolve(&slug) {
                Some(doc) => {
                    let reading_order = navigation::flatten(&manifest.tree);
                    let around = navigation::neighbours(&reading_order, &doc.slug);
                    output::print_document(&doc, &around);
                }
                None => println!("Page not found: '{slug}'"),
            }
        }
        Command::Search { query } => {
            let manifest = scan::scan(&cli.source)?;
            let filtered = filter::filter_nodes(&manifest.tree, &query);
            log::debug!(
                "{} of {} entries kept for '{query}'",
                filter::count_nodes(&filtered),
                filter::count_nodes(&manifest.tree)
            );
            output::print_search_output(&filtered, &query);
        }
        Command::Build => {
            println!("==> Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr. Without `-v` the level comes from `RUST_LOG`,
/// defaulting to warnings.
fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: config can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
