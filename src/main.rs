use chrono::Utc;
use clap::{Parser, Subcommand};
use realty_site::config;
use realty_site::content::ContentStore;
use realty_site::generate;
use realty_site::index::CrawlerPolicy;
use realty_site::metadata::SiteContext;
use realty_site::output;
use realty_site::render;
use realty_site::resolve::Route;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "realty-site")]
#[command(about = "Static site generator for real-estate agent marketing sites")]
#[command(long_about = "\
Static site generator for real-estate agent marketing sites

JSON records become pages with SEO metadata and schema.org structured data.
Every build also writes sitemap.xml and a robots.txt crawler policy.

Content structure:

  content/
  ├── config.toml          # Site config (optional, merged onto stock defaults)
  ├── businesses.json      # Business profiles → /business/{slug}
  ├── blog-posts.json      # Blog posts → /blog/{slug}
  ├── faq.json             # FAQ entries → /faq (optional)
  ├── about.md             # About page body (optional, else agent bio)
  └── assets/              # Static assets (favicon, images) → copied to output root

Routes: /  /about  /faq  /blog  /blog/{slug}  /business/{slug}

Run 'realty-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page, the sitemap and robots.txt
    Build,
    /// Validate config and content without building
    Check,
    /// Print the HTML for one site path (exit code 1 if it does not resolve)
    Render {
        /// Site path, e.g. /business/brenda-devlin-real-estate
        path: String,
    },
    /// Show whether a crawler may fetch the site
    Robots {
        /// Crawler user agent, e.g. GPTBot
        agent: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            println!(
                "==> Building {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(&cli.source, &cli.output, &site_config, Utc::now())?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let store = ContentStore::load(&cli.source)?;
            let ctx = SiteContext::new(&site_config, &store)?;
            output::print_check_output(&ctx);
            println!("==> Content is valid");
        }
        Command::Render { path } => {
            let site_config = config::load_config(&cli.source)?;
            let store = ContentStore::load(&cli.source)?;
            let ctx = SiteContext::new(&site_config, &store)?;
            match render::render_route(&ctx, &Route::parse(&path)) {
                Ok(markup) => println!("{}", markup.into_string()),
                Err((not_found, markup)) => {
                    println!("{}", markup.into_string());
                    eprintln!("{not_found}");
                    std::process::exit(1);
                }
            }
        }
        Command::Robots { agent } => {
            let site_config = config::load_config(&cli.source)?;
            let access = CrawlerPolicy::from_config(&site_config).evaluate(&agent);
            println!(
                "{}",
                output::format_crawler_verdict(&site_config, &agent, access)
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
