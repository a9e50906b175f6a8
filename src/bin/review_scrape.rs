//! Scrape reviews into a JSON-lines file and clean stored reviews.
//!
//! ```bash
//! review_scrape scrape --url https://www.imdb.com/title/tt1375666/reviews
//! review_scrape scrape-file saved_page.html --url https://www.imdb.com/title/tt1375666/reviews
//! review_scrape clean
//! ```
//!
//! Settings can also come from the environment or a `.env` file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use review_scraper::clean::{clean_records, CleanedRecord};
use review_scraper::store::{append_jsonl, read_jsonl, JsonlStore};
use review_scraper::{
    scrape_into, ChromeLoader, DocumentSource, HtmlSource, ScrapeOptions, ScrapedRecord, DEFAULT_URL,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "review_scrape")]
#[command(about = "Scrape movie reviews and prepare them for sentiment analysis", long_about = None)]
struct Cli {
    /// Log per-step detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a live page in headless Chrome and store its reviews
    Scrape(ScrapeArgs),

    /// Extract reviews from a saved HTML page
    ScrapeFile(ScrapeFileArgs),

    /// Normalize stored review text for the classifier
    Clean(CleanArgs),
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// Review page to scrape
    #[arg(long, env = "REVIEW_SCRAPER_URL", default_value = DEFAULT_URL)]
    url: String,

    /// JSON-lines file scraped reviews are appended to
    #[arg(long, env = "REVIEW_SCRAPER_OUT", default_value = "scraped_reviews.jsonl")]
    out: PathBuf,

    /// Seconds to wait after navigation before settling the page
    #[arg(long, env = "REVIEW_SCRAPER_SETTLE_WAIT", default_value_t = 5)]
    settle_wait: u64,

    /// Navigation timeout in seconds
    #[arg(long, env = "REVIEW_SCRAPER_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Launch Chrome without its sandbox (needed in some containers)
    #[arg(long, env = "REVIEW_SCRAPER_NO_SANDBOX")]
    no_sandbox: bool,

    /// Override the browser user agent
    #[arg(long, env = "REVIEW_SCRAPER_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Args, Debug)]
struct ScrapeFileArgs {
    /// Saved HTML page
    path: PathBuf,

    /// URL recorded as the reviews' source
    #[arg(long, env = "REVIEW_SCRAPER_URL", default_value = DEFAULT_URL)]
    url: String,

    /// JSON-lines file scraped reviews are appended to
    #[arg(long, env = "REVIEW_SCRAPER_OUT", default_value = "scraped_reviews.jsonl")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Scraped reviews to clean
    #[arg(long, env = "REVIEW_SCRAPER_OUT", default_value = "scraped_reviews.jsonl")]
    input: PathBuf,

    /// JSON-lines file cleaned reviews are appended to
    #[arg(long, env = "REVIEW_SCRAPER_CLEANED", default_value = "cleaned_reviews.jsonl")]
    output: PathBuf,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,review_scraper=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Scrape(args) => {
            let options = ScrapeOptions {
                url: args.url,
                settle_wait: Duration::from_secs(args.settle_wait),
                navigation_timeout: Duration::from_secs(args.timeout),
                headless: !args.headed,
                sandbox: !args.no_sandbox,
                user_agent: args.user_agent.unwrap_or_else(|| ScrapeOptions::default().user_agent),
                ..ScrapeOptions::default()
            };
            let loader = ChromeLoader::new(options.clone());
            scrape_to_file(&loader, &options, &args.out)
        }
        Commands::ScrapeFile(args) => {
            let options = ScrapeOptions {
                url: args.url,
                ..ScrapeOptions::default()
            };
            scrape_to_file(&HtmlSource::from_file(&args.path), &options, &args.out)
        }
        Commands::Clean(args) => clean_file(&args.input, &args.output),
    }
}

fn scrape_to_file<S: DocumentSource>(source: &S, options: &ScrapeOptions, out: &Path) -> Result<()> {
    let mut store = JsonlStore::open(out)
        .with_context(|| format!("failed to open review store {}", out.display()))?;
    let records = scrape_into(source, options, &mut store)
        .with_context(|| format!("failed to scrape {}", options.url))?;
    tracing::info!(path = %store.path().display(), "review store updated");
    println!("Successfully scraped {} reviews with titles.", records.len());
    Ok(())
}

fn clean_file(input: &Path, output: &Path) -> Result<()> {
    let scraped: Vec<ScrapedRecord> = read_jsonl(input)
        .with_context(|| format!("failed to read scraped reviews from {}", input.display()))?;
    let existing: Vec<CleanedRecord> = read_jsonl(output)
        .with_context(|| format!("failed to read cleaned reviews from {}", output.display()))?;
    let first_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;

    let cleaned = clean_records(&scraped, first_id);
    append_jsonl(output, &cleaned)
        .with_context(|| format!("failed to write cleaned reviews to {}", output.display()))?;
    println!("Successfully cleaned and saved {} reviews.", cleaned.len());
    Ok(())
}
