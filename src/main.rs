use anyhow::Context;
use autochek_scout::scrapers::Interrupt;
use autochek_scout::{output, AutochekScraper, ScrapeError, ScraperConfig, SearchOutcome};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Scrape vehicle listings from Autochek Nigeria
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Vehicle make (e.g. Toyota)
    #[arg(long)]
    make: String,

    /// Vehicle model (e.g. Corolla)
    #[arg(long)]
    model: String,

    /// Vehicle year (e.g. 2015)
    #[arg(long)]
    year: u16,

    /// Output file (.json or .csv)
    #[arg(long)]
    out: PathBuf,

    /// Additional CSV output file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between page requests, in seconds
    #[arg(long)]
    rate_limit: Option<f64>,

    /// Show the browser window
    #[arg(long)]
    no_headless: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ScrapeError>() {
            Some(ScrapeError::Interrupted) => {
                warn!("⚠️  Scraping interrupted by user");
                ExitCode::from(130)
            }
            _ => {
                error!("❌ Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => ScraperConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ScraperConfig::default(),
    };
    if let Some(rate_limit) = cli.rate_limit {
        config.rate_limit_secs = rate_limit;
    }
    if cli.no_headless {
        config.headless = false;
    }

    info!("🚗 Autochek Scout - {} {} {}", cli.make, cli.model, cli.year);

    // Ctrl-C stops the crawl before the next page
    let interrupt = Interrupt::new();
    let handle = interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.trigger();
        }
    });

    let (make, model, year) = (cli.make.clone(), cli.model.clone(), cli.year);
    let outcome = tokio::task::spawn_blocking(move || {
        let scraper = AutochekScraper::new(config)?.with_interrupt(interrupt);
        scraper.search(&make, &model, year)
    })
    .await
    .context("Search task panicked")??;

    if let SearchOutcome::Degraded { cause, .. } = &outcome {
        warn!("Browser scraping failed ({}); results are a placeholder", cause);
    }
    let listings = outcome.into_listings();
    if listings.is_empty() {
        warn!("No vehicles found matching the criteria");
    }

    if let Some(csv) = &cli.csv {
        output::write_csv(&listings, csv)?;
    }
    output::write(&listings, &cli.out)?;

    // Display results
    println!("\n✅ Successfully scraped {} vehicles", listings.len());
    if let Some(csv) = &cli.csv {
        println!("📁 Results saved to CSV: {}", csv.display());
    }
    println!("📁 Results saved to {}", cli.out.display());

    for (i, listing) in listings.iter().take(5).enumerate() {
        println!(
            "{}. {} {} {} ({} {})",
            i + 1,
            listing.make.as_deref().unwrap_or("?"),
            listing.model.as_deref().unwrap_or("?"),
            listing.year.map(|y| y.to_string()).unwrap_or_default(),
            listing.price.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            listing.currency
        );
        if let Some(url) = &listing.listing_url {
            println!("   URL: {}", url);
        }
    }

    Ok(())
}
