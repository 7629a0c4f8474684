//! Command-line converter for web2pdf.
//!
//! Runs the same conversion pipeline as the HTTP service, without a server.
//!
//! # Usage
//!
//! ```bash
//! # Convert one page (file name derived from the URL)
//! cargo run --bin web2pdf-cli -- convert https://example.com/docs/intro
//!
//! # Convert a list of URLs (one per line) into a ZIP archive
//! cargo run --bin web2pdf-cli -- batch urls.txt -o pages.zip
//! ```
//!
//! # Environment Variables
//!
//! Browser settings are read the same way as for the server
//! (`CHROME_EXECUTABLE`, `NAVIGATION_TIMEOUT_SECS`, `PAGE_FORMAT`, ...).

use web2pdf::application::services::ConversionService;
use web2pdf::config::{self, Config};
use web2pdf::domain::entities::{BatchOutcome, ConversionStatus};
use web2pdf::infrastructure::browser::ChromiumRenderer;
use web2pdf::logging;
use web2pdf::utils::url_list::parse_url_list;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Convert web pages to PDF from the command line.
#[derive(Parser)]
#[command(name = "web2pdf-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Overwrite existing output files without asking
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single URL into a PDF file
    Convert {
        /// Page to render
        url: String,

        /// Output file (defaults to a name derived from the URL)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every URL listed in a text file into one ZIP archive
    Batch {
        /// Text file with one URL per line
        input: PathBuf,

        /// Output archive
        #[arg(short, long, default_value = "webpages.zip")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    logging::init("warn", &config.log_format);

    let service = build_service(&config);

    match cli.command {
        Commands::Convert { url, output } => convert(&service, &url, output, cli.yes).await?,
        Commands::Batch { input, output } => batch(&service, &input, &output, cli.yes).await?,
    }

    Ok(())
}

fn build_service(config: &Config) -> ConversionService {
    let renderer = Arc::new(ChromiumRenderer::new(config.browser_options()));
    ConversionService::new(renderer, config.max_batch_urls)
}

/// Renders one URL and writes the PDF.
async fn convert(
    service: &ConversionService,
    url: &str,
    output: Option<PathBuf>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{} {}", "Rendering".bright_blue().bold(), url.cyan());

    let pdf = service
        .convert_single(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to convert {}: {}", url, e))?;

    let path = output.unwrap_or_else(|| PathBuf::from(&pdf.file_name));
    if !confirm_overwrite(&path, skip_confirm)? {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    tokio::fs::write(&path, &pdf.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {} ({} bytes)",
        "Saved".green().bold(),
        path.display().to_string().bright_white(),
        pdf.bytes.len()
    );

    Ok(())
}

/// Renders every URL from `input` and writes the archive.
///
/// Exits with an error if no URL could be converted.
async fn batch(
    service: &ConversionService,
    input: &Path,
    output: &Path,
    skip_confirm: bool,
) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let urls = parse_url_list(&text);

    if !confirm_overwrite(output, skip_confirm)? {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    println!(
        "{} {} URLs",
        "Rendering".bright_blue().bold(),
        urls.len().to_string().bright_white()
    );

    let outcome = service
        .convert_batch(&urls)
        .await
        .map_err(|e| anyhow::anyhow!("Batch failed: {}", e))?;

    tokio::fs::write(output, &outcome.archive)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_report(&outcome);

    let summary = outcome.summary();
    if summary.successful == 0 {
        anyhow::bail!("All {} URLs failed", summary.total);
    }

    println!(
        "{} {}",
        "Saved".green().bold(),
        output.display().to_string().bright_white()
    );

    Ok(())
}

/// Prints per-URL status lines followed by a summary.
///
/// # Output Format
///
/// ```text
///   DONE   https://a.test/x  ->  x-1.pdf
///   ERROR  https://a.test/y  ->  Navigation failed: net::ERR_NAME_NOT_RESOLVED
///
///   2 total, 1 converted, 1 failed
/// ```
fn print_report(outcome: &BatchOutcome) {
    println!();
    for result in &outcome.results {
        match result.status {
            ConversionStatus::Done => println!(
                "  {:<6} {}  ->  {}",
                "DONE".green(),
                result.url.cyan(),
                result.file_name.as_deref().unwrap_or_default().bright_white()
            ),
            ConversionStatus::Error => println!(
                "  {:<6} {}  ->  {}",
                "ERROR".red(),
                result.url.cyan(),
                result.error.as_deref().unwrap_or_default().bright_black()
            ),
        }
    }

    let summary = outcome.summary();
    println!();
    println!(
        "  {} total, {} converted, {} failed",
        summary.total,
        summary.successful.to_string().green(),
        summary.failed.to_string().red()
    );
    println!();
}

/// Asks before replacing an existing file unless `skip_confirm` is set.
fn confirm_overwrite(path: &Path, skip_confirm: bool) -> Result<bool> {
    if skip_confirm || !path.exists() {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;

    Ok(confirmed)
}
