//! `darkstore` command-line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use darkstore_core::{load_app_config, AppConfig};
use darkstore_pipeline::{crawl, WaitPolicy};

mod output;
mod prompt;
mod webdriver;

use output::write_csv;
use prompt::TerminalSelections;
use webdriver::DriverSource;

#[derive(Parser)]
#[command(name = "darkstore", about = "Extract a darkstore catalog over a browser session")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a delivery address interactively, sweep the catalog, and
    /// write the extracted products as CSV.
    Crawl {
        /// Output file; overrides DARKSTORE_OUTPUT_PATH.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config().context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("parsing log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Crawl { output } => run_crawl(&config, output).await,
        Command::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

async fn run_crawl(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping after the current step");
            ctrl_c_cancel.cancel();
        }
    });

    let policy = WaitPolicy::from_config(config);
    let mut source = DriverSource::connect(config)
        .await
        .context("opening browser session")?;
    let mut selections = TerminalSelections;

    let result = crawl::run(
        &mut source,
        &mut selections,
        &policy,
        config.catalog_section_limit,
        &cancel,
    )
    .await;

    // End the session before surfacing any crawl error so the browser is
    // not left running.
    if let Err(e) = source.quit().await {
        tracing::warn!(error = %e, "failed to end browser session");
    }
    let report = result.context("crawl failed")?;

    let path = output.unwrap_or_else(|| config.output_path.clone());
    write_csv(&path, &report.products)
        .with_context(|| format!("writing {}", path.display()))?;

    for category in &report.categories {
        println!("{}: {} products", category.title, category.products);
    }
    println!(
        "Extracted {} products across {} categories into {}",
        report.products.len(),
        report.categories.len(),
        path.display()
    );
    if report.skipped_categories > 0 || report.skipped_items > 0 {
        println!(
            "Skipped {} categories and {} items; see the log for details",
            report.skipped_categories, report.skipped_items
        );
    }
    Ok(())
}
