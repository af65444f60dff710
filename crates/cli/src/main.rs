use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colligo_core::{
    FetchConfig, Fetcher, ImportConfig, SlideshowMode, import_english_collection, import_multilanguage_slideshows,
    write_package,
};
use owo_colors::OwoColorize;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Import media collections and emit a content channel package
#[derive(Parser, Debug)]
#[command(name = "colligo")]
#[command(author = "Colligo Contributors")]
#[command(version = VERSION)]
#[command(about = "Import media collections as content channels", long_about = None)]
struct Args {
    /// Package output directory
    #[arg(short, long, default_value = "channel", value_name = "DIR")]
    output: PathBuf,

    /// Directory where assembled PDFs are cached
    #[arg(long, default_value = "documents", value_name = "DIR")]
    documents_dir: PathBuf,

    /// Emit native slideshow nodes instead of PDF documents
    #[arg(long)]
    slides: bool,

    /// Only import the named language from the multi-language collection
    #[arg(long, value_name = "NAME")]
    language: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Maximum retries for transient network failures
    #[arg(long, default_value = "3", value_name = "NUM")]
    retries: u32,

    /// Scrape and summarize without writing the package
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("colligo_core=debug")),
            )
            .with_writer(std::io::stderr)
            .init();

        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .unwrap_or_else(|| "Mozilla/5.0 (compatible; Colligo/1.0)".to_string()),
        max_retries: args.retries,
        ..Default::default()
    };
    let fetcher = Fetcher::new(fetch_config).context("Failed to create HTTP client")?;

    let config = ImportConfig {
        documents_dir: args.documents_dir,
        mode: if args.slides { SlideshowMode::Slides } else { SlideshowMode::Document },
        language_filter: args.language,
        ..Default::default()
    };

    let mut channel = config.channel_skeleton();

    if args.verbose {
        echo::print_step(
            1,
            4,
            &format!("Importing from {}", config.english_collection_url.bright_white().underline()),
        );
    }
    import_english_collection(&fetcher, &config, &mut channel)
        .await
        .context("Failed to import the English collection")?;

    if args.verbose {
        echo::print_step(
            2,
            4,
            &format!("Importing from {}", config.slideshows_url.bright_white().underline()),
        );
    }
    import_multilanguage_slideshows(&fetcher, &config, &mut channel)
        .await
        .context("Failed to import the multi-language collection")?;

    if args.verbose {
        echo::print_step(3, 4, "Validating channel");
    }
    channel.validate().context("Channel failed validation")?;

    let summary = channel.summary();
    if args.verbose {
        echo::print_channel_summary(&summary);
    }

    if args.dry_run {
        println!(
            "{}: {} topics, {} slideshows, {} documents, {} videos ({} nodes)",
            channel.title,
            summary.topics,
            summary.slideshows,
            summary.documents,
            summary.videos,
            summary.total()
        );
        echo::print_info("Dry run, nothing written");
        return Ok(());
    }

    if args.verbose {
        echo::print_step(4, 4, "Writing package");
    }
    let report = write_package(channel, &args.output)
        .with_context(|| format!("Failed to write package to {}", args.output.display()))?;

    if args.verbose && report.files_skipped > 0 {
        echo::print_info(&format!("{} unchanged document(s) skipped", report.files_skipped));
    }
    echo::print_success(&format!("Package written to {}", args.output.display().bright_white()));

    Ok(())
}
