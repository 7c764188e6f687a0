//! reddit-media-grabber - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_media_grabber::{
    cli::Args,
    config::{validate_config, Config},
    discovery::{open_source, read_candidates},
    download::{HttpFetcher, Pipeline, PipelineOptions, RunStats},
    error::{exit_codes, Error, Result},
    fs::OutputRoots,
    output::{
        create_item_bar, print_banner, print_config_summary, print_error, print_info,
        print_run_stats, print_summary, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(stats) if stats.failed > 0 => {
            print_warning(&format!("{} file(s) failed to download", stats.failed));
            ExitCode::from(exit_codes::SOME_FILES_FAILED as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                ref e if e.is_config_error() => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Input { .. } | Error::InvalidCandidate { .. } => {
                    ExitCode::from(exit_codes::INPUT_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<RunStats> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let target = config
        .target()
        .ok_or_else(|| Error::MissingConfig("target".into()))?;

    // Output folders
    let roots = OutputRoots::from_config(&config)?;
    roots.ensure()?;

    print_config_summary(&target, &roots, &config.options);

    // Candidate links
    let reader = open_source(&args.links)?;
    let candidates = read_candidates(reader, config.options.max_files)?;
    print_info(&format!("Read {} candidate link(s)", candidates.len()));

    let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
    let mut pipeline = Pipeline::new(roots, fetcher, PipelineOptions::from_config(&config));

    pipeline.discover_all(candidates).await;

    let queued = pipeline.registry().len();
    if queued == 0 {
        print_info("Nothing to download");
    }

    let progress = if config.options.show_downloads && queued > 0 {
        Some(create_item_bar(queued as u64, "Downloading"))
    } else {
        None
    };

    let stats = pipeline.download(progress.clone()).await;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    if args.quiet {
        print_summary(&stats);
    } else {
        print_run_stats(&stats);
    }

    Ok(stats)
}
