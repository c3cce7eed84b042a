//! Tradus - Structure-Preserving File Translation
//!
//! Command line entry point: translates subtitle and JSON files with the
//! configured backend and writes `*_translated` copies next to them.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use tradus::cli::{Args, Commands};
use tradus::config::Config;
use tradus::languages::language_code_to_name;
use tradus::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    let default_target = config.languages.default_target.clone();
    let workflow = Workflow::new(config);

    match args.command {
        Commands::Translate { input, target_lang, output_dir } => {
            let target = target_lang.unwrap_or(default_target);
            let (output_path, translated) = workflow
                .process_file(&input, &target, output_dir.as_ref())
                .await?;

            println!("Translated {} -> {}", input.display(), output_path.display());
            println!("Content type: {}", translated.mime_type());
            println!("Summary: {}", translated.summary);
            for failure in &translated.summary.failures {
                println!("  kept source text at {}: {}", failure.location, failure.reason);
            }
        }
        Commands::Batch { input_dir, target_lang, output_dir } => {
            let target = target_lang.unwrap_or(default_target);
            let report = workflow
                .process_directory(&input_dir, &target, output_dir.as_ref())
                .await?;

            println!(
                "Processed {} files ({} failed, {} units kept in source language)",
                report.processed, report.failed, report.fell_back_units
            );
        }
        Commands::Languages => {
            println!("\nTarget Languages:");
            println!("{:<8} {:<20} {:<20}", "Code", "Name", "English");
            println!("{}", "-".repeat(48));

            for option in &workflow.config().languages.options {
                let marker = if option.code == default_target { " (default)" } else { "" };
                println!("{:<8} {:<20} {:<20}{}",
                    option.code, option.name, language_code_to_name(&option.code), marker);
            }
        }
        Commands::Check { target_lang } => {
            let target = target_lang.unwrap_or(default_target);
            let provider = workflow.config().backend.provider;
            workflow.check_backend(&target).await?;
            println!("Backend {:?} is available for '{}'", provider, target);
        }
        Commands::InitConfig { output } => {
            workflow.config().save_to_file(&output)?;
            println!("Wrote configuration to {}", output.display());
        }
    }

    info!("Tradus completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".tradus").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "tradus.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("tradus.log").display());

    Ok(())
}
