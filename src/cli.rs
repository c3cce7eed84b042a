use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a single subtitle (.srt) or JSON file
    Translate {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Target language code (defaults to the configured one)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Translate every .srt and .json file in a directory
    Batch {
        /// Input directory
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Target language code (defaults to the configured one)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Output directory (defaults to the input directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List the configured target languages
    Languages,

    /// Check that the translation backend is reachable
    Check {
        /// Target language code used for the check
        #[arg(short, long)]
        target_lang: Option<String>,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}
