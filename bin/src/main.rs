//! chicama CLI - TAQ tick decoding and daily microstructure features.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "chicama")]
#[command(about = "TAQ tick decoding and daily microstructure features", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the per-feature date x stock tables from a tree of daily
    /// quote files
    Features {
        /// Directory holding one YYYYMMDD subdirectory per date
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output directory. Files named <feature>.<format>
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Comma-separated symbol list. Defaults to listing each date
        /// directory
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Maximum concurrent (stock, date) units
        #[arg(long, default_value = "8")]
        concurrency: usize,
    },

    /// Decode one tick file and print its header and first records
    Inspect {
        /// Path to a gzip-compressed tick file
        file: PathBuf,

        /// Decode as a trade file instead of a quote file
        #[arg(long)]
        trade: bool,

        /// Number of records to print
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Re-emit a trade file as flat absolute-timestamped records
    Rewrite {
        /// Path to a gzip-compressed trade file
        file: PathBuf,

        /// Output path for the re-emitted stream
        #[arg(short, long)]
        out: PathBuf,

        /// Numeric instrument identifier stamped on each record
        #[arg(long)]
        instrument_id: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Features {
            data_dir,
            out_dir,
            symbols,
            format,
            concurrency,
        } => {
            commands::features::features(&data_dir, &out_dir, &symbols, format, concurrency, cli.quiet)
                .await
        }
        Commands::Inspect { file, trade, limit } => commands::inspect::inspect(&file, trade, limit),
        Commands::Rewrite {
            file,
            out,
            instrument_id,
        } => commands::rewrite::rewrite(&file, &out, instrument_id),
    }
}
