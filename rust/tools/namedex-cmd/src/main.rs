use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "namedex-cmd")]
#[command(about = "Command-line utility for letter-bucketed name directories")]
#[command(version)]
struct Cli {
    /// JSON file with index settings (page limit, buffer size, ...)
    #[arg(long, global = true)]
    index_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index of a names file and print its bucket table
    Index {
        /// Names file to index
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one page of a letter bucket
    Page {
        /// Names file to read
        file: PathBuf,

        /// Letter of the bucket to page through
        #[arg(short, long)]
        letter: String,

        /// Position within the bucket of the first record
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Maximum number of records to print
        #[arg(short = 'n', long, default_value_t = 50, allow_negative_numbers = true)]
        limit: i64,
    },

    /// List the letters that have at least one record
    Letters {
        /// Names file to index
        file: PathBuf,
    },

    /// Show the bucket of a single letter
    Bucket {
        /// Names file to index
        file: PathBuf,

        /// Letter to look up
        letter: String,
    },

    /// Index a names file and serve it over HTTP
    Serve(commands::serve::ServeArgs),

    /// Write a sorted synthetic names file
    Generate {
        /// Output file; must not exist
        output: PathBuf,

        /// Number of names to generate
        #[arg(short, long, default_value_t = 100_000)]
        count: usize,

        /// Seed of the generator
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Insert a blank line after every N names (0 disables)
        #[arg(long, default_value_t = 0)]
        blank_every: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("namedex=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    let index_config = utils::load_index_config(cli.index_config.as_deref())?;

    match cli.command {
        Commands::Index { file, json } => commands::index::run(&file, index_config, json),
        Commands::Page {
            file,
            letter,
            offset,
            limit,
        } => commands::page::run(&file, index_config, &letter, offset, limit),
        Commands::Letters { file } => commands::letters::run(&file, index_config),
        Commands::Bucket { file, letter } => commands::bucket::run(&file, index_config, &letter),
        Commands::Serve(args) => commands::serve::run(args, index_config),
        Commands::Generate {
            output,
            count,
            seed,
            blank_every,
        } => commands::generate::run(&output, count, seed, blank_every),
    }
}
