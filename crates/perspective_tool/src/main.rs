//! Perspective command-line tool
//!
//! Checks, reformats, packs and unpacks Perspective puzzle and world files.
//!
//! Run with: cargo run -p perspective_tool -- check puzzles/*.txt

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use config::{SchemaChoice, ToolConfig};

/// Perspective puzzle and world file tool
#[derive(Parser)]
#[command(name = "perspective")]
#[command(version)]
#[command(about = "Check, convert and pack Perspective puzzle and world files")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to $PERSPECTIVE_CONFIG or ./perspective.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode puzzle files and summarise them
    Check {
        #[arg(required = true)]
        puzzles: Vec<PathBuf>,
    },
    /// Re-encode a puzzle file
    Fmt {
        puzzle: PathBuf,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output schema, overrides the config
        #[arg(long, value_enum)]
        schema: Option<SchemaChoice>,
    },
    /// Build a world file from puzzle files
    Pack {
        world: PathBuf,
        puzzles: Vec<PathBuf>,
        /// World name, defaults to the config or the file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Write each puzzle of a world file to a directory
    Unpack { world: PathBuf, dir: PathBuf },
    /// Print a world file as JSON
    Dump { world: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ToolConfig::load(cli.config.as_deref());

    // Initialize logging
    let default_level = match cli.verbose {
        0 => config
            .as_ref()
            .ok()
            .and_then(|c| c.log_level.clone())
            .unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &config.config_path {
        log::info!("Loaded config from {}", path.display());
    }
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::Check { puzzles } => commands::check(&puzzles, &mut out),
        Commands::Fmt {
            puzzle,
            output,
            schema,
        } => commands::fmt(
            &puzzle,
            output.as_deref(),
            schema.unwrap_or(config.schema),
            &mut out,
        ),
        Commands::Pack {
            world,
            puzzles,
            name,
        } => commands::pack(&world, &puzzles, name.as_deref(), &config),
        Commands::Unpack { world, dir } => commands::unpack(&world, &dir).map(|written| {
            for path in written {
                log::debug!("Wrote {}", path.display());
            }
        }),
        Commands::Dump { world } => commands::dump(&world, &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
