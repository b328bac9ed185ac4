//! HueShift CLI: drive the emotion pipeline from the command line.
//!
//! Usage:
//!   hueshift listen [OPTIONS]        Read JSONL events from stdin, emit hues
//!   hueshift replay <EVENTS>         Run a recorded JSONL session
//!   hueshift resolve <NAME>...       Show how parameter names resolve
//!   hueshift check                   Validate config and profile
//!   hueshift init-config             Write the default config

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hueshift_common::config::AppConfig;
use hueshift_common::logging::{init_logging, level_for_verbosity};

mod commands;

use commands::ProcessingArgs;

#[derive(Parser)]
#[command(
    name = "hueshift",
    about = "Facial-tracking parameters in, emotion hue out",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/hueshift/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Expression profile JSON (default: from config, else built-in)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read JSONL parameter events from stdin and emit hues
    Listen {
        /// Write emissions to this file instead of stdout
        #[arg(short, long)]
        emissions: Option<PathBuf>,

        /// Log emissions instead of writing them
        #[arg(long)]
        log_only: bool,

        /// Stamp emissions with event timestamps when present
        #[arg(long)]
        event_time: bool,

        #[command(flatten)]
        processing: ProcessingArgs,
    },

    /// Run a recorded JSONL session through the pipeline
    Replay {
        /// Path to the events file
        events: PathBuf,

        /// Write emissions to this file instead of stdout
        #[arg(short, long)]
        emissions: Option<PathBuf>,

        #[command(flatten)]
        processing: ProcessingArgs,
    },

    /// Show how parameter names resolve
    Resolve {
        /// Names or addresses to resolve
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Validate config and profile
    Check,

    /// Write the default config file
    InitConfig {
        /// Output path (default: the standard config location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the built-in expression profile here
        #[arg(long)]
        profile_output: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose || cli.quiet {
        logging.level = level_for_verbosity(cli.verbose, cli.quiet).to_string();
    }
    init_logging(&logging);

    if let Some(profile) = cli.profile {
        config.profile = Some(profile);
    }

    match cli.command {
        Commands::Listen {
            emissions,
            log_only,
            event_time,
            processing,
        } => {
            processing.apply(&mut config.processing);
            commands::listen::run(config, emissions, log_only, event_time).await
        }
        Commands::Replay {
            events,
            emissions,
            processing,
        } => {
            processing.apply(&mut config.processing);
            commands::replay::run(config, events, emissions)
        }
        Commands::Resolve { names } => commands::resolve::run(config, names),
        Commands::Check => commands::check::run(config),
        Commands::InitConfig {
            output,
            profile_output,
            force,
        } => commands::init_config::run(output, profile_output, force),
    }
}
