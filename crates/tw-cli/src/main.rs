//! CLI frontend for the Taleweaver story engine.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tw_engine::config::DEFAULT_DIE_SIDES;

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Taleweaver: play and check branching room-based stories",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story file (JSON)
        story: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pause between requesting and committing a roll, in milliseconds
        #[arg(long, default_value = "600")]
        roll_delay_ms: u64,

        /// Start in this room instead of the story's start room
        #[arg(long)]
        start: Option<String>,

        /// Show room ids, loot labels and diagnostics each turn
        #[arg(short, long)]
        debug: bool,

        /// Write the transition journal as JSON when the session ends
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },

    /// Validate a story and report problems
    Check {
        /// Story file (JSON)
        story: PathBuf,

        /// Faces on the die used for coverage checks
        #[arg(long, default_value_t = DEFAULT_DIE_SIDES)]
        die_sides: u32,
    },

    /// List the rooms of a story
    Rooms {
        /// Story file (JSON)
        story: PathBuf,
    },

    /// Show every version of a room
    Show {
        /// Story file (JSON)
        story: PathBuf,

        /// Room id
        room: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Play {
            story,
            seed,
            roll_delay_ms,
            start,
            debug,
            journal,
        } => commands::play::run(
            &story,
            commands::play::PlayOptions {
                seed,
                roll_delay_ms,
                start,
                debug,
                journal,
            },
        ),
        Commands::Check { story, die_sides } => commands::check::run(&story, die_sides),
        Commands::Rooms { story } => commands::rooms::run(&story),
        Commands::Show { story, room } => commands::show::run(&story, &room),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
