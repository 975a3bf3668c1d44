//! Command-line table for the Trespasser rules engine.
//!
//! Loads a JSON roster of actors, runs the derived-stats pass, and rolls
//! challenges and attacks against it.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tres",
    about = "Trespasser rules at the command line",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file with rule constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute resource ceilings and roll over minor wounds
    Derive {
        /// Roster file
        roster: PathBuf,

        /// Save the derived values back to the roster
        #[arg(short, long)]
        write: bool,
    },

    /// Roll a challenge on one of an actor's stats
    Challenge {
        /// Roster file
        roster: PathBuf,

        /// Actor name
        #[arg(short, long)]
        actor: String,

        /// Stat to test (default from config: knowledge)
        #[arg(short, long)]
        stat: Option<String>,

        /// Boons, 0 to 3
        #[arg(long, default_value = "0")]
        boons: String,

        /// Banes, 0 to 3
        #[arg(long, default_value = "0")]
        banes: String,

        /// Flat modifier, e.g. +2
        #[arg(long, default_value = "+0", allow_hyphen_values = true)]
        modifier: String,
    },

    /// Attack with a weapon, optionally against a target
    Attack {
        /// Roster file
        roster: PathBuf,

        /// Attacking actor name
        #[arg(short, long)]
        actor: String,

        /// Weapon name
        #[arg(short, long)]
        weapon: Option<String>,

        /// Defending actor name
        #[arg(short, long)]
        target: Option<String>,

        /// Save wounds and spent charges back to the roster
        #[arg(long)]
        write: bool,
    },

    /// List the registered sheets
    Sheets,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tres=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match commands::load_config(cli.config.as_deref(), cli.seed) {
        Err(e) => Err(e),
        Ok(config) => match cli.command {
            Commands::Derive { roster, write } => commands::derive::run(&roster, write),
            Commands::Challenge {
                roster,
                actor,
                stat,
                boons,
                banes,
                modifier,
            } => {
                let form = tres_mechanics::RollForm {
                    boons,
                    banes,
                    modifier,
                };
                commands::challenge::run(&roster, config, &actor, stat.as_deref(), form).await
            }
            Commands::Attack {
                roster,
                actor,
                weapon,
                target,
                write,
            } => {
                let args = commands::attack::AttackArgs {
                    actor,
                    weapon,
                    target,
                    write,
                };
                commands::attack::run(&roster, config, &args).await
            }
            Commands::Sheets => commands::sheets::run(),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}
