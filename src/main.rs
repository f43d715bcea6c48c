//! # GEDCOM Rotor CLI (`gedr`)
//!
//! The `gedr` binary runs the family-unit rotation pipeline and offers
//! a couple of inspection commands for working on a GEDCOM file.
//!
//! ## Usage
//!
//! ```bash
//! gedr --config ./gedr.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gedr run` | One pipeline run: refresh cache if stale, rotate `current.json` |
//! | `gedr eligible` | List individuals eligible as display subjects |
//! | `gedr show <id>` | Print one extracted family unit as JSON |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gedcom_rotor::{config, eligible, extract, gedcom, pipeline};

/// GEDCOM Rotor — extracts family units from a GEDCOM file and rotates
/// one per run into a display-ready JSON document.
#[derive(Parser)]
#[command(
    name = "gedr",
    about = "GEDCOM Rotor — rotate one displayable family unit per run from a GEDCOM file",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Relative paths inside the config (source file, output directory)
    /// are resolved against the config file's own directory.
    #[arg(long, global = true, default_value = "./gedr.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once.
    ///
    /// Rebuilds the family-unit cache when the source file's content
    /// hash has changed, then selects one family unit (avoiding the
    /// previous run's selection) and writes the output document.
    Run {
        /// Ignore the cached hash — re-parse and rebuild from scratch.
        #[arg(long)]
        rebuild: bool,

        /// Show cache status and eligible-family counts without writing
        /// either artifact.
        #[arg(long)]
        dry_run: bool,
    },

    /// List all eligible individual ids.
    ///
    /// An individual is eligible when they have a spousal family with
    /// at least one child and at least one known parent on either side.
    Eligible,

    /// Extract and print one family unit as JSON.
    ///
    /// Prints the cached (`id`-keyed) representation. Fails when the
    /// id does not exist in the source file.
    Show {
        /// Individual xref id, e.g. `@I001@`.
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Run { rebuild, dry_run } => {
            pipeline::run(&cfg, rebuild, dry_run)?;
        }
        Commands::Eligible => {
            let store = gedcom::RecordStore::load(cfg.source_path())?;
            let ids = eligible::eligible_ids(&store);
            for id in &ids {
                println!("{}", id);
            }
            println!("{} eligible of {} individuals", ids.len(), store.individual_count());
        }
        Commands::Show { id } => {
            let store = gedcom::RecordStore::load(cfg.source_path())?;
            let unit = extract::extract(&store, &id)?;
            println!("{}", serde_json::to_string_pretty(&unit)?);
        }
    }

    Ok(())
}
