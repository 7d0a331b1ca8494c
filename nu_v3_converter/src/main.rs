//! Command-line entry point of the Nu-to-v3 turn converter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use nu_model::Snapshot;

mod files;
mod flow;
mod macros;
mod maketurn;
mod num;
mod owner;
mod pack;
mod time;

use files::Workdir;

#[derive(Parser)]
#[command(about = "Converts Planets Nu turns to and from the v3 file formats")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the v3 file tree from a downloaded turn snapshot.
    Pack {
        /// The snapshot JSON as served by the turn endpoint.
        snapshot: PathBuf,
        /// Directory to stage the files in.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Directory holding template specification files.
        #[arg(long)]
        root: Option<PathBuf>,
        /// Assemble a player<N>.rst instead of the unpacked tree.
        #[arg(long)]
        rst: bool,
    },
    /// Diff the edited tree against the snapshot and write the command
    /// document.
    Maketurn {
        snapshot: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// File name of the command document.
        #[arg(long, default_value = "commands.json")]
        out: String,
    },
    /// Write only the specification files and the combat recordings.
    Vcr {
        snapshot: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Pack {
            snapshot,
            dir,
            root,
            rst,
        } => {
            let snapshot = load_snapshot(&snapshot)?;
            let files = Workdir::new(dir, root);
            pack::run(&snapshot, &files, rst)?;
            log::info!("turn {} staged", snapshot.game.turn);
        }
        Command::Maketurn { snapshot, dir, out } => {
            let snapshot = load_snapshot(&snapshot)?;
            let files = Workdir::new(dir, None);
            let document = maketurn::run(&snapshot, &files)?;
            log::info!("{} command(s) generated", document.commands.len());
            maketurn::write_document(&document, &files, &out)?;
        }
        Command::Vcr {
            snapshot,
            dir,
            root,
        } => {
            let snapshot = load_snapshot(&snapshot)?;
            let files = Workdir::new(dir, root);
            pack::run_vcr(&snapshot, &files)?;
            log::info!("{} combat recording(s) staged", snapshot.vcrs.len());
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let text = context!(fs::read_to_string(path); "reading {}", path.display())?;
    context!(Snapshot::from_response(&text); "decoding {}", path.display())
}
