use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use commands::{
    bins::{self, BinsArgs},
    load::{self, LoadArgs},
};
use log::debug;
use wepc_core::{segment_from_json, Segment};
use wepc_load::LoaderKind;
use wepc_system::{SystemConfig, WeSystem};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "wepc", about = "Weighted-ensemble progress-coordinate loaders")]
struct Cli {
    /// YAML system configuration; built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a raw coordinate file as a state-tracked progress coordinate.
    Pcoord(LoadArgs),
    /// Load a Cartesian coordinate dump into a segment dataset.
    Coords(LoadArgs),
    /// Load an engine log table into a segment dataset.
    Log(LoadArgs),
    /// Describe the bin mapper or assign a segment's frames to bins.
    Bins(BinsArgs),
    /// Print the effective configuration as YAML.
    Config,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let system = load_system(cli.config.as_deref())?;
    match cli.command {
        Command::Pcoord(args) => load::run(&system, LoaderKind::PcoordColor, &args),
        Command::Coords(args) => load::run(&system, LoaderKind::Coords, &args),
        Command::Log(args) => load::run(&system, LoaderKind::Log, &args),
        Command::Bins(args) => bins::run(&system, &args),
        Command::Config => {
            print!("{}", system.config().to_yaml()?);
            Ok(())
        }
    }
}

fn load_system(path: Option<&Path>) -> Result<WeSystem, Box<dyn Error>> {
    let config = match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            SystemConfig::load(path)?
        }
        None => SystemConfig::default(),
    };
    Ok(WeSystem::initialize(config)?)
}

fn read_segment(path: &Path) -> Result<Segment, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    Ok(segment_from_json(&json)?)
}

fn emit_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
