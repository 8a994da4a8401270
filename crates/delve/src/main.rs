//! delve: generate a dungeon layout from the command line
//!
//! Prints the tile grid as text, or the whole dungeon as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use delve_core::dungeon::FixedRoom;
use delve_core::{CorridorType, DungeonConfig, DungeonGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// ASCII map, one line per row
    Text,
    /// Full dungeon as JSON
    Json,
}

/// BSP dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a seeded BSP dungeon layout", long_about = None)]
struct Args {
    /// JSON configuration file (defaults apply to missing fields)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// JSON array of fixed-room descriptors
    #[arg(short = 'f', long = "fixed-rooms")]
    fixed_rooms: Option<PathBuf>,

    /// Random seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Map width
    #[arg(long = "width")]
    width: Option<i32>,

    /// Map height
    #[arg(long = "height")]
    height: Option<i32>,

    /// Corridor strategy (direct, bsp, mst)
    #[arg(long = "corridor")]
    corridor: Option<CorridorType>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Verbose logging to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_config(args: &Args) -> Result<DungeonConfig> {
    let mut config: DungeonConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => DungeonConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(corridor) = args.corridor {
        config.corridor_type = corridor;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    debug!(?config, "configuration loaded");

    let fixed_rooms: Vec<FixedRoom> = match &args.fixed_rooms {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let generator = DungeonGenerator::new(config)
        .context("Invalid configuration")?
        .with_fixed_rooms(fixed_rooms)
        .context("Invalid fixed rooms")?;
    let dungeon = generator.generate();

    match args.format {
        Format::Text => print!("{}", dungeon.render_ascii()),
        Format::Json => {
            let json = serde_json::to_string_pretty(&dungeon).context("Failed to encode dungeon")?;
            println!("{json}");
        }
    }

    Ok(())
}
