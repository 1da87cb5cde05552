//! Level tooling for PLATA
//!
//! Usage:
//!   cargo xtask pack-level <in> <out>     # Validate a level and write it brotli-compressed
//!   cargo xtask unpack-level <in> <out>   # Validate a level and write it as plain RON
//!
//! Both commands accept plain or compressed input and refuse levels the
//! game would reject.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plata::world::{level_to_ron, load_level, save_level, Level};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Level tooling for PLATA")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a level file
    PackLevel {
        input: PathBuf,
        output: PathBuf,
    },
    /// Decompress a level file to plain RON
    UnpackLevel {
        input: PathBuf,
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::PackLevel { input, output } => pack_level(&input, &output),
        Commands::UnpackLevel { input, output } => unpack_level(&input, &output),
    }
}

fn read_level(path: &Path) -> Result<Level> {
    load_level(path).with_context(|| format!("Failed to load level {}", path.display()))
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Validate a level and write it compressed
fn pack_level(input: &Path, output: &Path) -> Result<()> {
    let level = read_level(input)?;
    create_parent_dir(output)?;
    save_level(&level, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Packed '{}' {} -> {} ({} -> {} bytes)",
        level.map.name,
        input.display(),
        output.display(),
        file_size(input),
        file_size(output)
    );
    Ok(())
}

/// Validate a level and write it as plain RON
fn unpack_level(input: &Path, output: &Path) -> Result<()> {
    let level = read_level(input)?;
    let text = level_to_ron(&level).context("Failed to serialize level")?;
    create_parent_dir(output)?;
    std::fs::write(output, &text)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Unpacked '{}' {} -> {} ({} bytes)",
        level.map.name,
        input.display(),
        output.display(),
        text.len()
    );
    Ok(())
}
