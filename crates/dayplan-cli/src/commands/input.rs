//! Reading block lists and printing results.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use dayplan_core::{validate_blocks, Block};
use serde::Serialize;

/// Where to read the day's blocks from.
#[derive(Args, Debug)]
pub struct BlocksInput {
    /// JSON file with an array of blocks (stdin when omitted or "-")
    #[arg(short, long, value_name = "FILE")]
    pub blocks: Option<PathBuf>,
}

impl BlocksInput {
    /// Read, parse and validate the block list.
    pub fn load(&self) -> Result<Vec<Block>, Box<dyn std::error::Error>> {
        let raw = match self.blocks.as_deref() {
            Some(path) if path != Path::new("-") => read_file(path)?,
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let blocks: Vec<Block> =
            serde_json::from_str(&raw).map_err(|e| format!("invalid block list: {e}"))?;
        validate_blocks(&blocks)?;
        tracing::debug!(blocks = blocks.len(), "loaded blocks");
        Ok(blocks)
    }
}

pub fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()).into())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
