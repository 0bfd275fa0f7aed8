use std::path::PathBuf;

use clap::Args;
use dayplan_core::{Config, Operation, OperationApplier};

use super::input::{print_json, read_file, BlocksInput};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub input: BlocksInput,
    /// JSON file with an array of operations
    #[arg(short, long, value_name = "FILE")]
    pub ops: PathBuf,
    /// Only resolve targets by id or exact title
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let operations: Vec<Operation> = serde_json::from_str(&read_file(&args.ops)?)
        .map_err(|e| format!("invalid operation list: {e}"))?;
    let blocks = args.input.load()?;

    let allow_fuzzy = !args.strict && Config::load_or_default().strategy.allow_fuzzy_targets;
    let outcome = OperationApplier::new()
        .with_fuzzy_targets(allow_fuzzy)
        .apply(&blocks, &operations);
    print_json(&outcome)
}
