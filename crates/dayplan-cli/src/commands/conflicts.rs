use clap::Args;
use dayplan_core::{Config, ConflictDetector, OverlapScan};

use super::input::{print_json, BlocksInput};

#[derive(Args, Debug)]
pub struct ConflictsArgs {
    #[command(flatten)]
    pub input: BlocksInput,
    /// Only compare neighbours in start order
    #[arg(long)]
    pub adjacent: bool,
    /// Skip energy-mismatch checks
    #[arg(long)]
    pub no_energy: bool,
    /// Override the minimum buffer between meetings (minutes)
    #[arg(long, value_name = "MINUTES")]
    pub buffer: Option<i64>,
}

pub fn run(args: ConflictsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = args.input.load()?;

    let mut options = Config::load_or_default().detector;
    if args.adjacent {
        options = options.with_overlap_scan(OverlapScan::Adjacent);
    }
    if args.no_energy {
        options = options.with_energy_checks(false);
    }
    if let Some(minutes) = args.buffer {
        options = options.with_min_meeting_buffer(minutes);
    }

    let conflicts = ConflictDetector::with_options(options).detect(&blocks);
    print_json(&conflicts)
}
