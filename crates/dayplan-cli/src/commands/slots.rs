//! `free-slot` and `gaps`.

use clap::Args;
use dayplan_core::timeline::{TimeGapDetector, DEFAULT_SEARCH_BOUNDARY};
use dayplan_core::{find_free_slot_before, Config, TimeOfDay};
use serde_json::json;

use super::input::{print_json, BlocksInput};

#[derive(Args, Debug)]
pub struct FreeSlotArgs {
    #[command(flatten)]
    pub input: BlocksInput,
    /// Slot length in minutes
    #[arg(short, long)]
    pub duration: i64,
    /// Earliest start (HH:MM)
    #[arg(long, default_value = "08:00")]
    pub after: TimeOfDay,
    /// Latest end (HH:MM)
    #[arg(long, default_value_t = DEFAULT_SEARCH_BOUNDARY)]
    pub before: TimeOfDay,
}

pub fn run_free_slot(args: FreeSlotArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = args.input.load()?;
    let slot = find_free_slot_before(&blocks, args.duration, args.after, args.before);

    let span = slot.and_then(|start| start.checked_add(args.duration).map(|end| (start, end)));
    let result = match span {
        Some((start, end)) => json!({ "start": start, "end": end }),
        None => serde_json::Value::Null,
    };
    print_json(&result)
}

#[derive(Args, Debug)]
pub struct GapsArgs {
    #[command(flatten)]
    pub input: BlocksInput,
    /// Window start (HH:MM); defaults to the configured working hours
    #[arg(long)]
    pub from: Option<TimeOfDay>,
    /// Window end (HH:MM); defaults to the configured working hours
    #[arg(long)]
    pub to: Option<TimeOfDay>,
    /// Shortest gap to report (minutes)
    #[arg(long, default_value_t = 15)]
    pub min: i64,
}

pub fn run_gaps(args: GapsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = args.input.load()?;
    let hours = Config::load_or_default().detector.working_hours;

    let gaps = TimeGapDetector::new().with_min_gap(args.min).find_gaps(
        &blocks,
        args.from.unwrap_or(hours.start),
        args.to.unwrap_or(hours.end),
    );
    print_json(&gaps)
}
