use clap::Args;
use dayplan_core::calculate_layout;

use super::input::{print_json, BlocksInput};

#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: BlocksInput,
}

pub fn run(args: LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = args.input.load()?;
    print_json(&calculate_layout(&blocks))
}
