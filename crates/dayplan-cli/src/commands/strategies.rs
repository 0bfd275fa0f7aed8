use clap::Args;
use dayplan_core::strategy::promote_preferred;
use dayplan_core::{
    negotiate_or_fallback, Config, ConflictDetector, EngineRevision, HttpNegotiator, Resolution,
    StrategyEngine, StrategySource,
};

use super::input::{print_json, BlocksInput};

#[derive(Args, Debug)]
pub struct StrategiesArgs {
    #[command(flatten)]
    pub input: BlocksInput,
    /// Ask the configured negotiation service first
    #[arg(long)]
    pub remote: bool,
    /// Alert id sent to the negotiation service
    #[arg(long, default_value = "cli")]
    pub alert_id: String,
    /// Rank strategies in fixed order instead of by remaining conflicts
    #[arg(long)]
    pub fixed_order: bool,
    /// Strategy id to list first when present
    #[arg(long, value_name = "ID")]
    pub prefer: Option<String>,
}

pub fn run(args: StrategiesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = args.input.load()?;
    let mut config = Config::load_or_default();
    if args.fixed_order {
        config.strategy.revision = EngineRevision::V1;
    }

    let conflicts = ConflictDetector::with_options(config.detector.clone()).detect(&blocks);
    let engine = StrategyEngine::with_config(config.strategy.clone())
        .with_detector_options(config.detector.clone());

    let mut resolution = if args.remote {
        let negotiator = HttpNegotiator::from_config(&config.negotiation)?;
        let request = config.negotiation.request(args.alert_id.as_str());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(negotiate_or_fallback(
            &negotiator,
            &request,
            config.negotiation.timeout(),
            &engine,
            &blocks,
            &conflicts,
        ))
    } else {
        Resolution {
            source: StrategySource::Local,
            fallback_reason: None,
            strategies: engine.generate(&blocks, &conflicts),
        }
    };

    if let Some(preferred) = args.prefer.as_deref() {
        promote_preferred(&mut resolution.strategies, preferred);
    }
    print_json(&resolution)
}
