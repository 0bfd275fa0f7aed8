//! Remote-first resolution with local fallback.

use std::time::Duration;

use serde::Serialize;

use super::{NegotiationRequest, StrategyNegotiator};
use crate::block::Block;
use crate::conflict::Conflict;
use crate::error::NegotiationError;
use crate::strategy::{Strategy, StrategyEngine, StrategySource};

/// Strategies for one resolution pass and where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub source: StrategySource,
    /// Why the remote answer was not used, when it was not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub strategies: Vec<Strategy>,
}

/// Ask `negotiator` for strategies, falling back to `engine` on any failure.
///
/// Remote descriptors are replayed against `blocks` by the same engine, so
/// both paths yield fully previewed strategies.
pub async fn negotiate_or_fallback(
    negotiator: &dyn StrategyNegotiator,
    request: &NegotiationRequest,
    timeout: Duration,
    engine: &StrategyEngine,
    blocks: &[Block],
    conflicts: &[Conflict],
) -> Resolution {
    let outcome = match tokio::time::timeout(timeout, negotiator.negotiate(request)).await {
        Ok(result) => result,
        Err(_) => Err(NegotiationError::Timeout {
            timeout_ms: timeout.as_millis(),
        }),
    };

    let error = match outcome {
        Ok(descriptors) => {
            let strategies = engine.replay(blocks, &descriptors);
            if !strategies.is_empty() {
                tracing::info!(
                    alert_id = %request.alert_id,
                    strategies = strategies.len(),
                    "using negotiated strategies"
                );
                return Resolution {
                    source: StrategySource::Remote,
                    fallback_reason: None,
                    strategies,
                };
            }
            NegotiationError::Empty
        }
        Err(err) => err,
    };

    tracing::warn!(
        alert_id = %request.alert_id,
        error = %error,
        "negotiation failed, using local strategies"
    );
    Resolution {
        source: StrategySource::Local,
        fallback_reason: Some(error.to_string()),
        strategies: engine.generate(blocks, conflicts),
    }
}
