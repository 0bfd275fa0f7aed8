//! HTTP client for the negotiation service.

use async_trait::async_trait;
use url::Url;

use super::{NegotiationConfig, NegotiationRequest, NegotiationResponse};
use crate::error::NegotiationError;
use crate::strategy::StrategyDescriptor;

/// Anything that can propose strategies for an alert.
#[async_trait]
pub trait StrategyNegotiator: Send + Sync {
    /// Ask for strategies. An empty list is reported as
    /// [`NegotiationError::Empty`], never as `Ok(vec![])`.
    async fn negotiate(
        &self,
        request: &NegotiationRequest,
    ) -> Result<Vec<StrategyDescriptor>, NegotiationError>;
}

/// Posts requests as JSON to a fixed endpoint.
pub struct HttpNegotiator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNegotiator {
    /// Create a client for `endpoint` (http or https).
    pub fn new(endpoint: &str) -> Result<Self, NegotiationError> {
        let invalid = |message: String| NegotiationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: url,
        })
    }

    /// Build from config; fails when negotiation is disabled or has no endpoint.
    pub fn from_config(config: &NegotiationConfig) -> Result<Self, NegotiationError> {
        match (&config.endpoint, config.enabled) {
            (Some(endpoint), true) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Err(NegotiationError::NotConfigured),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl StrategyNegotiator for HttpNegotiator {
    async fn negotiate(
        &self,
        request: &NegotiationRequest,
    ) -> Result<Vec<StrategyDescriptor>, NegotiationError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            alert_id = %request.alert_id,
            "negotiating strategies"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NegotiationError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Vec<StrategyDescriptor>, NegotiationError> {
    let parsed: NegotiationResponse =
        serde_json::from_str(body).map_err(|e| NegotiationError::Malformed(e.to_string()))?;

    if !parsed.success {
        return Err(NegotiationError::Rejected(
            parsed.error.unwrap_or_else(|| "no reason given".to_string()),
        ));
    }
    if parsed.strategies.is_empty() {
        return Err(NegotiationError::Empty);
    }
    Ok(parsed.strategies)
}
