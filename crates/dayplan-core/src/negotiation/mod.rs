//! Remote strategy negotiation.
//!
//! A remote service may propose strategies for an alert. The call is bounded
//! by a timeout and never retried; any failure falls back to the local
//! strategy engine so a resolution pass always produces an answer.

mod client;
mod fallback;

pub use client::{HttpNegotiator, StrategyNegotiator};
pub use fallback::{negotiate_or_fallback, Resolution};

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyDescriptor;

/// Body posted to the negotiation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationRequest {
    pub alert_id: String,
    pub user_id: String,
    pub timezone: String,
}

impl NegotiationRequest {
    pub fn new(
        alert_id: impl Into<String>,
        user_id: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            alert_id: alert_id.into(),
            user_id: user_id.into(),
            timezone: timezone.into(),
        }
    }
}

/// Body returned by the negotiation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationResponse {
    pub success: bool,
    #[serde(default)]
    pub strategies: Vec<StrategyDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `[negotiation]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timeout_secs() -> u64 {
    8
}
fn default_user_id() -> String {
    "local".into()
}
fn default_timezone() -> String {
    "UTC".into()
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            user_id: default_user_id(),
            timezone: default_timezone(),
        }
    }
}

impl NegotiationConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Request for `alert_id` using the configured identity.
    pub fn request(&self, alert_id: impl Into<String>) -> NegotiationRequest {
        NegotiationRequest::new(alert_id, self.user_id.clone(), self.timezone.clone())
    }
}
