use serde::{Deserialize, Serialize};

use crate::billing::{PlanTier, QuoteDefaults, ServiceEntry};

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Options applied when a request does not name them
    #[serde(default)]
    pub defaults: QuoteDefaults,
    /// Replaces the built-in service table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceEntry>>,
    /// Replaces the built-in price list when present, smallest tier first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<PlanTier>>,
}
