// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::entitlement::Tier;

/// Suggestion pipeline configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    pub enabled: bool,
    /// Quiet period before analysis, in milliseconds
    pub debounce_ms: u64,
    pub min_words: usize,
    /// Suggestions requested per call
    pub count: usize,
    pub double_tap_ms: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        SuggestionsConfig {
            enabled: true,
            debounce_ms: 1000,
            min_words: 3,
            count: 3,
            double_tap_ms: 300,
        }
    }
}

/// Coaching engine configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            endpoint: None,
            api_key: None,
            timeout_ms: 10_000,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Entitlements configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntitlementsConfig {
    pub tier: Tier,
    /// Free-tier suggestion requests per day
    pub daily_limit: u32,
}

impl Default for EntitlementsConfig {
    fn default() -> Self {
        EntitlementsConfig {
            tier: Tier::Free,
            daily_limit: 5,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub entitlements: EntitlementsConfig,
}
