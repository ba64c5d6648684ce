//! Tier and usage entitlements
//!
//! The orchestrator asks the entitlement service for access before every suggestion
//! request and records usage afterwards. Decisions are never cached.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use futures::future::{self, BoxFuture, FutureExt};
use serde::Deserialize;
use thiserror::Error;

/// Gated capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Suggestions,
    MoreSuggestions,
    /// Accepted suggestion; accounting only
    SuggestionUsed,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Suggestions => "suggestions",
            Feature::MoreSuggestions => "more_suggestions",
            Feature::SuggestionUsed => "suggestion_used",
        }
    }

    /// Lowest tier that may use the feature
    pub fn required_tier(self) -> Tier {
        match self {
            Feature::Suggestions | Feature::SuggestionUsed => Tier::Free,
            Feature::MoreSuggestions => Tier::Premium,
        }
    }

    /// Whether using the feature counts against the daily quota
    fn is_metered(self) -> bool {
        !matches!(self, Feature::SuggestionUsed)
    }
}

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Premium,
    Elite,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Premium => "Premium",
            Tier::Elite => "Elite",
        }
    }
}

/// Why access was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    FeatureNotInTier { required: Tier },
    DailyLimitReached { limit: u32 },
    /// Entitlement backend could not be reached
    Unavailable(String),
}

impl DenyReason {
    /// Message shown with the upgrade prompt
    pub fn upgrade_prompt(&self) -> String {
        match self {
            DenyReason::FeatureNotInTier { required } => {
                format!("This feature requires {}. Upgrade to unlock it.", required.label())
            }
            DenyReason::DailyLimitReached { limit } => format!(
                "You've used all {} free suggestions for today. Upgrade for unlimited suggestions.",
                limit
            ),
            DenyReason::Unavailable(_) => {
                "Suggestions are unavailable right now. Please try again later.".to_string()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::FeatureNotInTier { .. } => "feature_not_in_tier",
            DenyReason::DailyLimitReached { .. } => "daily_limit_reached",
            DenyReason::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    /// Set when access is denied
    pub reason: Option<DenyReason>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    #[error("Usage tracking failed: {0}")]
    Tracking(String),
}

/// Tier/entitlement collaborator
pub trait EntitlementService: Send + Sync {
    fn check_access(&self, feature: Feature) -> BoxFuture<'_, AccessDecision>;

    /// Record one use of `feature`. Best-effort; callers only log failures.
    fn track_usage(&self, feature: Feature) -> BoxFuture<'_, Result<(), EntitlementError>>;
}

#[derive(Debug, Clone, Copy)]
struct DailyUsage {
    day: NaiveDate,
    metered: u32,
    accepted: u32,
}

/// Entitlements enforced locally from the configured tier
///
/// Free tier gets `daily_limit` metered requests per UTC day; Premium and Elite are
/// unlimited.
#[derive(Debug)]
pub struct LocalQuota {
    tier: Tier,
    daily_limit: u32,
    usage: Mutex<DailyUsage>,
}

impl LocalQuota {
    pub fn new(tier: Tier, daily_limit: u32) -> Self {
        Self {
            tier,
            daily_limit,
            usage: Mutex::new(DailyUsage {
                day: Utc::now().date_naive(),
                metered: 0,
                accepted: 0,
            }),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Access decision for `feature` on `today`
    pub fn decide(&self, feature: Feature, today: NaiveDate) -> AccessDecision {
        let required = feature.required_tier();
        if self.tier < required {
            return AccessDecision::deny(DenyReason::FeatureNotInTier { required });
        }
        if self.tier == Tier::Free && feature.is_metered() {
            let used = self.usage_on(today).metered;
            if used >= self.daily_limit {
                return AccessDecision::deny(DenyReason::DailyLimitReached {
                    limit: self.daily_limit,
                });
            }
        }
        AccessDecision::allow()
    }

    /// Record one use of `feature` on `today`
    pub fn record(&self, feature: Feature, today: NaiveDate) {
        let mut usage = self.lock_usage(today);
        if feature.is_metered() {
            usage.metered += 1;
        } else {
            usage.accepted += 1;
        }
    }

    /// Metered uses recorded on `today`
    pub fn used_on(&self, today: NaiveDate) -> u32 {
        self.usage_on(today).metered
    }

    /// Accepted suggestions recorded on `today`
    pub fn accepted_on(&self, today: NaiveDate) -> u32 {
        self.usage_on(today).accepted
    }

    fn usage_on(&self, today: NaiveDate) -> DailyUsage {
        *self.lock_usage(today)
    }

    /// Lock the counters, resetting them when the day has changed
    fn lock_usage(&self, today: NaiveDate) -> std::sync::MutexGuard<'_, DailyUsage> {
        let mut usage = self.usage.lock().unwrap_or_else(|e| e.into_inner());
        if usage.day != today {
            *usage = DailyUsage {
                day: today,
                metered: 0,
                accepted: 0,
            };
        }
        usage
    }
}

impl EntitlementService for LocalQuota {
    fn check_access(&self, feature: Feature) -> BoxFuture<'_, AccessDecision> {
        future::ready(self.decide(feature, Utc::now().date_naive())).boxed()
    }

    fn track_usage(&self, feature: Feature) -> BoxFuture<'_, Result<(), EntitlementError>> {
        self.record(feature, Utc::now().date_naive());
        future::ready(Ok(())).boxed()
    }
}

#[cfg(test)]
#[path = "entitlement_tests.rs"]
mod entitlement_tests;
