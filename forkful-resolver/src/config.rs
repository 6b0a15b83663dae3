//! Resolver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use forkful_core::constants::{LONG_TTL_SECONDS, MEDIUM_TTL_SECONDS, SHORT_TTL_SECONDS};
use forkful_core::error::{ForkfulError, Result};

/// Three TTL tiers, ordered `short <= medium <= long`.
///
/// - short: name-search results
/// - medium: category/area listings and whole resolutions
/// - long: category list, area list, meals by id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlPolicy {
    /// Search TTL in seconds
    pub short_seconds: u64,
    /// Filter/combined TTL in seconds
    pub medium_seconds: u64,
    /// Reference data TTL in seconds
    pub long_seconds: u64,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            short_seconds: SHORT_TTL_SECONDS,
            medium_seconds: MEDIUM_TTL_SECONDS,
            long_seconds: LONG_TTL_SECONDS,
        }
    }
}

impl TtlPolicy {
    /// Creates a policy from explicit tier durations in seconds.
    pub fn new(short_seconds: u64, medium_seconds: u64, long_seconds: u64) -> Self {
        Self {
            short_seconds,
            medium_seconds,
            long_seconds,
        }
    }

    /// Search tier.
    pub fn short(&self) -> Duration {
        Duration::from_secs(self.short_seconds)
    }

    /// Filter and combined-resolution tier.
    pub fn medium(&self) -> Duration {
        Duration::from_secs(self.medium_seconds)
    }

    /// Reference data tier.
    pub fn long(&self) -> Duration {
        Duration::from_secs(self.long_seconds)
    }

    /// Rejects policies whose tiers are out of order.
    pub fn validate(&self) -> Result<()> {
        if self.short_seconds > self.medium_seconds || self.medium_seconds > self.long_seconds {
            return Err(ForkfulError::ConfigError(format!(
                "TTL tiers must satisfy short <= medium <= long (got {}s, {}s, {}s)",
                self.short_seconds, self.medium_seconds, self.long_seconds
            )));
        }
        Ok(())
    }
}

/// Resolver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// TTL tiers
    pub ttl: TtlPolicy,
    /// Upper bound on per-id lookups in flight during one resolution
    pub max_concurrent_lookups: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ttl: TtlPolicy::default(),
            max_concurrent_lookups: 8,
        }
    }
}

impl ResolverConfig {
    /// Replaces the TTL policy.
    pub fn with_ttl(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the lookup fan-out bound (at least 1).
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.ttl.validate()?;
        if self.max_concurrent_lookups == 0 {
            return Err(ForkfulError::ConfigError(
                "max_concurrent_lookups must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
