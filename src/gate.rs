//! Interstitial cadence over an explicit usage counter.
//!
//! The gate holds no state. The caller owns the counter, passes it in, and
//! stores what comes back.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// How many analyses the caller has run so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageCount(pub u64);

impl UsageCount {
    pub fn next(self) -> Self {
        UsageCount(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for UsageCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateDecision {
    /// Show the result directly.
    Reveal,
    /// Show the interstitial first, then the result.
    Interstitial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageGate {
    pub every: NonZeroU32,
}

impl UsageGate {
    pub const DEFAULT_EVERY: NonZeroU32 = match NonZeroU32::new(5) {
        Some(n) => n,
        None => unreachable!(),
    };

    pub fn new(every: NonZeroU32) -> Self {
        Self { every }
    }

    /// Count one more use and decide whether it gets the interstitial.
    ///
    /// Every `every`-th use does.
    pub fn record(&self, count: UsageCount) -> (UsageCount, GateDecision) {
        let next = count.next();
        let decision = if next.0 % u64::from(self.every.get()) == 0 {
            GateDecision::Interstitial
        } else {
            GateDecision::Reveal
        };
        tracing::debug!(count = next.0, ?decision, "usage recorded");
        (next, decision)
    }
}

impl Default for UsageGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EVERY)
    }
}
