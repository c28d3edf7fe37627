//! Round-Limit Governor
//!
//! A passive set of capped counters. The governor never decides anything on
//! its own: the workflow state machine increments and resets the counters as
//! side effects of phase transitions, and asks [`RoundCounter::is_exhausted`]
//! before taking any "keep discussing" branch.
//!
//! | Counter | Bumped by | Reset when |
//! |---------|-----------|------------|
//! | `requirements_builder` | Builder turn in Development | new iteration |
//! | `builder_verifier` | Verifier turn in Testing | entering Testing from Development, new iteration |
//! | `review` | Requirements turn in Complete | new iteration |
//! | `total_review` | Requirements turn in Complete | never |

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default cap shared by every counter
pub const DEFAULT_ROUND_CAP: usize = 2;

/// Caps for each counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLimits {
    pub requirements_builder: usize,
    pub builder_verifier: usize,
    pub review: usize,
}

impl Default for RoundLimits {
    fn default() -> Self {
        Self {
            requirements_builder: DEFAULT_ROUND_CAP,
            builder_verifier: DEFAULT_ROUND_CAP,
            review: DEFAULT_ROUND_CAP,
        }
    }
}

impl RoundLimits {
    /// Validate that every cap allows at least one round.
    ///
    /// A zero cap would force every transition immediately and is rejected.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (counter, value) in [
            ("requirements_builder", self.requirements_builder),
            ("builder_verifier", self.builder_verifier),
            ("review", self.review),
        ] {
            if value == 0 {
                return Err(DomainError::InvalidRoundCap { counter, value });
            }
        }
        Ok(())
    }
}

/// A per-iteration counter bounded by a cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCounter {
    count: usize,
    cap: usize,
}

impl RoundCounter {
    pub fn new(cap: usize) -> Self {
        Self { count: 0, cap }
    }

    /// Count one round. Saturates at the cap.
    pub fn increment(&mut self) {
        if self.count < self.cap {
            self.count += 1;
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.cap
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// A counter that only ever grows (no `reset`)
///
/// Bounds the number of full review cycles across all iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeCounter {
    count: usize,
    cap: usize,
}

impl CumulativeCounter {
    pub fn new(cap: usize) -> Self {
        Self { count: 0, cap }
    }

    /// Count one round. Saturates at the cap.
    pub fn increment(&mut self) {
        if self.count < self.cap {
            self.count += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.cap
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// All round counters of one workflow session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundGovernor {
    pub requirements_builder: RoundCounter,
    pub builder_verifier: RoundCounter,
    pub review: RoundCounter,
    pub total_review: CumulativeCounter,
}

impl RoundGovernor {
    pub fn new(limits: RoundLimits) -> Self {
        Self {
            requirements_builder: RoundCounter::new(limits.requirements_builder),
            builder_verifier: RoundCounter::new(limits.builder_verifier),
            review: RoundCounter::new(limits.review),
            total_review: CumulativeCounter::new(limits.review),
        }
    }

    /// Reset every per-iteration counter. `total_review` is left untouched.
    pub fn reset_iteration(&mut self) {
        self.requirements_builder.reset();
        self.builder_verifier.reset();
        self.review.reset();
    }

    /// Whether any counter has reached its cap
    pub fn any_exhausted(&self) -> bool {
        self.requirements_builder.is_exhausted()
            || self.builder_verifier.is_exhausted()
            || self.total_review.is_exhausted()
    }
}

impl Default for RoundGovernor {
    fn default() -> Self {
        Self::new(RoundLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_saturates_at_cap() {
        let mut counter = RoundCounter::new(2);
        assert!(!counter.is_exhausted());
        counter.increment();
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2);
        assert!(counter.is_exhausted());
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_reset_iteration_keeps_total() {
        let mut governor = RoundGovernor::default();
        governor.review.increment();
        governor.total_review.increment();
        governor.requirements_builder.increment();
        governor.builder_verifier.increment();

        governor.reset_iteration();

        assert_eq!(governor.review.count(), 0);
        assert_eq!(governor.requirements_builder.count(), 0);
        assert_eq!(governor.builder_verifier.count(), 0);
        assert_eq!(governor.total_review.count(), 1);
    }

    #[test]
    fn test_any_exhausted() {
        let mut governor = RoundGovernor::default();
        assert!(!governor.any_exhausted());
        governor.builder_verifier.increment();
        governor.builder_verifier.increment();
        assert!(governor.any_exhausted());
    }

    #[test]
    fn test_limits_validation() {
        assert!(RoundLimits::default().validate().is_ok());
        let limits = RoundLimits {
            review: 0,
            ..Default::default()
        };
        assert_eq!(
            limits.validate(),
            Err(DomainError::InvalidRoundCap {
                counter: "review",
                value: 0
            })
        );
    }
}
