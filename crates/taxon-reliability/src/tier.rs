use serde::{Deserialize, Serialize};

/// Graduated reliability tiers over the posterior mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityTier {
    /// mean ≥ 0.8
    High,
    /// mean ≥ 0.6
    Medium,
    /// mean ≥ 0.4
    Low,
    /// mean ≥ 0.2
    Weak,
    /// mean < 0.2: output should not be used unreviewed.
    Reject,
}

impl ReliabilityTier {
    pub const HIGH: f64 = 0.8;
    pub const MEDIUM: f64 = 0.6;
    pub const LOW: f64 = 0.4;
    pub const REJECT: f64 = 0.2;

    pub fn from_confidence(mean: f64) -> Self {
        if mean >= Self::HIGH {
            Self::High
        } else if mean >= Self::MEDIUM {
            Self::Medium
        } else if mean >= Self::LOW {
            Self::Low
        } else if mean >= Self::REJECT {
            Self::Weak
        } else {
            Self::Reject
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Weak => "weak",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for ReliabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(ReliabilityTier::from_confidence(0.8), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_confidence(0.6), ReliabilityTier::Medium);
        assert_eq!(ReliabilityTier::from_confidence(0.5), ReliabilityTier::Low);
        assert_eq!(ReliabilityTier::from_confidence(0.2), ReliabilityTier::Weak);
        assert_eq!(ReliabilityTier::from_confidence(0.1), ReliabilityTier::Reject);
    }
}
