// Rule-based fertilizer-need tiers.
//
// The only input is the mean green intensity of the working image: pale
// leaves read as deficient, deeply green leaves as well-fed. The thresholds
// are fixed constants, not learned.

use serde::{Deserialize, Serialize};

/// Fertilizer-need tier derived from the mean green channel (0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeedTier {
    #[serde(rename = "High Need")]
    High,
    #[serde(rename = "Moderate Need")]
    Moderate,
    #[serde(rename = "Low Need")]
    Low,
}

impl NeedTier {
    /// Determine the tier from the mean green intensity.
    pub fn from_green_mean(green: f32) -> Self {
        match green {
            g if g < 55.0 => NeedTier::High,
            g if g < 150.0 => NeedTier::Moderate,
            _ => NeedTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedTier::High => "High Need",
            NeedTier::Moderate => "Moderate Need",
            NeedTier::Low => "Low Need",
        }
    }
}

impl std::fmt::Display for NeedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
