//! Rendering quality tiers

use crate::error::SynapseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Concrete rendering quality
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityTier {
    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }

    /// Upper bound on rendered scene nodes for this tier
    pub fn max_nodes(self) -> usize {
        match self {
            QualityTier::Low => 40,
            QualityTier::Medium => 120,
            QualityTier::High => 300,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quality selection: automatic or an explicit tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    #[default]
    Auto,
    Low,
    Medium,
    High,
}

impl QualityMode {
    /// The explicit tier, if this is not `Auto`
    pub fn tier(self) -> Option<QualityTier> {
        match self {
            QualityMode::Auto => None,
            QualityMode::Low => Some(QualityTier::Low),
            QualityMode::Medium => Some(QualityTier::Medium),
            QualityMode::High => Some(QualityTier::High),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityMode::Auto => "auto",
            QualityMode::Low => "low",
            QualityMode::Medium => "medium",
            QualityMode::High => "high",
        }
    }
}

impl From<QualityTier> for QualityMode {
    fn from(tier: QualityTier) -> Self {
        match tier {
            QualityTier::Low => QualityMode::Low,
            QualityTier::Medium => QualityMode::Medium,
            QualityTier::High => QualityMode::High,
        }
    }
}

impl FromStr for QualityMode {
    type Err = SynapseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(QualityMode::Auto),
            "low" => Ok(QualityMode::Low),
            "medium" => Ok(QualityMode::Medium),
            "high" => Ok(QualityMode::High),
            other => Err(SynapseError::Config(format!("unknown quality '{}'", other))),
        }
    }
}
