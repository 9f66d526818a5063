//! Recency tiers for days since last contact.

use serde::{Deserialize, Serialize};

use crate::config::RecencyConfig;

/// Qualitative bucket for time since last contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecencyTier {
    Recent,
    Moderate,
    Distant,
    Stale,
    /// No contact on record.
    NeverContacted,
}

impl RecencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Moderate => "moderate",
            Self::Distant => "distant",
            Self::Stale => "stale",
            Self::NeverContacted => "never contacted",
        }
    }
}

/// Integer-range lookup over [`RecencyConfig`] bounds.
#[derive(Debug, Clone, Default)]
pub struct RecencyClassifier {
    config: RecencyConfig,
}

impl RecencyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecencyConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, days_since_contact: i64) -> RecencyTier {
        let c = &self.config;
        if days_since_contact <= c.recent_max_days {
            RecencyTier::Recent
        } else if days_since_contact <= c.moderate_max_days {
            RecencyTier::Moderate
        } else if days_since_contact <= c.distant_max_days {
            RecencyTier::Distant
        } else {
            RecencyTier::Stale
        }
    }

    /// Tier for an optional day count; `None` means never contacted.
    pub fn classify_contact(&self, days_since_contact: Option<i64>) -> RecencyTier {
        days_since_contact.map_or(RecencyTier::NeverContacted, |days| self.classify(days))
    }

    /// Day count reported on queue items, with the never-contacted sentinel.
    pub fn reported_days(&self, days_since_contact: Option<i64>) -> i64 {
        days_since_contact.unwrap_or(self.config.never_contacted_days)
    }
}
