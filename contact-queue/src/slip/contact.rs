//! Contact-recency slip.
//!
//! Never-contacted records do not slip; they go down the first-touch path.

use chrono::NaiveDate;
use tracing::trace;

use crate::config::{RecencyConfig, SlipConfig};
use crate::recency::{RecencyClassifier, RecencyTier};
use crate::slip::{SlipDetector, SlipResult};
use crate::types::{ContactOutcome, ContactRecord};

/// Flags records that are overdue for contact or need a retry.
#[derive(Debug, Clone, Default)]
pub struct ContactSlipDetector {
    config: SlipConfig,
    classifier: RecencyClassifier,
}

impl ContactSlipDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SlipConfig, recency: RecencyConfig) -> Self {
        Self {
            config,
            classifier: RecencyClassifier::with_config(recency),
        }
    }

    fn tier_urgency(&self, tier: RecencyTier) -> Option<i32> {
        match tier {
            RecencyTier::Moderate => Some(self.config.moderate_urgency),
            RecencyTier::Distant => Some(self.config.distant_urgency),
            RecencyTier::Stale => Some(self.config.stale_urgency),
            RecencyTier::Recent | RecencyTier::NeverContacted => None,
        }
    }
}

impl SlipDetector for ContactSlipDetector {
    fn name(&self) -> &str {
        "contact_slip"
    }

    fn detect(&self, record: &ContactRecord, today: NaiveDate) -> SlipResult {
        let Some(days) = record.days_since_contact(today) else {
            return SlipResult::none();
        };

        // A fresh failed attempt outranks every time bucket.
        if record.contact_outcome() == ContactOutcome::Failed
            && days <= self.config.failed_boost_window_days
        {
            trace!(record_id = record.id, days, "Recent failed attempt");
            return SlipResult::slipped(
                self.config.failed_boost_urgency,
                format!("Last attempt {} days ago did not connect, retry needed", days),
            );
        }

        let tier = self.classifier.classify(days);
        match self.tier_urgency(tier) {
            Some(urgency) => SlipResult::slipped(
                urgency,
                format!("No contact in {} days ({})", days, tier.as_str()),
            ),
            None => SlipResult::none(),
        }
    }
}
