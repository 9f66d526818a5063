//! Priority assembler - turns one eligible record into a [`QueueItem`].
//!
//! The recency, slip and first-touch signals are gathered into a
//! [`RuleContext`], the [`RuleChain`] picks the placement, and the pin
//! override is applied last.

mod rules;

pub use rules::{Placement, PriorityRule, RuleChain, RuleContext};

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::QueueConfig;
use crate::recency::RecencyClassifier;
use crate::risk::risk_score;
use crate::slip::{ContactSlipDetector, SlipDetector, SlipResult, TrackSlipDetector};
use crate::types::{ContactRecord, PriorityLevel, QueueItem};

/// Marker prepended to the reason of pinned records.
pub const PINNED_MARKER: &str = "Pinned";

/// Builds queue items from records.
#[derive(Debug, Clone)]
pub struct Assembler {
    config: QueueConfig,
    chain: RuleChain,
    recency: RecencyClassifier,
    contact_slip: ContactSlipDetector,
    track_slip: TrackSlipDetector,
}

impl Assembler {
    /// Create an assembler with default configuration.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            chain: RuleChain::standard(),
            recency: RecencyClassifier::with_config(config.recency.clone()),
            contact_slip: ContactSlipDetector::with_config(config.slip.clone(), config.recency.clone()),
            track_slip: TrackSlipDetector::with_config(config.slip.clone()),
            config,
        }
    }

    /// Replace the rule chain.
    pub fn with_chain(mut self, chain: RuleChain) -> Self {
        self.chain = chain;
        self
    }

    /// Place one record. Eligibility is not checked here.
    pub fn assemble<'a>(&self, record: &'a ContactRecord, today: NaiveDate) -> QueueItem<'a> {
        let days_since_contact = record.days_since_contact(today);
        let ctx = RuleContext {
            record,
            today,
            days_since_contact,
            contact_slip: detect(&self.contact_slip, record, today),
            track_slip: detect(&self.track_slip, record, today),
        };

        let (rule, mut placement) = self
            .chain
            .evaluate(&ctx, &self.config.priority)
            .unwrap_or_else(|| (PriorityRule::FirstTouch, rules::first_touch(&ctx, &self.config.priority)));

        if record.pinned {
            placement.reason = format!("{}: {}", PINNED_MARKER, placement.reason);
            if placement.level != PriorityLevel::Birthday {
                placement.priority = self.config.priority.pinned_priority;
            }
        }

        debug!(
            record_id = record.id,
            rule = rule.id(),
            priority = placement.priority,
            pinned = record.pinned,
            "Record placed"
        );

        QueueItem {
            record,
            priority: placement.priority,
            priority_level: placement.level,
            priority_reason: placement.reason,
            days_since_last_contact: self.recency.reported_days(days_since_contact),
            is_overdue: placement.is_overdue,
            risk_score: risk_score(record, days_since_contact, &self.config.risk),
        }
    }
}

fn detect(detector: &dyn SlipDetector, record: &ContactRecord, today: NaiveDate) -> SlipResult {
    let result = detector.detect(record, today);
    if result.has_slipped {
        trace!(
            record_id = record.id,
            detector = detector.name(),
            urgency = result.urgency,
            "Slip detected"
        );
    }
    result
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
