//! Eligibility gate - hard exclusions applied before any scoring.
//!
//! Gates run in a fixed order and the first one that fires decides:
//!
//! 1. do-not-contact always excludes, birthdays included
//! 2. a birthday today admits the record past every remaining gate
//! 3. an active snooze
//! 4. an active daily skip
//! 5. the cooldown after the last contact attempt

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::EligibilityConfig;
use crate::types::{ContactOutcome, ContactRecord};

/// Why a record was held out of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    DoNotContact,
    Snoozed,
    Skipped,
    /// Contacted too recently; carries the days elapsed and the cooldown applied.
    Cooldown { days_since: i64, cooldown_days: i64 },
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoNotContact => "do-not-contact",
            Self::Snoozed => "snoozed",
            Self::Skipped => "skipped",
            Self::Cooldown { .. } => "cooldown",
        }
    }
}

/// Applies the exclusion gates.
#[derive(Debug, Clone, Default)]
pub struct EligibilityFilter {
    config: EligibilityConfig,
}

impl EligibilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EligibilityConfig) -> Self {
        Self { config }
    }

    /// True when the record is held out of this run.
    pub fn should_exclude(&self, record: &ContactRecord, today: NaiveDate) -> bool {
        self.exclusion_reason(record, today).is_some()
    }

    /// The first gate that holds the record out, if any.
    pub fn exclusion_reason(&self, record: &ContactRecord, today: NaiveDate) -> Option<ExclusionReason> {
        if record.do_not_contact {
            return Some(ExclusionReason::DoNotContact);
        }
        if calendar::is_birthday(record.date_of_birth, today) {
            return None;
        }
        if calendar::is_still_active(record.snoozed_until, today) {
            return Some(ExclusionReason::Snoozed);
        }
        if calendar::is_still_active(record.queue_skipped_until, today) {
            return Some(ExclusionReason::Skipped);
        }

        let last_contact = record.last_contact_date?;
        let days_since = calendar::days_between(last_contact, today);
        let cooldown_days = self.cooldown_days(record.contact_outcome(), days_since);
        (days_since < cooldown_days).then_some(ExclusionReason::Cooldown {
            days_since,
            cooldown_days,
        })
    }

    /// Required gap after a contact attempt with the given outcome.
    pub fn cooldown_days(&self, outcome: ContactOutcome, days_since: i64) -> i64 {
        match outcome {
            ContactOutcome::Connected => self.config.connected_cooldown_days,
            ContactOutcome::Failed if days_since < self.config.failed_retry_window_days => {
                self.config.failed_cooldown_days
            }
            ContactOutcome::Failed => self.config.failed_retry_cooldown_days,
            ContactOutcome::Unknown => self.config.default_cooldown_days,
        }
    }
}
