//! Queue generation - filter, assemble, sort.
//!
//! `today` is fixed by the caller once per run and threaded through every
//! stage; nothing here reads the clock.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::assembler::Assembler;
use crate::config::QueueConfig;
use crate::eligibility::{EligibilityFilter, ExclusionReason};
use crate::sorter::sort_queue;
use crate::types::{ContactRecord, PriorityLevel, QueueItem, Result};

/// A record held out of the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub record_id: i64,
    pub reason: ExclusionReason,
}

/// Counts describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub total_records: usize,
    pub eligible: usize,
    pub excluded: usize,
    /// Items dropped by the capacity limit
    pub truncated: usize,
    pub overdue: usize,
    /// Queued items per level, keyed by level name
    pub by_level: BTreeMap<&'static str, usize>,
    /// Exclusions per reason, keyed by reason name
    pub by_exclusion: BTreeMap<&'static str, usize>,
}

/// Full result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueReport<'a> {
    pub today: NaiveDate,
    pub items: Vec<QueueItem<'a>>,
    pub excluded: Vec<Exclusion>,
    pub summary: QueueSummary,
}

/// Generates ordered contact queues from record snapshots.
#[derive(Debug, Clone)]
pub struct QueueGenerator {
    config: QueueConfig,
    filter: EligibilityFilter,
    assembler: Assembler,
}

impl QueueGenerator {
    /// Create a generator with default configuration.
    pub fn new() -> Self {
        Self::build(QueueConfig::default())
    }

    /// Create with custom configuration, validating it first.
    pub fn with_config(config: QueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: QueueConfig) -> Self {
        Self {
            filter: EligibilityFilter::with_config(config.eligibility.clone()),
            assembler: Assembler::with_config(config.clone()),
            config,
        }
    }

    /// Replace the assembler, e.g. to run a custom rule chain.
    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Ordered queue of eligible records.
    pub fn generate<'a>(&self, records: &'a [ContactRecord], today: NaiveDate) -> Vec<QueueItem<'a>> {
        self.report(records, today).items
    }

    /// Ordered queue plus exclusions and counts.
    pub fn report<'a>(&self, records: &'a [ContactRecord], today: NaiveDate) -> QueueReport<'a> {
        let mut items = Vec::with_capacity(records.len());
        let mut excluded = Vec::new();

        for record in records {
            match self.filter.exclusion_reason(record, today) {
                Some(reason) => {
                    debug!(record_id = record.id, reason = reason.as_str(), "Record excluded");
                    excluded.push(Exclusion {
                        record_id: record.id,
                        reason,
                    });
                }
                None => items.push(self.assembler.assemble(record, today)),
            }
        }

        sort_queue(&mut items);

        let eligible = items.len();
        let truncated = match self.config.queue.max_items {
            Some(limit) if items.len() > limit => {
                items.truncate(limit);
                eligible - limit
            }
            _ => 0,
        };

        let summary = summarize(records.len(), eligible, truncated, &items, &excluded);
        info!(
            %today,
            total = summary.total_records,
            queued = items.len(),
            excluded = summary.excluded,
            truncated,
            overdue = summary.overdue,
            "Contact queue generated"
        );

        QueueReport {
            today,
            items,
            excluded,
            summary,
        }
    }
}

impl Default for QueueGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(
    total_records: usize,
    eligible: usize,
    truncated: usize,
    items: &[QueueItem<'_>],
    excluded: &[Exclusion],
) -> QueueSummary {
    let mut by_level: BTreeMap<&'static str, usize> =
        PriorityLevel::all().iter().map(|level| (level.as_str(), 0)).collect();
    for item in items {
        *by_level.entry(item.priority_level.as_str()).or_default() += 1;
    }

    let mut by_exclusion: BTreeMap<&'static str, usize> = BTreeMap::new();
    for exclusion in excluded {
        *by_exclusion.entry(exclusion.reason.as_str()).or_default() += 1;
    }

    QueueSummary {
        total_records,
        eligible,
        excluded: excluded.len(),
        truncated,
        overdue: items.iter().filter(|item| item.is_overdue).count(),
        by_level,
        by_exclusion,
    }
}

/// Ordered queue with default configuration.
pub fn generate_queue(records: &[ContactRecord], today: NaiveDate) -> Vec<QueueItem<'_>> {
    QueueGenerator::new().generate(records, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{PriorityRule, RuleChain};
    use crate::types::TrackingStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<ContactRecord> {
        let today = date(2024, 1, 20);
        let mut dnc = ContactRecord::new(1, "Dana", "Nocall");
        dnc.do_not_contact = true;
        let mut snoozed = ContactRecord::new(2, "Sam", "Snooze");
        snoozed.snoozed_until = Some(date(2024, 2, 1));
        vec![
            dnc,
            snoozed,
            ContactRecord::new(3, "Cal", "Cooldown").with_last_contact(today - chrono::Duration::days(2), Some(true)),
            ContactRecord::new(4, "Olly", "Offtrack")
                .with_last_contact(date(2024, 1, 1), Some(true))
                .with_tracking_status(TrackingStatus::OffTrack),
            ContactRecord::new(5, "Nina", "Never"),
            ContactRecord::new(6, "Bea", "Birthday").with_date_of_birth(date(2002, 1, 20)),
        ]
    }

    #[test]
    fn test_report_orders_and_counts() {
        let records = sample_records();
        let report = QueueGenerator::new().report(&records, date(2024, 1, 20));

        let ids: Vec<i64> = report.items.iter().map(|i| i.record_id()).collect();
        assert_eq!(ids, vec![6, 4, 5]);
        assert_eq!(report.summary.total_records, 6);
        assert_eq!(report.summary.eligible, 3);
        assert_eq!(report.summary.excluded, 3);
        assert_eq!(report.summary.by_level["birthday"], 1);
        assert_eq!(report.summary.by_level["track-slip"], 1);
        assert_eq!(report.summary.by_level["manual-followup"], 0);
        assert_eq!(report.summary.by_exclusion["cooldown"], 1);

        let reasons: Vec<&str> = report.excluded.iter().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec!["do-not-contact", "snoozed", "cooldown"]);
    }

    #[test]
    fn test_capacity_limit_truncates_after_sort() {
        let mut config = QueueConfig::default();
        config.queue.max_items = Some(2);
        let generator = QueueGenerator::with_config(config).unwrap();
        let records = sample_records();
        let report = generator.report(&records, date(2024, 1, 20));
        let ids: Vec<i64> = report.items.iter().map(|i| i.record_id()).collect();
        assert_eq!(ids, vec![6, 4]);
        assert_eq!(report.summary.truncated, 1);
        assert_eq!(report.summary.eligible, 3);
    }

    #[test]
    fn test_custom_assembler_is_used() {
        let chain = RuleChain::new(vec![PriorityRule::Birthday]);
        let generator = QueueGenerator::new().with_assembler(Assembler::new().with_chain(chain));
        let records = sample_records();
        let report = generator.report(&records, date(2024, 1, 20));

        let levels: Vec<PriorityLevel> = report.items.iter().map(|i| i.priority_level).collect();
        assert_eq!(levels, vec![PriorityLevel::Birthday, PriorityLevel::FirstTouch, PriorityLevel::FirstTouch]);
        assert_eq!(report.summary.by_level["track-slip"], 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let mut config = QueueConfig::default();
        config.recency.recent_max_days = 30;
        assert!(QueueGenerator::with_config(config).is_err());
    }

    #[test]
    fn test_empty_snapshot() {
        let report = QueueGenerator::new().report(&[], date(2024, 1, 20));
        assert!(report.items.is_empty());
        assert_eq!(report.summary, QueueSummary {
            by_level: PriorityLevel::all().iter().map(|l| (l.as_str(), 0)).collect(),
            ..Default::default()
        });
    }
}
