//! Secondary risk score, used only as a late tie-break in the sorter.

use crate::config::RiskConfig;
use crate::first_touch::SupportNeed;
use crate::types::{ContactRecord, TrackingStatus};

/// Linear sum of tracking status, neglect and support need. Uncapped.
pub fn risk_score(record: &ContactRecord, days_since_contact: Option<i64>, config: &RiskConfig) -> i32 {
    let status = match record.tracking_status {
        Some(TrackingStatus::OffTrack) => config.off_track_weight,
        Some(TrackingStatus::NearTrack) => config.near_track_weight,
        _ => 0,
    };
    let neglect = match days_since_contact {
        Some(days) => i32::try_from(days.min(config.days_cap)).unwrap_or(i32::MAX),
        None => config.never_contacted_weight,
    };
    let support = match SupportNeed::classify(record.support_category.as_deref()) {
        SupportNeed::High => config.high_support_weight,
        _ => 0,
    };
    status.saturating_add(neglect).saturating_add(support)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_track_recent_contact() {
        let record = ContactRecord::new(1, "A", "B").with_tracking_status(TrackingStatus::OffTrack);
        assert_eq!(risk_score(&record, Some(19), &RiskConfig::default()), 49);
    }

    #[test]
    fn test_days_are_capped() {
        let record = ContactRecord::new(1, "A", "B");
        assert_eq!(risk_score(&record, Some(365), &RiskConfig::default()), 100);
    }

    #[test]
    fn test_never_contacted_high_support_near_track() {
        let record = ContactRecord::new(1, "A", "B")
            .with_tracking_status(TrackingStatus::NearTrack)
            .with_support_category("high");
        assert_eq!(risk_score(&record, None, &RiskConfig::default()), 15 + 50 + 10);
    }
}
