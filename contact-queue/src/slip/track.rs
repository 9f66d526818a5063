//! Tracking-status slip.

use chrono::NaiveDate;

use crate::config::SlipConfig;
use crate::slip::{SlipDetector, SlipResult};
use crate::types::{ContactRecord, TrackingStatus};

/// Flags near-track and off-track records.
///
/// Off-track carries the lower urgency of the two (1 vs 2 by default), so
/// near-track records rank ahead of off-track ones inside the band.
#[derive(Debug, Clone, Default)]
pub struct TrackSlipDetector {
    config: SlipConfig,
}

impl TrackSlipDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SlipConfig) -> Self {
        Self { config }
    }
}

impl SlipDetector for TrackSlipDetector {
    fn name(&self) -> &str {
        "track_slip"
    }

    fn detect(&self, record: &ContactRecord, _today: NaiveDate) -> SlipResult {
        match record.tracking_status {
            Some(TrackingStatus::NearTrack) => {
                SlipResult::slipped(self.config.near_track_urgency, "Near track, check in on progress")
            }
            Some(TrackingStatus::OffTrack) => {
                SlipResult::slipped(self.config.off_track_urgency, "Off track, needs support")
            }
            _ => SlipResult::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_statuses() {
        let detector = TrackSlipDetector::new();
        assert_eq!(detector.name(), "track_slip");
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let base = ContactRecord::new(1, "A", "B");

        let near = base.clone().with_tracking_status(TrackingStatus::NearTrack);
        assert_eq!(detector.detect(&near, today).urgency, 2);

        let off = base.clone().with_tracking_status(TrackingStatus::OffTrack);
        assert_eq!(detector.detect(&off, today).urgency, 1);

        let on = base.clone().with_tracking_status(TrackingStatus::OnTrack);
        assert!(!detector.detect(&on, today).has_slipped);
        assert!(!detector.detect(&base, today).has_slipped);
    }
}
