//! Slip detection.
//!
//! Two independent detectors flag records whose situation is degrading:
//! - **Contact slip**: too long since the last contact, or a fresh failed attempt
//! - **Track slip**: tracking status has fallen below on-track

mod contact;
mod track;

pub use contact::ContactSlipDetector;
pub use track::TrackSlipDetector;

use chrono::NaiveDate;

use crate::types::ContactRecord;

/// Common trait for slip detectors.
pub trait SlipDetector: Send + Sync {
    /// Name of the detector.
    fn name(&self) -> &str;

    /// Inspect one record as of `today`.
    fn detect(&self, record: &ContactRecord, today: NaiveDate) -> SlipResult;
}

/// Result from slip detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlipResult {
    pub has_slipped: bool,
    pub description: String,
    /// Higher is more urgent; 0 when nothing slipped.
    pub urgency: i32,
}

impl SlipResult {
    /// No slip.
    pub fn none() -> Self {
        Self {
            has_slipped: false,
            description: String::new(),
            urgency: 0,
        }
    }

    pub fn slipped(urgency: i32, description: impl Into<String>) -> Self {
        Self {
            has_slipped: true,
            description: description.into(),
            urgency,
        }
    }
}
