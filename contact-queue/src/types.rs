//! Core types for the contact queue.
//!
//! [`ContactRecord`] is owned by the record store and only ever read here.
//! [`QueueItem`] is the per-run placement of one record; it borrows the
//! record instead of copying it and is rebuilt on every queue generation.
//!
//! With the `typescript` feature enabled, the record and level types can be
//! exported to TypeScript using ts-rs for the dashboard front end.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::lenient::{self, LenientEnum};

/// Priority attached to the latest manual follow-up note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum FollowUpPriority {
    None,
    Low,
    Normal,
    High,
    Urgent,
}

impl FollowUpPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl LenientEnum for FollowUpPriority {
    const FIELD: &'static str = "latestFollowUpPriority";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    fn fallback() -> Self {
        Self::None
    }
}

/// Advisor-assigned tracking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum TrackingStatus {
    OnTrack,
    NearTrack,
    OffTrack,
    Unknown,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::NearTrack => "near-track",
            Self::OffTrack => "off-track",
            Self::Unknown => "unknown",
        }
    }
}

impl LenientEnum for TrackingStatus {
    const FIELD: &'static str = "trackingStatus";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "on-track" | "ontrack" => Some(Self::OnTrack),
            "near-track" | "neartrack" => Some(Self::NearTrack),
            "off-track" | "offtrack" => Some(Self::OffTrack),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    fn fallback() -> Self {
        Self::Unknown
    }
}

/// Post-program path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum PathType {
    Enrollment,
    Vocational,
    #[default]
    Other,
}

impl LenientEnum for PathType {
    const FIELD: &'static str = "pathType";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "enrollment" | "college" => Some(Self::Enrollment),
            "vocational" => Some(Self::Vocational),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    fn fallback() -> Self {
        Self::Other
    }
}

/// Outcome of the most recent contact attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Connected,
    Failed,
    Unknown,
}

impl From<Option<bool>> for ContactOutcome {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Connected,
            Some(false) => Self::Failed,
            None => Self::Unknown,
        }
    }
}

/// A student/alumni contact record as supplied by the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: String,

    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub last_contact_date: Option<NaiveDate>,
    /// `Some(true)` connected, `Some(false)` failed attempt, `None` unknown.
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub last_contact_connected: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub do_not_contact: bool,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub snoozed_until: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub queue_skipped_until: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::optional_enum")]
    pub latest_follow_up_priority: Option<FollowUpPriority>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub latest_follow_up_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::optional_enum")]
    pub tracking_status: Option<TrackingStatus>,
    /// Free-text support tier hint, e.g. "high need".
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub support_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub currently_enrolled: bool,
    #[serde(default, deserialize_with = "lenient::enum_or_fallback")]
    pub path_type: PathType,
}

impl ContactRecord {
    /// Create a record with only identity fields set.
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Set the last contact date and whether it connected.
    pub fn with_last_contact(mut self, date: NaiveDate, connected: Option<bool>) -> Self {
        self.last_contact_date = Some(date);
        self.last_contact_connected = connected;
        self
    }

    pub fn with_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    pub fn with_tracking_status(mut self, status: TrackingStatus) -> Self {
        self.tracking_status = Some(status);
        self
    }

    pub fn with_follow_up(mut self, priority: FollowUpPriority, date: Option<NaiveDate>) -> Self {
        self.latest_follow_up_priority = Some(priority);
        self.latest_follow_up_date = date;
        self
    }

    pub fn with_support_category(mut self, category: impl Into<String>) -> Self {
        self.support_category = Some(category.into());
        self
    }

    /// Outcome of the last contact attempt.
    pub fn contact_outcome(&self) -> ContactOutcome {
        self.last_contact_connected.into()
    }

    /// Whole days since the last contact, never negative. `None` if never contacted.
    pub fn days_since_contact(&self, today: NaiveDate) -> Option<i64> {
        self.last_contact_date
            .map(|date| crate::calendar::days_between(date, today).max(0))
    }

    /// "lastName, firstName", the display and sort name.
    pub fn sort_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Categorical band a queue item was placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum PriorityLevel {
    Birthday,
    ManualFollowup,
    ContactSlip,
    TrackSlip,
    FirstTouch,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::ManualFollowup => "manual-followup",
            Self::ContactSlip => "contact-slip",
            Self::TrackSlip => "track-slip",
            Self::FirstTouch => "first-touch",
        }
    }

    /// All levels in cascade order.
    pub fn all() -> [Self; 5] {
        [
            Self::Birthday,
            Self::ManualFollowup,
            Self::ContactSlip,
            Self::TrackSlip,
            Self::FirstTouch,
        ]
    }
}

/// One placement in the generated queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem<'a> {
    /// Source record, serialized as its id.
    #[serde(rename = "recordId", serialize_with = "serialize_record_id")]
    pub record: &'a ContactRecord,
    /// Lower is more urgent.
    pub priority: i32,
    pub priority_level: PriorityLevel,
    /// Informational only, never used for ordering.
    pub priority_reason: String,
    /// Raw days since last contact, or the never-contacted sentinel.
    pub days_since_last_contact: i64,
    pub is_overdue: bool,
    pub risk_score: i32,
}

impl QueueItem<'_> {
    pub fn record_id(&self) -> i64 {
        self.record.id
    }

    /// One-line human summary, as shown in the CLI table.
    pub fn explain(&self) -> String {
        format!(
            "{} [{} p{}{}] {}",
            self.record.sort_name(),
            self.priority_level.as_str(),
            self.priority,
            if self.is_overdue { ", overdue" } else { "" },
            self.priority_reason
        )
    }
}

fn serialize_record_id<S>(record: &&ContactRecord, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(record.id)
}

/// Error types for the contact queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QueueError>;

/// Decode a JSON array of records. Malformed fields degrade to absent.
pub fn parse_records(json: &str) -> Result<Vec<ContactRecord>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_records_camel_case() {
        let json = r#"[{
            "id": 1,
            "firstName": "Ana",
            "lastName": "Diaz",
            "lastContactDate": "2024-01-01",
            "lastContactConnected": true,
            "trackingStatus": "off-track",
            "doNotContact": false
        }]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.last_contact_date, Some(date(2024, 1, 1)));
        assert_eq!(r.contact_outcome(), ContactOutcome::Connected);
        assert_eq!(r.tracking_status, Some(TrackingStatus::OffTrack));
        assert_eq!(r.path_type, PathType::Other);
        assert!(!r.pinned);
    }

    #[test]
    fn test_malformed_fields_degrade_to_absent() {
        let json = r#"[{
            "id": 7,
            "lastContactDate": "not a date",
            "dateOfBirth": 12345,
            "trackingStatus": "Sideways",
            "latestFollowUpPriority": "URGENT",
            "firstName": null,
            "lastName": ["Diaz"],
            "supportCategory": "",
            "pathType": "Vocational",
            "pinned": "yes",
            "lastContactConnected": null
        }]"#;
        let records = parse_records(json).unwrap();
        let r = &records[0];
        assert_eq!(r.first_name, "");
        assert_eq!(r.last_name, "");
        assert_eq!(r.last_contact_date, None);
        assert_eq!(r.date_of_birth, None);
        assert_eq!(r.tracking_status, Some(TrackingStatus::Unknown));
        assert_eq!(r.latest_follow_up_priority, Some(FollowUpPriority::Urgent));
        assert_eq!(r.support_category, None);
        assert_eq!(r.path_type, PathType::Vocational);
        assert!(r.pinned);
        assert_eq!(r.contact_outcome(), ContactOutcome::Unknown);
    }

    #[test]
    fn test_null_names_keep_the_snapshot() {
        let json = r#"[
            {"id": 1, "firstName": "Ana", "lastName": "Diaz"},
            {"id": 2, "firstName": null, "lastName": "Fox"},
            {"id": 3, "firstName": 42}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sort_name(), "Diaz, Ana");
        assert_eq!(records[1].first_name, "");
        assert_eq!(records[1].last_name, "Fox");
        assert_eq!(records[2].first_name, "");
        assert_eq!(records[2].last_name, "");
    }

    #[test]
    fn test_explain_marks_overdue() {
        let record = ContactRecord::new(4, "Ana", "Diaz");
        let mut item = QueueItem {
            record: &record,
            priority: 1100,
            priority_level: PriorityLevel::ManualFollowup,
            priority_reason: "High follow-up due".to_string(),
            days_since_last_contact: 999,
            is_overdue: false,
            risk_score: 0,
        };
        assert_eq!(item.explain(), "Diaz, Ana [manual-followup p1100] High follow-up due");

        item.priority = 1050;
        item.is_overdue = true;
        assert_eq!(item.explain(), "Diaz, Ana [manual-followup p1050, overdue] High follow-up due");
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(matches!(parse_records(r#"{"id": 1}"#), Err(QueueError::Json(_))));
    }

    #[test]
    fn test_days_since_contact_clamps_future_dates() {
        let r = ContactRecord::new(1, "A", "B").with_last_contact(date(2024, 2, 1), None);
        assert_eq!(r.days_since_contact(date(2024, 1, 20)), Some(0));
        assert_eq!(r.days_since_contact(date(2024, 2, 11)), Some(10));
        assert_eq!(ContactRecord::new(2, "C", "D").days_since_contact(date(2024, 1, 1)), None);
    }
}
