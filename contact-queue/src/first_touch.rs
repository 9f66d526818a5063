//! First-touch scoring for records with no slip.
//!
//! Two sub-scores, smaller is more urgent, packed into one integer as
//! `support * 10 + school` (11..=33).

use serde::{Deserialize, Serialize};

use crate::types::{ContactRecord, PathType};

/// Support need derived from the free-text support category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportNeed {
    High,
    Medium,
    Low,
}

impl SupportNeed {
    /// Case-sensitive substring match on the category text. Anything else,
    /// absent included, is medium.
    pub fn classify(support_category: Option<&str>) -> Self {
        let Some(category) = support_category else {
            return Self::Medium;
        };
        if category.contains("high") {
            Self::High
        } else if category.contains("low") {
            Self::Low
        } else {
            Self::Medium
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Current school situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchoolStatus {
    InSchool,
    Vocational,
    NoSchool,
}

impl SchoolStatus {
    pub fn classify(record: &ContactRecord) -> Self {
        if record.currently_enrolled {
            Self::InSchool
        } else if record.path_type == PathType::Vocational {
            Self::Vocational
        } else {
            Self::NoSchool
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Self::InSchool => 1,
            Self::Vocational => 2,
            Self::NoSchool => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InSchool => "in school",
            Self::Vocational => "vocational",
            Self::NoSchool => "no school",
        }
    }
}

/// Packed first-touch score and its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstTouchScore {
    pub priority: i32,
    pub reason: String,
}

pub fn score_first_touch(record: &ContactRecord) -> FirstTouchScore {
    let support = SupportNeed::classify(record.support_category.as_deref());
    let school = SchoolStatus::classify(record);
    FirstTouchScore {
        priority: support.priority() * 10 + school.priority(),
        reason: format!("First touch: {} support, {}", support.as_str(), school.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_need_substring_match() {
        assert_eq!(SupportNeed::classify(Some("high need")), SupportNeed::High);
        assert_eq!(SupportNeed::classify(Some("very-high")), SupportNeed::High);
        assert_eq!(SupportNeed::classify(Some("High Need")), SupportNeed::Medium);
        assert_eq!(SupportNeed::classify(Some("LOW")), SupportNeed::Medium);
        assert_eq!(SupportNeed::classify(Some("low-touch")), SupportNeed::Low);
        assert_eq!(SupportNeed::classify(Some("standard")), SupportNeed::Medium);
        assert_eq!(SupportNeed::classify(None), SupportNeed::Medium);
    }

    #[test]
    fn test_school_status() {
        let mut record = ContactRecord::new(1, "A", "B");
        assert_eq!(SchoolStatus::classify(&record), SchoolStatus::NoSchool);
        record.path_type = PathType::Vocational;
        assert_eq!(SchoolStatus::classify(&record), SchoolStatus::Vocational);
        record.currently_enrolled = true;
        assert_eq!(SchoolStatus::classify(&record), SchoolStatus::InSchool);
    }

    #[test]
    fn test_score_range() {
        let high_in_school = {
            let mut r = ContactRecord::new(1, "A", "B").with_support_category("high");
            r.currently_enrolled = true;
            r
        };
        assert_eq!(score_first_touch(&high_in_school).priority, 11);

        let low_no_school = ContactRecord::new(2, "C", "D").with_support_category("low");
        assert_eq!(score_first_touch(&low_no_school).priority, 33);

        let default = ContactRecord::new(3, "E", "F");
        let score = score_first_touch(&default);
        assert_eq!(score.priority, 23);
        assert_eq!(score.reason, "First touch: medium support, no school");
    }
}
