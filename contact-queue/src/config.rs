//! Configuration for queue generation.
//!
//! Defaults reproduce the production outreach rules; a YAML file only needs
//! the keys it wants to change.

use serde::{Deserialize, Serialize};

use crate::types::{QueueError, Result};

/// Configuration for a queue generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Exclusion gate configuration
    pub eligibility: EligibilityConfig,
    /// Recency tier boundaries
    pub recency: RecencyConfig,
    /// Slip detector urgencies
    pub slip: SlipConfig,
    /// Priority cascade constants
    pub priority: PriorityConfig,
    /// Risk score weights
    pub risk: RiskConfig,
    /// Output shaping
    pub queue: OutputConfig,
}

impl QueueConfig {
    /// Load config from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations the cascade cannot order consistently.
    pub fn validate(&self) -> Result<()> {
        let r = &self.recency;
        if !(r.recent_max_days < r.moderate_max_days && r.moderate_max_days < r.distant_max_days) {
            return Err(QueueError::Config(format!(
                "recency bounds must increase: recent {} < moderate {} < distant {}",
                r.recent_max_days, r.moderate_max_days, r.distant_max_days
            )));
        }
        if r.never_contacted_days <= r.distant_max_days {
            return Err(QueueError::Config(
                "never_contacted_days must exceed distant_max_days".to_string(),
            ));
        }

        let s = &self.slip;
        let urgencies = [
            ("failed_boost_urgency", s.failed_boost_urgency),
            ("moderate_urgency", s.moderate_urgency),
            ("distant_urgency", s.distant_urgency),
            ("stale_urgency", s.stale_urgency),
            ("near_track_urgency", s.near_track_urgency),
            ("off_track_urgency", s.off_track_urgency),
        ];
        for (name, value) in urgencies {
            if !(0..=MAX_URGENCY).contains(&value) {
                return Err(QueueError::Config(format!(
                    "{} must be within 0..={}, got {}",
                    name, MAX_URGENCY, value
                )));
            }
        }

        let e = &self.eligibility;
        let cooldowns = [
            e.connected_cooldown_days,
            e.failed_cooldown_days,
            e.failed_retry_cooldown_days,
            e.default_cooldown_days,
        ];
        if cooldowns.iter().any(|d| *d < 0) || e.failed_retry_window_days < 0 {
            return Err(QueueError::Config("cooldowns must not be negative".to_string()));
        }

        // Birthdays must own their priority value or the birthday tie-break
        // would compare against non-birthday items.
        let p = &self.priority;
        let lowest_band = [
            p.safety_net_priority,
            p.follow_up_urgent
                .min(p.follow_up_high)
                .min(p.follow_up_normal)
                .min(p.follow_up_low)
                .saturating_sub(p.overdue_bonus),
            p.contact_slip_base,
            p.track_slip_base,
            p.first_touch_base,
        ]
        .into_iter()
        .min()
        .unwrap_or(i32::MAX);
        if !(p.birthday_priority < p.pinned_priority && p.pinned_priority < lowest_band) {
            return Err(QueueError::Config(format!(
                "expected birthday_priority {} < pinned_priority {} < lowest band priority {}",
                p.birthday_priority, p.pinned_priority, lowest_band
            )));
        }

        if self.queue.max_items == Some(0) {
            return Err(QueueError::Config("max_items must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Slip urgencies are folded into priority as `base + (MAX_URGENCY - urgency) * step`.
pub const MAX_URGENCY: i32 = 10;

/// Cooldown rules for the eligibility gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Cooldown after a successful contact
    pub connected_cooldown_days: i64,
    /// Cooldown after a failed attempt, inside the retry window
    pub failed_cooldown_days: i64,
    /// Days after a failed attempt during which the longer cooldown applies
    pub failed_retry_window_days: i64,
    /// Cooldown after a failed attempt, once the retry window has passed
    pub failed_retry_cooldown_days: i64,
    /// Cooldown when the outcome is unknown
    pub default_cooldown_days: i64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            connected_cooldown_days: 7,
            failed_cooldown_days: 5,
            failed_retry_window_days: 5,
            failed_retry_cooldown_days: 3,
            default_cooldown_days: 3,
        }
    }
}

/// Upper bounds (inclusive) of the recency tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyConfig {
    pub recent_max_days: i64,
    pub moderate_max_days: i64,
    pub distant_max_days: i64,
    /// Sentinel reported for records that were never contacted
    pub never_contacted_days: i64,
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            recent_max_days: 7,
            moderate_max_days: 21,
            distant_max_days: 45,
            never_contacted_days: 999,
        }
    }
}

/// Urgencies assigned by the slip detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipConfig {
    /// A failed attempt this recent is retried first
    pub failed_boost_window_days: i64,
    pub failed_boost_urgency: i32,
    pub moderate_urgency: i32,
    pub distant_urgency: i32,
    pub stale_urgency: i32,
    pub near_track_urgency: i32,
    pub off_track_urgency: i32,
}

impl Default for SlipConfig {
    fn default() -> Self {
        Self {
            failed_boost_window_days: 5,
            failed_boost_urgency: 4,
            moderate_urgency: 3,
            distant_urgency: 2,
            stale_urgency: 1,
            near_track_urgency: 2,
            off_track_urgency: 1,
        }
    }
}

/// Constants of the priority cascade. Lower numbers are more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    pub birthday_priority: i32,
    pub pinned_priority: i32,
    /// Days without contact that trigger the safety net
    pub safety_net_days: i64,
    pub safety_net_priority: i32,
    pub follow_up_urgent: i32,
    pub follow_up_high: i32,
    pub follow_up_normal: i32,
    pub follow_up_low: i32,
    /// Subtracted from a follow-up whose due date has passed
    pub overdue_bonus: i32,
    pub contact_slip_base: i32,
    pub track_slip_base: i32,
    /// Priority added per missing urgency point in a slip band
    pub slip_step: i32,
    pub first_touch_base: i32,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            birthday_priority: 0,
            pinned_priority: 10,
            safety_net_days: 100,
            safety_net_priority: 1050,
            follow_up_urgent: 1000,
            follow_up_high: 1100,
            follow_up_normal: 1200,
            follow_up_low: 1300,
            overdue_bonus: 50,
            contact_slip_base: 2000,
            track_slip_base: 3000,
            slip_step: 100,
            first_touch_base: 4000,
        }
    }
}

/// Weights of the secondary risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub off_track_weight: i32,
    pub near_track_weight: i32,
    /// Days since contact count up to this cap
    pub days_cap: i64,
    pub never_contacted_weight: i32,
    pub high_support_weight: i32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            off_track_weight: 30,
            near_track_weight: 15,
            days_cap: 100,
            never_contacted_weight: 50,
            high_support_weight: 10,
        }
    }
}

/// Output shaping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Daily capacity; the ordered queue is truncated to this length
    pub max_items: Option<usize>,
}
