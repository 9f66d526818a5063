//! Priority rule chain.
//!
//! Each [`PriorityRule`] is a predicate and a placement in one. The chain is
//! walked in order and the first rule that produces a placement wins; there
//! is no fallthrough.
//!
//! When a record slips on both signals the tracking status labels it: the
//! track-slip rule runs ahead of the contact-slip rule in the standard chain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::{PriorityConfig, MAX_URGENCY};
use crate::first_touch::score_first_touch;
use crate::slip::SlipResult;
use crate::types::{ContactRecord, FollowUpPriority, PriorityLevel};

/// Everything a rule may look at, computed once per record.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub record: &'a ContactRecord,
    pub today: NaiveDate,
    pub days_since_contact: Option<i64>,
    pub contact_slip: SlipResult,
    pub track_slip: SlipResult,
}

/// What a matching rule assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub level: PriorityLevel,
    pub priority: i32,
    pub reason: String,
    pub is_overdue: bool,
}

impl Placement {
    fn new(level: PriorityLevel, priority: i32, reason: impl Into<String>) -> Self {
        Self {
            level,
            priority,
            reason: reason.into(),
            is_overdue: false,
        }
    }

    fn overdue(mut self, is_overdue: bool) -> Self {
        self.is_overdue = is_overdue;
        self
    }
}

/// A rule in the priority cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityRule {
    /// Today is the record's birthday
    Birthday,
    /// Previously contacted, but not for a long time
    SafetyNet,
    /// A manual follow-up has come due
    ManualFollowUp,
    /// Contact recency slipped
    ContactSlip,
    /// Tracking status slipped
    TrackSlip,
    /// Fallback, always matches
    FirstTouch,
}

impl PriorityRule {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::SafetyNet => "safety_net",
            Self::ManualFollowUp => "manual_follow_up",
            Self::ContactSlip => "contact_slip",
            Self::TrackSlip => "track_slip",
            Self::FirstTouch => "first_touch",
        }
    }

    /// Placement for this record, or `None` when the rule does not apply.
    pub fn evaluate(&self, ctx: &RuleContext<'_>, config: &PriorityConfig) -> Option<Placement> {
        match self {
            Self::Birthday => calendar::is_birthday(ctx.record.date_of_birth, ctx.today).then(|| {
                Placement::new(PriorityLevel::Birthday, config.birthday_priority, "Birthday today")
            }),
            Self::SafetyNet => {
                let days = ctx.days_since_contact?;
                (days >= config.safety_net_days).then(|| {
                    Placement::new(
                        PriorityLevel::ContactSlip,
                        config.safety_net_priority,
                        format!("No contact in {} days, past the {}-day safety net", days, config.safety_net_days),
                    )
                    .overdue(true)
                })
            }
            Self::ManualFollowUp => manual_follow_up(ctx, config),
            Self::ContactSlip => ctx.contact_slip.has_slipped.then(|| {
                Placement::new(
                    PriorityLevel::ContactSlip,
                    slip_priority(config.contact_slip_base, ctx.contact_slip.urgency, config),
                    ctx.contact_slip.description.clone(),
                )
            }),
            Self::TrackSlip => ctx.track_slip.has_slipped.then(|| {
                Placement::new(
                    PriorityLevel::TrackSlip,
                    slip_priority(config.track_slip_base, ctx.track_slip.urgency, config),
                    ctx.track_slip.description.clone(),
                )
            }),
            Self::FirstTouch => Some(first_touch(ctx, config)),
        }
    }
}

/// Higher urgency lands closer to the band base.
fn slip_priority(base: i32, urgency: i32, config: &PriorityConfig) -> i32 {
    base + (MAX_URGENCY - urgency) * config.slip_step
}

fn manual_follow_up(ctx: &RuleContext<'_>, config: &PriorityConfig) -> Option<Placement> {
    let level = ctx.record.latest_follow_up_priority?;
    let base = match level {
        FollowUpPriority::None => return None,
        FollowUpPriority::Urgent => config.follow_up_urgent,
        FollowUpPriority::High => config.follow_up_high,
        FollowUpPriority::Normal => config.follow_up_normal,
        FollowUpPriority::Low => config.follow_up_low,
    };

    let due_date = ctx.record.latest_follow_up_date;
    let is_due = level == FollowUpPriority::Urgent || due_date.is_some_and(|due| due <= ctx.today);
    if !is_due {
        return None;
    }

    let is_overdue = due_date.is_some_and(|due| due < ctx.today);
    let (priority, reason) = match due_date {
        Some(due) if is_overdue => (
            base - config.overdue_bonus,
            format!("{} follow-up overdue since {}", capitalize(level.as_str()), due),
        ),
        _ => (base, format!("{} follow-up due", capitalize(level.as_str()))),
    };
    Some(Placement::new(PriorityLevel::ManualFollowup, priority, reason).overdue(is_overdue))
}

pub(crate) fn first_touch(ctx: &RuleContext<'_>, config: &PriorityConfig) -> Placement {
    let score = score_first_touch(ctx.record);
    Placement::new(
        PriorityLevel::FirstTouch,
        config.first_touch_base + score.priority,
        score.reason,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered list of rules, first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChain {
    rules: Vec<PriorityRule>,
}

impl RuleChain {
    /// The production cascade.
    pub fn standard() -> Self {
        Self::new(vec![
            PriorityRule::Birthday,
            PriorityRule::SafetyNet,
            PriorityRule::ManualFollowUp,
            PriorityRule::TrackSlip,
            PriorityRule::ContactSlip,
            PriorityRule::FirstTouch,
        ])
    }

    pub fn new(rules: Vec<PriorityRule>) -> Self {
        Self { rules }
    }

    /// First rule that places the record, with its placement.
    pub fn evaluate(&self, ctx: &RuleContext<'_>, config: &PriorityConfig) -> Option<(PriorityRule, Placement)> {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(ctx, config).map(|placement| (*rule, placement)))
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard()
    }
}
