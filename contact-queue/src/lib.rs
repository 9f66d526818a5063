//! Contact Queue - who to contact next, and why
//!
//! Ranks alumni/student contact records into an ordered outreach queue:
//!
//! - **Eligibility**: do-not-contact, snooze, daily skip and cooldown gates
//! - **Recency & slips**: contact-recency and tracking-status degradation
//! - **First touch**: static need/status score for everyone else
//! - **Assembler**: first-match rule chain plus birthday and pin overrides
//! - **Sorter**: strict total order with a fixed tie-break chain
//!
//! # Architecture
//!
//! ```text
//! records ──► EligibilityFilter ──► Assembler ──────────────► sort_queue ──► queue
//!                  │                   │
//!              excluded          ┌─────┴──────────────────┐
//!                                │ RecencyClassifier      │
//!                                │ Contact/TrackSlip      │
//!                                │ first-touch score      │
//!                                │ RuleChain + pin        │
//!                                └────────────────────────┘
//! ```
//!
//! Every stage is a pure function of the record snapshot and an explicit
//! `today`; records are borrowed, never mutated.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use contact_queue::{generate_queue, ContactRecord, PriorityLevel, TrackingStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! let records = vec![ContactRecord::new(1, "Ana", "Diaz")
//!     .with_last_contact(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Some(true))
//!     .with_tracking_status(TrackingStatus::OffTrack)];
//!
//! let queue = generate_queue(&records, today);
//! assert_eq!(queue[0].priority_level, PriorityLevel::TrackSlip);
//! assert_eq!(queue[0].priority, 3900);
//! ```

pub mod assembler;
pub mod calendar;
pub mod config;
pub mod eligibility;
pub mod first_touch;
pub mod lenient;
pub mod queue;
pub mod recency;
pub mod risk;
pub mod slip;
pub mod sorter;
pub mod types;

// Re-export main types
pub use assembler::{Assembler, PriorityRule, RuleChain};
pub use config::QueueConfig;
pub use eligibility::{EligibilityFilter, ExclusionReason};
pub use queue::{generate_queue, QueueGenerator, QueueReport, QueueSummary};
pub use recency::{RecencyClassifier, RecencyTier};
pub use sorter::{compare_items, sort_queue};
pub use types::*;
