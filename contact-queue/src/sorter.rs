//! Queue sorter - total order over queue items.
//!
//! Keys, in precedence order:
//! 1. priority ascending
//! 2. between two birthdays: date of birth ascending, then name
//! 3. overdue first
//! 4. days since last contact descending
//! 5. risk score descending
//! 6. "lastName, firstName" alphabetically, then record id

use std::cmp::Ordering;

use crate::types::{PriorityLevel, QueueItem};

/// Compare two items by the full tie-break chain.
pub fn compare_items(a: &QueueItem<'_>, b: &QueueItem<'_>) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| birthday_order(a, b))
        .then_with(|| b.is_overdue.cmp(&a.is_overdue))
        .then_with(|| b.days_since_last_contact.cmp(&a.days_since_last_contact))
        .then_with(|| b.risk_score.cmp(&a.risk_score))
        .then_with(|| name_order(a, b))
        .then_with(|| a.record.id.cmp(&b.record.id))
}

/// Oldest person first when both items are birthdays.
fn birthday_order(a: &QueueItem<'_>, b: &QueueItem<'_>) -> Ordering {
    if a.priority_level != PriorityLevel::Birthday || b.priority_level != PriorityLevel::Birthday {
        return Ordering::Equal;
    }
    a.record
        .date_of_birth
        .cmp(&b.record.date_of_birth)
        .then_with(|| name_order(a, b))
}

fn name_order(a: &QueueItem<'_>, b: &QueueItem<'_>) -> Ordering {
    let (a_name, b_name) = (a.record.sort_name(), b.record.sort_name());
    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_name.cmp(&b_name))
}

/// Sort in place.
pub fn sort_queue(items: &mut [QueueItem<'_>]) {
    items.sort_by(compare_items);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContactRecord;
    use chrono::NaiveDate;

    fn item(record: &ContactRecord, priority: i32) -> QueueItem<'_> {
        QueueItem {
            record,
            priority,
            priority_level: PriorityLevel::FirstTouch,
            priority_reason: String::new(),
            days_since_last_contact: 0,
            is_overdue: false,
            risk_score: 0,
        }
    }

    #[test]
    fn test_priority_is_primary() {
        let (a, b) = (ContactRecord::new(1, "Zed", "Zulu"), ContactRecord::new(2, "Al", "Alpha"));
        let mut items = vec![item(&b, 20), item(&a, 10)];
        sort_queue(&mut items);
        assert_eq!(items[0].record_id(), 1);
    }

    #[test]
    fn test_birthday_oldest_first() {
        let older = ContactRecord::new(1, "Ana", "Young")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1990, 3, 1).unwrap());
        let younger = ContactRecord::new(2, "Ben", "Adams")
            .with_date_of_birth(NaiveDate::from_ymd_opt(2001, 3, 1).unwrap());
        let mut a = item(&younger, 0);
        a.priority_level = PriorityLevel::Birthday;
        a.days_since_last_contact = 500;
        let mut b = item(&older, 0);
        b.priority_level = PriorityLevel::Birthday;
        assert_eq!(compare_items(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_tie_break_chain() {
        let (r1, r2) = (ContactRecord::new(1, "A", "Same"), ContactRecord::new(2, "A", "Same"));

        let (mut a, mut b) = (item(&r1, 100), item(&r2, 100));
        b.is_overdue = true;
        a.days_since_last_contact = 50;
        assert_eq!(compare_items(&b, &a), Ordering::Less);

        b.is_overdue = false;
        b.days_since_last_contact = 60;
        a.risk_score = 90;
        assert_eq!(compare_items(&b, &a), Ordering::Less);

        b.days_since_last_contact = 50;
        assert_eq!(compare_items(&a, &b), Ordering::Less);

        a.risk_score = 0;
        // Same name falls through to the id.
        assert_eq!(compare_items(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_name_order_is_case_insensitive() {
        let (lower, upper) = (ContactRecord::new(1, "x", "adams"), ContactRecord::new(2, "x", "Baker"));
        assert_eq!(compare_items(&item(&lower, 5), &item(&upper, 5)), Ordering::Less);
    }
}
