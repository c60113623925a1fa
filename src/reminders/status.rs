use chrono::{DateTime, Utc};

use super::reminder::Reminder;

/// Lifecycle state of a reminder at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Due,
    Upcoming,
    Completed,
}

/// Due the moment the wall clock reaches the scheduled time (inclusive).
pub fn classify(reminder: &Reminder, now: DateTime<Utc>) -> Status {
    if reminder.completed {
        Status::Completed
    } else if now >= reminder.scheduled_at {
        Status::Due
    } else {
        Status::Upcoming
    }
}

/// Whole minutes until the scheduled time. Meaningful for upcoming reminders.
pub fn minutes_until(reminder: &Reminder, now: DateTime<Utc>) -> i64 {
    (reminder.scheduled_at - now).num_minutes()
}

/// Board order: soonest first, category name breaking ties.
pub fn sort_for_board(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| {
        (a.scheduled_at, a.category.as_str()).cmp(&(b.scheduled_at, b.category.as_str()))
    });
}

/// Split into (due, upcoming, completed), preserving input order within each.
pub fn partition(
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> (Vec<Reminder>, Vec<Reminder>, Vec<Reminder>) {
    let mut due = Vec::new();
    let mut upcoming = Vec::new();
    let mut completed = Vec::new();
    for reminder in reminders {
        match classify(reminder, now) {
            Status::Due => due.push(reminder.clone()),
            Status::Upcoming => upcoming.push(reminder.clone()),
            Status::Completed => completed.push(reminder.clone()),
        }
    }
    (due, upcoming, completed)
}

/// Due reminders that have not alerted yet. Callers must latch these as
/// alerted through the store (persisting) before firing any alert side
/// effect, so each due transition alerts exactly once.
pub fn select_newly_due(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<Reminder> {
    reminders
        .iter()
        .filter(|r| !r.alerted && classify(r, now) == Status::Due)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn reminder(category: &str, scheduled: &str) -> Reminder {
        Reminder::new(category.to_string(), "goes live".to_string(), utc(scheduled))
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let r = reminder("Cricket", "2024-01-01T10:00:00Z");
        assert_eq!(classify(&r, utc("2024-01-01T09:59:59Z")), Status::Upcoming);
        assert_eq!(classify(&r, utc("2024-01-01T10:00:00Z")), Status::Due);
        assert_eq!(classify(&r, utc("2024-01-01T10:00:01Z")), Status::Due);
    }

    #[test]
    fn test_completed_wins_over_time() {
        let mut r = reminder("Cricket", "2024-01-01T10:00:00Z");
        r.completed = true;
        assert_eq!(classify(&r, utc("2024-01-01T09:00:00Z")), Status::Completed);
        assert_eq!(classify(&r, utc("2024-01-01T11:00:00Z")), Status::Completed);
    }

    #[test]
    fn test_classify_is_monotonic_without_snooze() {
        let r = reminder("Cricket", "2024-01-01T10:00:00Z");
        let mut now = utc("2024-01-01T10:00:00Z");
        for _ in 0..5 {
            assert_eq!(classify(&r, now), Status::Due);
            now += chrono::Duration::hours(3);
        }
    }

    #[test]
    fn test_minutes_until_floors() {
        let r = reminder("Cricket", "2024-01-01T10:00:00Z");
        assert_eq!(minutes_until(&r, utc("2024-01-01T09:58:30Z")), 1);
        assert_eq!(minutes_until(&r, utc("2024-01-01T09:59:59Z")), 0);
        assert_eq!(minutes_until(&r, utc("2024-01-01T08:00:00Z")), 120);
    }

    #[test]
    fn test_sort_orders_by_time_then_category() {
        let mut items = vec![
            reminder("Darts", "2024-01-01T10:00:00Z"),
            reminder("Cricket", "2024-01-01T10:00:00Z"),
            reminder("Snooker", "2024-01-01T09:00:00Z"),
        ];
        sort_for_board(&mut items);
        let order: Vec<&str> = items.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, ["Snooker", "Cricket", "Darts"]);
    }

    #[test]
    fn test_partition_preserves_order_and_excludes_completed() {
        let mut done = reminder("Darts", "2024-01-01T08:00:00Z");
        done.completed = true;
        let items = vec![
            reminder("Cricket", "2024-01-01T09:00:00Z"),
            done,
            reminder("Snooker", "2024-01-01T09:30:00Z"),
            reminder("Boxing", "2024-01-01T11:00:00Z"),
        ];

        let now = utc("2024-01-01T10:00:00Z");
        let (due, upcoming, completed) = partition(&items, now);

        let due_names: Vec<&str> = due.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(due_names, ["Cricket", "Snooker"]);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].category, "Boxing");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].category, "Darts");
    }

    #[test]
    fn test_select_newly_due_fires_once() {
        let now = utc("2024-01-01T10:00:00Z");
        let mut items = vec![
            reminder("Cricket", "2024-01-01T09:00:00Z"),
            reminder("Darts", "2024-01-01T11:00:00Z"),
        ];

        let newly = select_newly_due(&items, now);
        assert_eq!(newly.len(), 1);
        assert_eq!(newly[0].category, "Cricket");

        // After the caller latches the alert flag, the same instant yields nothing.
        items[0].alerted = true;
        assert!(select_newly_due(&items, now).is_empty());
    }

    #[test]
    fn test_snooze_rearms_selection() {
        let mut r = reminder("Cricket", "2024-01-01T09:00:00Z");
        r.alerted = true;

        // What the store's snooze does: push forward, clear the flag.
        r.scheduled_at += chrono::Duration::minutes(2);
        r.alerted = false;

        let before = utc("2024-01-01T09:01:00Z");
        let after = utc("2024-01-01T09:02:00Z");
        assert!(select_newly_due(std::slice::from_ref(&r), before).is_empty());
        assert_eq!(select_newly_due(std::slice::from_ref(&r), after).len(), 1);
    }
}
