use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scheduled reminder. All timestamps are UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub category: String,
    pub text: String,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
    pub alerted: bool,
    #[serde(default)]
    pub snoozed_total_minutes: i64,
}

impl Reminder {
    pub fn new(category: String, text: String, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            text,
            scheduled_at,
            created_at: Utc::now(),
            completed: false,
            alerted: false,
            snoozed_total_minutes: 0,
        }
    }

    pub fn scheduled_display(&self) -> String {
        self.scheduled_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
