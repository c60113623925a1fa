use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::reminder::Reminder;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("no reminder with id {0}")]
    NotFound(Uuid),
    #[error("failed to write {}: {}", path.display(), source)]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Authoritative owner of the reminder collection. Every mutation persists
/// the whole collection; a failed write restores the prior in-memory state
/// so memory and disk never diverge.
pub struct Store {
    path: PathBuf,
    categories: Vec<String>,
    items: Vec<Reminder>,
}

impl Store {
    /// Open the store at `path`. A missing or unreadable snapshot yields an
    /// empty collection rather than an error.
    pub fn open(path: impl Into<PathBuf>, categories: Vec<String>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let items = load_snapshot(&path);
        Self {
            path,
            categories,
            items,
        }
    }

    pub fn list(&self) -> &[Reminder] {
        &self.items
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn add(
        &mut self,
        category: &str,
        text: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Reminder, StoreError> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(StoreError::Validation(format!(
                "unknown category: {category}"
            )));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Validation(
                "reminder text is empty".to_string(),
            ));
        }

        let reminder = Reminder::new(category.to_string(), text.to_string(), scheduled_at);
        self.items.push(reminder.clone());
        if let Err(e) = self.save() {
            self.items.pop();
            return Err(e);
        }
        Ok(reminder)
    }

    /// Push the scheduled time forward and re-arm the alert.
    pub fn snooze(&mut self, id: Uuid, minutes: i64) -> Result<(), StoreError> {
        if minutes < 1 {
            return Err(StoreError::Validation(
                "snooze minutes must be positive".to_string(),
            ));
        }
        let idx = self.position(id)?;
        if self.items[idx].completed {
            return Err(StoreError::Validation(
                "reminder is already completed".to_string(),
            ));
        }

        let prior = self.items.clone();
        let reminder = &mut self.items[idx];
        reminder.scheduled_at += Duration::minutes(minutes);
        reminder.alerted = false;
        reminder.snoozed_total_minutes += minutes;
        self.persist_or_revert(prior)
    }

    /// Idempotent: completing a completed reminder is a redundant persist.
    pub fn complete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let prior = self.items.clone();
        self.items[idx].completed = true;
        self.persist_or_revert(prior)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let prior = self.items.clone();
        self.items.remove(idx);
        self.persist_or_revert(prior)
    }

    /// Latch the alert flag for the given reminders, persisting once. Ids
    /// that no longer exist are skipped.
    pub fn mark_alerted(&mut self, ids: &[Uuid]) -> Result<(), StoreError> {
        let prior = self.items.clone();
        for reminder in self.items.iter_mut() {
            if ids.contains(&reminder.id) {
                reminder.alerted = true;
            }
        }
        self.persist_or_revert(prior)
    }

    fn position(&self, id: Uuid) -> Result<usize, StoreError> {
        self.items
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn persist_or_revert(&mut self, prior: Vec<Reminder>) -> Result<(), StoreError> {
        match self.save() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.items = prior;
                Err(e)
            }
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn load_snapshot(path: &Path) -> Vec<Reminder> {
    if !path.exists() {
        return Vec::new();
    }
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}
