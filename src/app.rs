use chrono::{DateTime, Utc};

use crate::components::reminder_form::ReminderFormState;
use crate::config::Config;
use crate::reminders::{status, Reminder, Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Section {
    Due,
    Upcoming,
    Completed,
}

impl Section {
    pub fn next(self) -> Self {
        match self {
            Section::Due => Section::Upcoming,
            Section::Upcoming => Section::Completed,
            Section::Completed => Section::Due,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Section::Due => Section::Completed,
            Section::Upcoming => Section::Due,
            Section::Completed => Section::Upcoming,
        }
    }
}

pub struct App {
    pub running: bool,
    pub config: Config,
    pub due: Vec<Reminder>,
    pub upcoming: Vec<Reminder>,
    pub completed: Vec<Reminder>,
    pub focus: Section,
    pub selected: usize,
    pub form_state: Option<ReminderFormState>,
    pub detail: Option<Reminder>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub sound_enabled: bool,
    pub check_requested: bool,
    store: Store,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = Store::open(config.data_file.clone(), config.categories.clone());
        let sound_enabled = config.sound;

        let mut app = Self {
            running: true,
            config,
            due: Vec::new(),
            upcoming: Vec::new(),
            completed: Vec::new(),
            focus: Section::Due,
            selected: 0,
            form_state: None,
            detail: None,
            status_message: None,
            show_help: false,
            sound_enabled,
            check_requested: false,
            store,
        };
        app.refresh(Utc::now());
        app
    }

    /// Re-partition the board against `now`.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        let mut items = self.store.list().to_vec();
        status::sort_for_board(&mut items);
        let (due, upcoming, completed) = status::partition(&items, now);
        self.due = due;
        self.upcoming = upcoming;
        self.completed = completed;
        self.clamp_selection();
    }

    /// One poll tick: find reminders that just crossed their scheduled time,
    /// latch their alert flag (persisting first), and report how many there
    /// were so the caller can fire the alert sink.
    pub fn check_due(&mut self, now: DateTime<Utc>) -> usize {
        let newly = status::select_newly_due(self.store.list(), now);
        let count = newly.len();
        if count > 0 {
            let ids: Vec<_> = newly.iter().map(|r| r.id).collect();
            if let Err(e) = self.store.mark_alerted(&ids) {
                self.status_message = Some(e.to_string());
                self.refresh(now);
                return 0;
            }
            self.status_message = Some(format!(
                "{} reminder{} due now",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
        self.refresh(now);
        count
    }

    pub fn focused_list(&self) -> &[Reminder] {
        match self.focus {
            Section::Due => &self.due,
            Section::Upcoming => &self.upcoming,
            Section::Completed => &self.completed,
        }
    }

    pub fn selected_reminder(&self) -> Option<&Reminder> {
        self.focused_list().get(self.selected)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.selected = 0;
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.focused_list().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.focused_list().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    // ── user actions ──

    pub fn open_form(&mut self, now: DateTime<Utc>) {
        self.form_state = Some(ReminderFormState::new(now.date_naive()));
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
    }

    pub fn submit_form(&mut self, now: DateTime<Utc>) {
        let Some(form) = self.form_state.clone() else {
            return;
        };

        let Some(scheduled_at) = form.scheduled_at() else {
            self.status_message = Some("Enter a valid UTC date and time".to_string());
            return;
        };
        let category = self
            .store
            .categories()
            .get(form.category_index)
            .cloned()
            .unwrap_or_default();

        match self.store.add(&category, &form.text, scheduled_at) {
            Ok(added) => {
                self.status_message = Some(format!(
                    "Added {} at {}",
                    added.category,
                    added.scheduled_display()
                ));
                self.form_state = None;
                self.refresh(now);
            }
            Err(e) => {
                // Keep the form open so the input can be fixed
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn complete_selected(&mut self, now: DateTime<Utc>) {
        let Some(id) = self.selected_reminder().map(|r| r.id) else {
            return;
        };
        let result = self.store.complete(id);
        self.report("Marked done", result);
        self.refresh(now);
    }

    pub fn snooze_selected(&mut self, now: DateTime<Utc>) {
        let Some(id) = self.selected_reminder().map(|r| r.id) else {
            return;
        };
        let minutes = self.config.snooze_minutes;
        let result = self.store.snooze(id, minutes);
        self.report(&format!("Snoozed +{}m", minutes), result);
        self.refresh(now);
    }

    pub fn delete_selected(&mut self, now: DateTime<Utc>) {
        let Some(id) = self.selected_reminder().map(|r| r.id) else {
            return;
        };
        let result = self.store.delete(id);
        self.report("Deleted", result);
        self.refresh(now);
    }

    pub fn show_detail(&mut self) {
        self.detail = self.selected_reminder().cloned();
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        self.status_message = Some(if self.sound_enabled {
            "Sound on".to_string()
        } else {
            "Sound muted".to_string()
        });
    }

    fn report(&mut self, ok_message: &str, result: Result<(), StoreError>) {
        self.status_message = Some(match result {
            Ok(()) => ok_message.to_string(),
            // A stale id means the row vanished under a double press
            Err(StoreError::NotFound(_)) => "Reminder no longer exists".to_string(),
            Err(e) => e.to_string(),
        });
    }
}
