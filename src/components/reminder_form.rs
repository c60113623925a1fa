use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Category,
    Date,
    Time,
    Text,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Text,
            FormField::Text => FormField::Category,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Category => FormField::Text,
            FormField::Date => FormField::Category,
            FormField::Time => FormField::Date,
            FormField::Text => FormField::Time,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub category_index: usize,
    pub date: String,
    pub time: String,
    pub text: String,
    pub active_field: FormField,
}

impl ReminderFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category_index: 0,
            date: today.format("%Y-%m-%d").to_string(),
            time: "00:00".to_string(),
            text: String::new(),
            active_field: FormField::Category,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), "%H:%M").ok()
    }

    /// The UTC instant the form describes, if date and time both parse.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        let date = self.parsed_date()?;
        let time = self.parsed_time()?;
        Some(date.and_time(time).and_utc())
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Date => self.date.push(c),
            FormField::Time => self.time.push(c),
            FormField::Text => self.text.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Date => {
                self.date.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
            FormField::Text => {
                self.text.pop();
            }
            FormField::Category => {}
        }
    }

    pub fn next_category(&mut self, total: usize) {
        if total > 0 {
            self.category_index = (self.category_index + 1) % total;
        }
    }

    pub fn prev_category(&mut self, total: usize) {
        if total > 0 {
            self.category_index = (self.category_index + total - 1) % total;
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && self.scheduled_at().is_some()
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &ReminderFormState,
        categories: &[String],
    ) {
        // Center the form popup
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(11).max(9);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        // Clear background
        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Reminder (UTC) ")
            .title_style(
                Style::default()
                    .fg(ratatui::style::Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // category
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // text
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let category = categories
            .get(state.category_index)
            .map(|c| c.as_str())
            .unwrap_or("?");
        render_field(
            frame,
            rows[0],
            "Sport:",
            &format!("< {} >", category),
            state.active_field == FormField::Category,
        );
        render_field(
            frame,
            rows[1],
            "Date:",
            &state.date,
            state.active_field == FormField::Date,
        );
        render_field(
            frame,
            rows[2],
            "Time:",
            &state.time,
            state.active_field == FormField::Time,
        );
        render_field(
            frame,
            rows[3],
            "Note:",
            &state.text,
            state.active_field == FormField::Text,
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme::current().dim),
            Span::styled("\u{2190}/\u{2192}", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Sport ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Add ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let label_w = 7;
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(
            format!("{:<width$}", label, width = label_w),
            theme::current().dim,
        ),
        Span::styled(format!("{}{}", value, cursor), style),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parses_utc_instant() {
        let mut form = ReminderFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        form.date = "2024-01-02".to_string();
        form.time = "10:30".to_string();
        form.text = "goes live".to_string();

        assert!(form.is_valid());
        let scheduled = form.scheduled_at().unwrap();
        assert_eq!(scheduled, "2024-01-02T10:30:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_form_rejects_garbage_and_blank_note() {
        let mut form = ReminderFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        form.text = "goes live".to_string();
        form.date = "tomorrow".to_string();
        assert!(form.scheduled_at().is_none());
        assert!(!form.is_valid());

        form.date = "2024-01-02".to_string();
        form.time = "25:99".to_string();
        assert!(!form.is_valid());

        form.time = "10:30".to_string();
        form.text = "   ".to_string();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut form = ReminderFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        form.next_category(3);
        form.next_category(3);
        form.next_category(3);
        assert_eq!(form.category_index, 0);
        form.prev_category(3);
        assert_eq!(form.category_index, 2);
    }
}
