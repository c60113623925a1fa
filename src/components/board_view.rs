use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::Section;
use crate::reminders::{status, Reminder, Status};
use crate::theme;

pub struct BoardSection;

impl BoardSection {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        section: Section,
        reminders: &[Reminder],
        now: DateTime<Utc>,
        focused: bool,
        selected: usize,
    ) {
        let w = area.width as usize;

        let name = match section {
            Section::Due => "Due now",
            Section::Upcoming => "Upcoming",
            Section::Completed => "Completed",
        };
        let title = if w >= 25 {
            format!(" {} ({}) ", name, reminders.len())
        } else {
            format!(" {} ", name)
        };

        let border_style = if focused {
            Style::default().fg(ratatui::style::Color::Cyan)
        } else {
            theme::current().border
        };
        let title_style = if section == Section::Due && !reminders.is_empty() {
            theme::current().due
        } else {
            theme::HEADER_STYLE
        };

        let block = Block::default()
            .title(title)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(border_style);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = match section {
                Section::Due => "No due reminders at the moment.",
                Section::Upcoming => "Nothing upcoming.",
                Section::Completed => "No completed items yet.",
            };
            frame.render_widget(Paragraph::new(msg).style(theme::DIM_STYLE), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        // Keep the selected row visible
        let visible = area.height.saturating_sub(2) as usize;
        let skip = if focused && visible > 0 && selected + 1 > visible {
            selected + 1 - visible
        } else {
            0
        };

        let items: Vec<ListItem> = reminders
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, r)| format_row(r, section, now, inner_w, focused && i == selected))
            .collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn format_row(
    reminder: &Reminder,
    section: Section,
    now: DateTime<Utc>,
    max_width: usize,
    selected: bool,
) -> ListItem<'static> {
    let time_str = format!(" {} ", reminder.scheduled_at.format("%m-%d %H:%M"));

    let (marker, category_style, text_style) = match section {
        Section::Due => ("! ", theme::current().due, Style::default()),
        Section::Upcoming => ("  ", theme::current().header, Style::default()),
        Section::Completed => (
            "x ",
            theme::current().done,
            theme::current().done.add_modifier(Modifier::CROSSED_OUT),
        ),
    };

    let reserved = 2 + time_str.len() + reminder.category.len() + 2;
    let mut spans = vec![
        Span::styled(marker.to_string(), category_style),
        Span::styled(time_str, theme::DIM_STYLE),
        Span::styled(format!("{} ", reminder.category), category_style),
        Span::styled(
            truncate(&reminder.text, max_width.saturating_sub(reserved)),
            text_style,
        ),
    ];

    let suffix = match section {
        Section::Upcoming => {
            let mut s = format!(" in {} min", status::minutes_until(reminder, now));
            if reminder.snoozed_total_minutes > 0 {
                s.push_str(&format!(" (+{}m snoozed)", reminder.snoozed_total_minutes));
            }
            s
        }
        Section::Due if reminder.snoozed_total_minutes > 0 => {
            format!(" (+{}m snoozed)", reminder.snoozed_total_minutes)
        }
        _ => String::new(),
    };
    // Only show the context suffix if there's room
    if !suffix.is_empty() {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        if used + suffix.len() <= max_width {
            spans.push(Span::styled(suffix, theme::DIM_STYLE));
        }
    }

    if selected {
        spans = spans
            .into_iter()
            .map(|s| Span::styled(s.content, theme::current().selected))
            .collect();
    }

    ListItem::new(Line::from(spans))
}

/// Render a reminder detail popup overlay.
pub fn render_detail_popup(
    frame: &mut Frame,
    area: Rect,
    reminder: &Reminder,
    now: DateTime<Utc>,
) {
    let popup_w = area.width.min(60).max(30);
    let popup_h = area.height.min(14).max(9);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", reminder.category))
        .title_style(
            Style::default()
                .fg(ratatui::style::Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let status_line = match status::classify(reminder, now) {
        Status::Completed => "Completed".to_string(),
        Status::Due => "Due now".to_string(),
        Status::Upcoming => format!("In {} min", status::minutes_until(reminder, now)),
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(reminder.text.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Scheduled: ", theme::DIM_STYLE),
        Span::styled(reminder.scheduled_display(), Style::default()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Created:   ", theme::DIM_STYLE),
        Span::styled(
            reminder.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            Style::default(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Status:    ", theme::DIM_STYLE),
        Span::styled(status_line, Style::default()),
    ]));
    if reminder.snoozed_total_minutes > 0 {
        lines.push(Line::from(vec![
            Span::styled("Snoozed:   ", theme::DIM_STYLE),
            Span::styled(
                format!("{} min total", reminder.snoozed_total_minutes),
                Style::default(),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        theme::DIM_STYLE,
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max).collect()
    }
}
