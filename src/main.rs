mod app;
mod components;
mod config;
mod event;
mod reminders;
mod theme;
mod tui;

use std::io;
use std::time::{Duration, Instant};

use app::{App, Section};
use chrono::Utc;
use color_eyre::Result;
use components::reminder_form::FormField;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::Config::load();
    theme::init(config.theme.clone().into_theme());
    let mut app = App::new(config);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let poll_interval = Duration::from_secs(app.config.poll_secs);
    let mut last_check = Instant::now();

    // Catch anything already past its scheduled time at startup
    check_and_alert(app);

    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            // Detail popup takes priority
            if app.detail.is_some() {
                if key.code == KeyCode::Esc {
                    app.close_detail();
                }
                continue;
            }

            if app.form_state.is_some() {
                handle_form_input(app, key.code);
            } else {
                handle_normal_input(app, key.code, key.modifiers);
            }
        }

        if app.check_requested || last_check.elapsed() >= poll_interval {
            app.check_requested = false;
            last_check = Instant::now();
            check_and_alert(app);
        }
    }

    Ok(())
}

/// One due check; the alert latch persists before the bell rings.
fn check_and_alert(app: &mut App) {
    let newly_due = app.check_due(Utc::now());
    if newly_due > 0 && app.sound_enabled {
        bell();
    }
}

/// The audible half of the alert sink.
fn bell() {
    use std::io::Write;
    let mut out = io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Tab, _) => app.focus_next(),
        (KeyCode::BackTab, _) => app.focus_prev(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Char('n'), _) => app.open_form(Utc::now()),
        (KeyCode::Enter, _) => app.show_detail(),
        (KeyCode::Char('c'), _) => app.complete_selected(Utc::now()),
        (KeyCode::Char('z'), _) => app.snooze_selected(Utc::now()),
        (KeyCode::Char('d'), _) => app.delete_selected(Utc::now()),
        (KeyCode::Char('s'), _) => app.toggle_sound(),
        (KeyCode::Char('r'), _) => app.check_requested = true,
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(Utc::now()),
        _ => {
            let total = app.config.categories.len();
            if let Some(form) = app.form_state.as_mut() {
                match code {
                    KeyCode::Tab => form.active_field = form.active_field.next(),
                    KeyCode::BackTab => form.active_field = form.active_field.prev(),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Left if form.active_field == FormField::Category => {
                        form.prev_category(total)
                    }
                    KeyCode::Right if form.active_field == FormField::Category => {
                        form.next_category(total)
                    }
                    KeyCode::Char(' ') if form.active_field == FormField::Category => {
                        form.next_category(total)
                    }
                    KeyCode::Char(c) => form.input_char(c),
                    _ => {}
                }
            }
        }
    }
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let now = Utc::now();

    // Board: due on top, upcoming below, completed collapsed, status bar
    let layout = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Min(6),
        Constraint::Length(6),
        Constraint::Length(1),
    ])
    .split(area);

    components::BoardSection::render(
        frame,
        layout[0],
        Section::Due,
        &app.due,
        now,
        app.focus == Section::Due,
        app.selected,
    );
    components::BoardSection::render(
        frame,
        layout[1],
        Section::Upcoming,
        &app.upcoming,
        now,
        app.focus == Section::Upcoming,
        app.selected,
    );
    components::BoardSection::render(
        frame,
        layout[2],
        Section::Completed,
        &app.completed,
        now,
        app.focus == Section::Completed,
        app.selected,
    );

    if let Some(ref form) = app.form_state {
        components::ReminderForm::render(frame, area, form, &app.config.categories);
    }

    if let Some(ref detail) = app.detail {
        components::board_view::render_detail_popup(frame, area, detail, now);
    }

    if app.show_help {
        render_help(frame, area);
    }

    render_status_bar(frame, layout[3], app, area.width);
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App, w: u16) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let w = w as usize;

    let mode = if app.form_state.is_some() {
        " [New Reminder]"
    } else if !app.sound_enabled {
        " [Muted]"
    } else {
        ""
    };
    let left = format!(" Reminders{} ", mode);

    let clock = format!(" {} ", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));

    // Show status message if present, otherwise context hints
    let right_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if w >= 115 {
        " Tab:Section j/k:Nav n:New c:Done z:Snooze d:Del Enter:Detail s:Sound r:Check ?:Help q:Quit ".to_string()
    } else if w >= 70 {
        " n:New c:Done z:Snooze d:Del ?:Help q:Quit ".to_string()
    } else {
        " ?:Help q:Quit ".to_string()
    };

    let status_style = theme::current().status;
    let right_style = if app.status_message.is_some() {
        theme::current().alert
    } else {
        status_style
    };

    let padding_len = w.saturating_sub(left.len() + right_text.len() + clock.len());
    let padding = " ".repeat(padding_len);

    let line = Line::from(vec![
        Span::styled(left, status_style),
        Span::styled(padding, status_style),
        Span::styled(right_text, right_style),
        Span::styled(clock, status_style),
    ]);

    let bar = Paragraph::new(line).style(status_style);
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(48).max(30);
    let popup_h = area.height.min(19).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  Tab       ", key_style),
            Span::styled("Next board section", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::styled("Move selection", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Actions", section_style)),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::styled("New reminder (UTC)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Reminder details", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  c         ", key_style),
            Span::styled("Mark done", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  z         ", key_style),
            Span::styled("Snooze", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Delete", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Run due check now", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  s         ", key_style),
            Span::styled("Toggle alert sound", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
