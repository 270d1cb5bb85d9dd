//! Key handling
//!
//! Popups swallow keys first, then an in-progress cell edit, then the
//! browse bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::state::{App, Mode};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if app.login_popup.is_some() {
        handle_login_key(app, key);
        return;
    }
    if app.filter_popup.is_some() {
        handle_filter_key(app, key);
        return;
    }
    if matches!(app.mode, Mode::Edit { .. }) {
        handle_edit_key(app, key);
        return;
    }

    handle_browse_key(app, key);
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    // Any keypress clears the transient status message.
    app.status_line = None;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
        KeyCode::Tab | KeyCode::Char(']') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Char('[') => app.prev_tab(),
        KeyCode::Char('/') | KeyCode::Char('f') => app.filter_popup = Some(Default::default()),
        KeyCode::Char('a') => app.add_row(),
        KeyCode::Char('d') => app.delete_current_row(),
        KeyCode::Char('R') => app.reset_to_seed(),
        KeyCode::Char('u') => {
            if app.is_admin {
                app.logout();
            } else {
                app.open_login();
            }
        }
        KeyCode::Enter => app.begin_edit(),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Left | KeyCode::Up => app.cycle_option(-1),
        KeyCode::Right | KeyCode::Down => app.cycle_option(1),
        KeyCode::Backspace => {
            if let Mode::Edit { buffer, .. } = &mut app.mode {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Mode::Edit { buffer, .. } = &mut app.mode {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    let Some(selected) = app.filter_popup.as_ref().map(|popup| popup.selected) else {
        return;
    };
    let columns = app.table.columns();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.filter_popup = None;
            app.clamp_cursor();
        }
        KeyCode::Up => {
            if let Some(popup) = &mut app.filter_popup {
                popup.selected = popup.selected.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if let Some(popup) = &mut app.filter_popup {
                popup.selected = (popup.selected + 1).min(columns.len() - 1);
            }
        }
        KeyCode::Char('u') if ctrl => {
            app.table.set_filter(columns[selected].key, String::new());
            app.clamp_cursor();
        }
        KeyCode::Char('x') if ctrl => {
            app.clear_all_filters();
        }
        KeyCode::Backspace => {
            let key_name = columns[selected].key;
            let mut value = app.table.filter(key_name).to_string();
            value.pop();
            app.table.set_filter(key_name, value);
            app.clamp_cursor();
        }
        KeyCode::Char(c) => {
            let key_name = columns[selected].key;
            let mut value = app.table.filter(key_name).to_string();
            value.push(c);
            app.table.set_filter(key_name, value);
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    let busy = app
        .login_popup
        .as_ref()
        .map(|popup| popup.busy)
        .unwrap_or(false);

    match key.code {
        KeyCode::Esc if !busy => app.login_popup = None,
        KeyCode::Enter if !busy => {
            let password = app
                .login_popup
                .as_ref()
                .map(|popup| popup.input.clone())
                .unwrap_or_default();
            if !password.is_empty() {
                app.submit_login(password);
            }
        }
        KeyCode::Backspace if !busy => {
            if let Some(popup) = &mut app.login_popup {
                popup.input.pop();
            }
        }
        KeyCode::Char(c) if !busy => {
            if let Some(popup) = &mut app.login_popup {
                popup.input.push(c);
            }
        }
        _ => {}
    }
}
