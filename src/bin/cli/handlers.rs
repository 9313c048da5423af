use crate::app::{App, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::error::Error;

pub(crate) fn handle_edit_key(
    app: &mut App,
    key: KeyEvent,
    rt: &tokio::runtime::Runtime,
) -> Result<(), Box<dyn Error>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => app.run_preview(),
            KeyCode::Char('s') => app.save(),
            KeyCode::Char('e') => app.start_export(rt),
            KeyCode::Char('o') => app.open_in_browser(),
            KeyCode::Char('l') => app.toggle_layout(),
            KeyCode::Char('a') => app.toggle_autorun(),
            KeyCode::Char('k') => app.state = AppState::ConfirmReset,
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => return Err("quit".into()),
        KeyCode::F(1) => app.state = AppState::Help,
        KeyCode::F(2) => app.cycle_theme(),
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char(c) => {
            app.focused_pane().insert_char(c);
            app.on_edit();
        }
        KeyCode::Enter => {
            app.focused_pane().insert_newline();
            app.on_edit();
        }
        KeyCode::Backspace => {
            app.focused_pane().delete_char();
            app.on_edit();
        }
        KeyCode::Delete => {
            app.focused_pane().delete_char_forward();
            app.on_edit();
        }
        KeyCode::Left => app.focused_pane().move_left(),
        KeyCode::Right => app.focused_pane().move_right(),
        KeyCode::Up => app.focused_pane().move_up(),
        KeyCode::Down => app.focused_pane().move_down(),
        KeyCode::Home => app.focused_pane().move_to_line_start(),
        KeyCode::End => app.focused_pane().move_to_line_end(),
        _ => {}
    }
    Ok(())
}

pub(crate) fn handle_help_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
        app.state = AppState::Edit;
    }
}

pub(crate) fn handle_confirm_reset_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.reset_to_starter();
            app.state = AppState::Edit;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = AppState::Edit;
        }
        _ => {}
    }
}

pub(crate) fn handle_alert_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
        app.dismiss_alert();
    }
}
