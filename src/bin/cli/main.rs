mod app;
mod constants;
mod editor;
mod handlers;
mod theme;
mod ui;

use app::{App, AppState};
use constants::TICK_MS;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use handlers::{handle_alert_key, handle_confirm_reset_key, handle_edit_key, handle_help_key};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io::stdout, time::Duration};
use ui::ui;

fn main() -> Result<(), Box<dyn Error>> {
    // Logging goes to stderr; initialize before the terminal takes over.
    env_logger::init();

    let rt = tokio::runtime::Runtime::new()?;
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        app.process_events();
        app.tick();
        terminal.draw(|f| ui(f, &mut app))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            let evt = event::read()?;
            if let event::Event::Key(key) = evt {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                let should_quit = match app.state {
                    AppState::Edit => matches!(
                        handle_edit_key(&mut app, key, &rt),
                        Err(e) if e.to_string() == "quit"
                    ),
                    AppState::Help => {
                        handle_help_key(&mut app, key);
                        false
                    }
                    AppState::ConfirmReset => {
                        handle_confirm_reset_key(&mut app, key);
                        false
                    }
                    AppState::Alert => {
                        handle_alert_key(&mut app, key);
                        false
                    }
                };

                if should_quit {
                    break;
                }
            }
        }
    }

    // One last write so nothing typed in the final window is lost.
    app.save();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
