//! Event handling functions for user input.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::App;

/// How long to wait for input before drawing the next frame.
///
/// Roughly one frame at 60 Hz, so the animation keeps moving while no key is pressed.
pub(crate) const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Handles pending input events and updates the application state accordingly.
///
/// Waits at most [`POLL_TIMEOUT`] for an event so the main loop never blocks on input.
///
/// # Errors
///
/// - [`std::io::Error`] if the terminal cannot be polled or read
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_TIMEOUT)? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key);
        }
    }

    Ok(())
}

/// Applies a single key press: `q`, `Esc` and `Ctrl-C` close the application.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.exit = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimConfig, grid::Grid, simulation::Simulation};

    /// Creates a minimal test app for event testing.
    fn create_test_app() -> App {
        let config = SimConfig::default();
        let grid = Grid::parse("1 1 13", &config).expect("test maze should parse");

        App::new(Simulation::new(grid, config))
    }

    #[test]
    fn test_q_exits() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));

        assert!(app.exit);
    }

    #[test]
    fn test_esc_exits() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        assert!(app.exit);
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.exit);
    }

    #[test]
    fn test_plain_c_is_ignored() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));

        assert!(!app.exit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = create_test_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        handle_key(&mut app, key);

        assert!(!app.exit);
    }

    #[test]
    fn test_keys_do_not_touch_simulation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));

        assert!(!app.exit);
        assert_eq!(app.simulation().ticks(), 0);
    }
}
