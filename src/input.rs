//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`]; remember the help text in
//! [`crate::ui`] as well.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Tab => app.switch_view(),
        KeyCode::Char('l') => app.cycle_language(),
        KeyCode::Char('r') => app.request_reload(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::loaded_app;
    use crate::app::View;
    use crate::theme::Theme;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.quit);

        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Esc));
        assert!(app.quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = loaded_app();
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press(KeyCode::Char('q'))
        };
        handle_key_event(&mut app, release);
        assert!(!app.quit);
    }

    #[test]
    fn view_language_reload_theme() {
        let mut app = loaded_app();

        handle_key_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view, View::Grid);

        handle_key_event(&mut app, press(KeyCode::Char('l')));
        assert!(app.language.is_some());

        handle_key_event(&mut app, press(KeyCode::Char('r')));
        assert!(app.reload_requested);

        handle_key_event(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn vim_navigation() {
        let mut app = loaded_app();
        handle_key_event(&mut app, press(KeyCode::Char('j')));
        handle_key_event(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.list_state.selected(), Some(1));

        handle_key_event(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
