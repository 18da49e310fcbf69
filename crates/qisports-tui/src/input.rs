use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSlide,
    PrevSlide,
    GoToSlide(usize),
    NextLink,
    PrevLink,
    FollowLink,
    TogglePause,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return match key.code {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::ExitMode,
        };
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Carousel
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextSlide,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevSlide,
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextSlide,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevSlide,
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToSlide(c as usize - '1' as usize)
        }

        // Nav links
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::BackTab, _) => Action::PrevLink,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::FollowLink,

        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qisports_core::{AppConfig, Site, SiteContent};

    use crate::theme::Theme;

    fn app() -> App {
        let site = Site::new(AppConfig::default(), SiteContent::default()).unwrap();
        App::new(site, Theme::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_bindings() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Right), &app), Action::NextSlide);
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &app), Action::GoToSlide(2));
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextLink);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::FollowLink);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[test]
    fn test_double_g() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ExitMode);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
    }
}
