//! Keyboard bindings of the terminal host.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::apps::AppKind;
use crate::shell::SessionKey;

/// What a key press asks the desktop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    DismissNotice,
    CloseFocused,
    CycleFocus,
    Launch(AppKind),
    Session(SessionKey),
    SelectPrevious,
    SelectNext,
    Activate,
    GoUp,
}

/// Resolve `key` for the focused window's app. Global bindings use Ctrl
/// and win over the window; the rest go to the focused window.
pub fn key_command(key: KeyEvent, focused: Option<AppKind>) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') => Some(KeyCommand::Quit),
            KeyCode::Char('w') => Some(KeyCommand::CloseFocused),
            KeyCode::Char('t') => Some(KeyCommand::Launch(AppKind::Terminal)),
            KeyCode::Char('e') => Some(KeyCommand::Launch(AppKind::Files)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => return Some(KeyCommand::DismissNotice),
        KeyCode::BackTab => return Some(KeyCommand::CycleFocus),
        _ => {}
    }

    match focused? {
        AppKind::Terminal => {
            let session = match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
                    SessionKey::Char(ch)
                }
                KeyCode::Backspace => SessionKey::Backspace,
                KeyCode::Enter => SessionKey::Enter,
                KeyCode::Up => SessionKey::Up,
                KeyCode::Down => SessionKey::Down,
                KeyCode::Tab => SessionKey::Tab,
                _ => return None,
            };
            Some(KeyCommand::Session(session))
        }
        AppKind::Files => match key.code {
            KeyCode::Up => Some(KeyCommand::SelectPrevious),
            KeyCode::Down => Some(KeyCommand::SelectNext),
            KeyCode::Enter => Some(KeyCommand::Activate),
            KeyCode::Backspace => Some(KeyCommand::GoUp),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_bindings_are_global() {
        let quit = press(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(key_command(quit, Some(AppKind::Terminal)), Some(KeyCommand::Quit));
        assert_eq!(key_command(quit, None), Some(KeyCommand::Quit));
        assert_eq!(
            key_command(press(KeyCode::Char('t'), KeyModifiers::CONTROL), None),
            Some(KeyCommand::Launch(AppKind::Terminal))
        );
        assert_eq!(
            key_command(press(KeyCode::Char('x'), KeyModifiers::CONTROL), Some(AppKind::Terminal)),
            None
        );
    }

    #[test]
    fn terminal_receives_typing() {
        let focused = Some(AppKind::Terminal);
        assert_eq!(
            key_command(press(KeyCode::Char('L'), KeyModifiers::SHIFT), focused),
            Some(KeyCommand::Session(SessionKey::Char('L')))
        );
        assert_eq!(
            key_command(press(KeyCode::Tab, KeyModifiers::NONE), focused),
            Some(KeyCommand::Session(SessionKey::Tab))
        );
        assert_eq!(key_command(press(KeyCode::Char('a'), KeyModifiers::ALT), focused), None);
    }

    #[test]
    fn file_browser_navigation() {
        let focused = Some(AppKind::Files);
        assert_eq!(
            key_command(press(KeyCode::Down, KeyModifiers::NONE), focused),
            Some(KeyCommand::SelectNext)
        );
        assert_eq!(
            key_command(press(KeyCode::Backspace, KeyModifiers::NONE), focused),
            Some(KeyCommand::GoUp)
        );
        assert_eq!(key_command(press(KeyCode::Char('a'), KeyModifiers::NONE), focused), None);
    }

    #[test]
    fn pages_ignore_keys() {
        assert_eq!(
            key_command(press(KeyCode::Enter, KeyModifiers::NONE), Some(AppKind::About)),
            None
        );
        assert_eq!(
            key_command(press(KeyCode::Esc, KeyModifiers::NONE), Some(AppKind::About)),
            Some(KeyCommand::DismissNotice)
        );
    }
}
