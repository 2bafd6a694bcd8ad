use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// Smooths over terminal differences before events reach the desktop.
///
/// Key releases and button-less mouse motion are dropped. Shift+Tab
/// becomes BackTab and Ctrl+H becomes Backspace, which is what many
/// terminals send for the backspace key.
#[derive(Debug, Default)]
pub struct EventNormalizer;

impl EventNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                if key.code == KeyCode::Char('h') && key.modifiers == KeyModifiers::CONTROL {
                    key.code = KeyCode::Backspace;
                    key.modifiers = KeyModifiers::NONE;
                }
                Some(Event::Key(key))
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => None,
            other => Some(other),
        }
    }
}
