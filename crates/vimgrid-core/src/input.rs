use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

/// One key press as seen by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    /// Ctrl, Alt, Super or Meta was held. The whole event is dropped.
    pub chord: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, chord: false }
    }

    /// Translate a terminal key event.
    ///
    /// Returns `None` for releases and for keys with no engine meaning.
    /// `Shift+4` is read as `$` for terminals that report the unshifted code.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let key = match event.code {
            KeyCode::Char('4') if shift => Key::Char('$'),
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            _ => return None,
        };
        let chord = event.modifiers.intersects(
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META,
        );
        Some(Self { key, chord })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_char() {
        let input = KeyInput::from_event(event(KeyCode::Char('w'), KeyModifiers::NONE));
        assert_eq!(input, Some(KeyInput::new(Key::Char('w'))));
    }

    #[test]
    fn test_shifted_char_is_not_a_chord() {
        let input = KeyInput::from_event(event(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(input, Some(KeyInput::new(Key::Char('G'))));
    }

    #[test]
    fn test_shift_four_is_dollar() {
        let input = KeyInput::from_event(event(KeyCode::Char('4'), KeyModifiers::SHIFT));
        assert_eq!(input.map(|i| i.key), Some(Key::Char('$')));
    }

    #[test]
    fn test_modifier_chords() {
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT, KeyModifiers::META] {
            let input = KeyInput::from_event(event(KeyCode::Char('x'), modifiers));
            assert!(input.is_some_and(|i| i.chord));
        }
    }

    #[test]
    fn test_named_keys() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Left, Key::Left),
            (KeyCode::Down, Key::Down),
        ];
        for (code, key) in cases {
            let input = KeyInput::from_event(event(code, KeyModifiers::NONE));
            assert_eq!(input.map(|i| i.key), Some(key));
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(KeyInput::from_event(event(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(KeyInput::from_event(event(KeyCode::Home, KeyModifiers::NONE)), None);
    }
}
