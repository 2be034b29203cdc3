//! Key bindings: translation of terminal key events into engine commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stackfall_engine::Command;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Input {
    /// A command for the game session.
    #[from]
    Command(Command),
    /// Leave the program.
    Quit,
}

/// Maps a key event to an [`Input`].
///
/// Letter keys match in either case. Key releases and unbound keys map to
/// `None`; Ctrl-C quits like `Q`.
pub fn map_key(event: &KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(event.code, KeyCode::Char('c' | 'C')).then_some(Input::Quit);
    }

    let command = match event.code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDropStep,
        KeyCode::Up => Command::RotateCw,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'x' => Command::RotateCw,
            'z' => Command::RotateCcw,
            'c' => Command::Hold,
            'p' => Command::PauseToggle,
            'r' => Command::Reset,
            'q' => return Some(Input::Quit),
            _ => return None,
        },
        _ => return None,
    };
    Some(command.into())
}

/// Key legend shown under the board, as `(keys, description)` pairs.
pub const KEY_BINDINGS: &[(&[&str], &str)] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["↑", "X"], "Rotate"),
    (&["Z"], "Rotate Left"),
    (&["C"], "Hold"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_command_keys() {
        let cases = [
            (KeyCode::Left, Command::MoveLeft),
            (KeyCode::Right, Command::MoveRight),
            (KeyCode::Down, Command::SoftDropStep),
            (KeyCode::Up, Command::RotateCw),
            (KeyCode::Char('x'), Command::RotateCw),
            (KeyCode::Char('z'), Command::RotateCcw),
            (KeyCode::Char(' '), Command::HardDrop),
            (KeyCode::Char('c'), Command::Hold),
            (KeyCode::Char('p'), Command::PauseToggle),
            (KeyCode::Char('r'), Command::Reset),
        ];
        for (code, command) in cases {
            assert_eq!(
                map_key(&press(code)),
                Some(Input::Command(command)),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_letters_ignore_case() {
        let shifted = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&shifted), Some(Input::Command(Command::PauseToggle)));
        assert_eq!(
            map_key(&press(KeyCode::Char('Z'))),
            Some(Input::Command(Command::RotateCcw))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('a'))), None);
        assert_eq!(map_key(&press(KeyCode::Enter)), None);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_r), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(&release), None);

        let repeat = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(map_key(&repeat), Some(Input::Command(Command::MoveLeft)));
    }
}
