use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Game commands an input device can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Maps a terminal key event to what the player asked for.
///
/// Key releases are ignored; held keys arrive as repeats and act like
/// presses, so holding an arrow keeps moving the piece.
pub fn handle_key(event: KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let command = match event.code {
        KeyCode::Left => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Up => Command::Rotate,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Command(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_map_to_moves() {
        assert_eq!(handle_key(key(KeyCode::Left, KeyEventKind::Press)), Some(Input::Command(Command::Left)));
        assert_eq!(handle_key(key(KeyCode::Right, KeyEventKind::Repeat)), Some(Input::Command(Command::Right)));
        assert_eq!(handle_key(key(KeyCode::Up, KeyEventKind::Press)), Some(Input::Command(Command::Rotate)));
        assert_eq!(handle_key(key(KeyCode::Down, KeyEventKind::Press)), Some(Input::Command(Command::SoftDrop)));
    }

    #[test]
    fn releases_are_ignored() {
        assert_eq!(handle_key(key(KeyCode::Left, KeyEventKind::Release)), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(handle_key(key(KeyCode::Char(' '), KeyEventKind::Press)), Some(Input::Command(Command::HardDrop)));
        assert_eq!(handle_key(key(KeyCode::Char('P'), KeyEventKind::Press)), Some(Input::Command(Command::Pause)));
        assert_eq!(handle_key(key(KeyCode::Char('r'), KeyEventKind::Press)), Some(Input::Command(Command::Restart)));
        assert_eq!(handle_key(key(KeyCode::Esc, KeyEventKind::Press)), Some(Input::Quit));
        assert_eq!(handle_key(key(KeyCode::Char('x'), KeyEventKind::Press)), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c), Some(Input::Quit));
    }
}
