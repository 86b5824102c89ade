//! Keyboard polling and key-to-camera mapping

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Camera motions a key press can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

/// Input events handed to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Motion),
    Resize { width: usize, height: usize },
    Quit,
}

/// Bounded-wait poll for the next input event.
///
/// Returns `None` when the timeout elapses with no input; the frame
/// loop renders either way, so this is also the frame pacing.
pub fn poll_input(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        Event::Resize(width, height) => Ok(Some(InputEvent::Resize {
            width: width as usize,
            height: height as usize,
        })),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }

    let event = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => InputEvent::Quit,
        KeyCode::Char('w') => InputEvent::Move(Motion::Forward),
        KeyCode::Char('s') => InputEvent::Move(Motion::Back),
        KeyCode::Char('a') => InputEvent::Move(Motion::StrafeLeft),
        KeyCode::Char('d') => InputEvent::Move(Motion::StrafeRight),
        KeyCode::Char('e') => InputEvent::Move(Motion::Up),
        KeyCode::Char('c') => InputEvent::Move(Motion::Down),
        KeyCode::Left => InputEvent::Move(Motion::YawLeft),
        KeyCode::Right => InputEvent::Move(Motion::YawRight),
        KeyCode::Up => InputEvent::Move(Motion::PitchUp),
        KeyCode::Down => InputEvent::Move(Motion::PitchDown),
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_escape_and_q_quit() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(InputEvent::Quit));
    }

    #[test]
    fn test_wasd_maps_to_motion() {
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(InputEvent::Move(Motion::Forward))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(InputEvent::Move(Motion::StrafeLeft))
        );
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(InputEvent::Move(Motion::YawLeft))
        );
    }

    #[test]
    fn test_release_and_unmapped_keys_ignored() {
        let mut release = press(KeyCode::Char('w'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut key = press(KeyCode::Char('c'));
        key.modifiers = KeyModifiers::CONTROL;
        assert_eq!(map_key(key), Some(InputEvent::Quit));
    }
}
