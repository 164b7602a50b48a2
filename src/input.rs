use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::geometry::Vec2;

/// The key state the game reads once per tick.
///
/// Movement and fire are level-triggered (held). `reset` is an edge: it is set
/// for exactly one tick after the reset key goes down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub reset: bool,
}

impl InputState {
    /// Sum of the held directions, not normalized. Opposite keys cancel out.
    pub fn heading(&self) -> Vec2 {
        let mut heading = Vec2::ZERO;
        if self.up {
            heading.y += 1.0;
        }
        if self.down {
            heading.y -= 1.0;
        }
        if self.left {
            heading.x -= 1.0;
        }
        if self.right {
            heading.x += 1.0;
        }
        heading
    }
}

/// Polls a key stays held after its last press or repeat when the terminal never
/// reports releases. Long enough to bridge the gap between auto-repeat events.
const KEY_HOLD_POLLS: u8 = 8;

/// Tracks the state of keys that can be held down for continuous input.
///
/// Each slot counts the polls left before the key is treated as released; 0 means up.
#[derive(Debug, Default)]
struct KeyState {
    up: u8,
    down: u8,
    left: u8,
    right: u8,
    fire: u8,
}

impl KeyState {
    fn slot(&mut self, key: Key) -> Option<&mut u8> {
        match key {
            Key::Up => Some(&mut self.up),
            Key::Down => Some(&mut self.down),
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Fire => Some(&mut self.fire),
            Key::Reset | Key::Quit => None,
        }
    }

    fn age(&mut self) {
        for slot in [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.fire,
        ] {
            *slot = slot.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Reset,
    Quit,
}

impl Key {
    fn from_event(key_event: &KeyEvent) -> Option<Self> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(Key::Quit);
        }

        match key_event.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Key::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Key::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Key::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Key::Right),
            KeyCode::Char(' ') => Some(Key::Fire),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Reset),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Turns raw terminal key events into an [`InputState`] per tick.
pub struct InputManager {
    key_state: KeyState,
    reset_pressed: bool,
    quit_requested: bool,
    /// Whether the terminal reports key releases. Without them a key counts as
    /// held for a few polls after each press or auto-repeat.
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            reset_pressed: false,
            quit_requested: false,
            release_events,
        }
    }

    /// Drains all pending terminal events without blocking
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.expire_held();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }

        Ok(())
    }

    /// Processes a key event and updates held keys and one-shot requests
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        let Some(key) = Key::from_event(&key_event) else {
            return;
        };

        match key_event.kind {
            KeyEventKind::Press => {
                match key {
                    Key::Reset => self.reset_pressed = true,
                    Key::Quit => self.quit_requested = true,
                    _ => {}
                }
                self.set_held(key, true);
            }
            // Auto-repeat keeps held keys alive but never re-triggers a reset
            KeyEventKind::Repeat => self.set_held(key, true),
            KeyEventKind::Release => self.set_held(key, false),
        }
    }

    fn set_held(&mut self, key: Key, held: bool) {
        let hold = match (held, self.release_events) {
            (false, _) => 0,
            (true, true) => u8::MAX,
            (true, false) => KEY_HOLD_POLLS,
        };
        if let Some(slot) = self.key_state.slot(key) {
            *slot = hold;
        }
    }

    /// Ages held keys by one poll. Only applies when the terminal has no release events.
    fn expire_held(&mut self) {
        if !self.release_events {
            self.key_state.age();
        }
    }

    /// Input for the next tick. Consumes a pending reset so it fires only once.
    pub fn take_input(&mut self) -> InputState {
        let reset = std::mem::take(&mut self.reset_pressed);
        InputState {
            up: self.key_state.up > 0,
            down: self.key_state.down > 0,
            left: self.key_state.left > 0,
            right: self.key_state.right > 0,
            fire: self.key_state.fire > 0,
            reset,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    #[test]
    fn test_heading_sums_directions() {
        let input = InputState {
            up: true,
            right: true,
            ..InputState::default()
        };
        assert_eq!(input.heading(), Vec2::new(1.0, 1.0));

        let cancelled = InputState {
            left: true,
            right: true,
            ..InputState::default()
        };
        assert_eq!(cancelled.heading(), Vec2::ZERO);
    }

    #[test]
    fn test_held_keys_until_release() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press(KeyCode::Char('w')));
        manager.handle_key_event(press(KeyCode::Char(' ')));

        let input = manager.take_input();
        assert!(input.up && input.fire);
        assert!(manager.take_input().up);

        manager.handle_key_event(release(KeyCode::Char('w')));
        let input = manager.take_input();
        assert!(!input.up);
        assert!(input.fire);
    }

    #[test]
    fn test_held_keys_expire_without_release_events() {
        let mut manager = InputManager::new(false);
        manager.handle_key_event(press(KeyCode::Char('d')));

        for _ in 0..KEY_HOLD_POLLS - 1 {
            manager.expire_held();
            assert!(manager.take_input().right);
        }
        manager.expire_held();
        assert!(!manager.take_input().right);
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut manager = InputManager::new(false);
        manager.handle_key_event(press(KeyCode::Char(' ')));
        for _ in 0..KEY_HOLD_POLLS - 1 {
            manager.expire_held();
        }
        manager.handle_key_event(repeat(KeyCode::Char(' ')));

        // A full hold again, not just what was left of the first one
        for _ in 0..KEY_HOLD_POLLS - 1 {
            manager.expire_held();
            assert!(manager.take_input().fire);
        }
        manager.expire_held();
        assert!(!manager.take_input().fire);
    }

    #[test]
    fn test_release_events_hold_until_release() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press(KeyCode::Up));
        for _ in 0..1000 {
            manager.expire_held();
        }
        assert!(manager.take_input().up);

        manager.handle_key_event(release(KeyCode::Up));
        assert!(!manager.take_input().up);
    }

    #[test]
    fn test_arrow_keys_move() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press(KeyCode::Left));
        manager.handle_key_event(press(KeyCode::Down));
        let input = manager.take_input();
        assert!(input.left && input.down);
    }

    #[test]
    fn test_reset_is_edge_triggered() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press(KeyCode::Char('r')));
        assert!(manager.take_input().reset);
        assert!(!manager.take_input().reset);

        // Holding the key down does not reset again
        manager.handle_key_event(repeat(KeyCode::Char('r')));
        assert!(!manager.take_input().reset);
    }

    #[test]
    fn test_quit_keys() {
        let mut manager = InputManager::new(true);
        assert!(!manager.quit_requested());
        manager.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(manager.quit_requested());

        let mut manager = InputManager::new(false);
        manager.handle_key_event(press(KeyCode::Esc));
        assert!(manager.quit_requested());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(press(KeyCode::Char('x')));
        assert_eq!(manager.take_input(), InputState::default());
    }
}
