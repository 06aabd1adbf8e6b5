/// Keyboard and mouse state, rebuilt from crossterm events every frame.
///
/// Movement reads held keys; menus, picks and firing read edges. Terminals
/// that never send key releases are handled by letting a key lapse when
/// its auto-repeat stops arriving.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// A key with no press or repeat for this long counts as up.
const REPEAT_GAP: Duration = Duration::from_millis(160);

pub struct InputState {
    /// Last press/repeat per key still considered down.
    down_since: HashMap<KeyCode, Instant>,
    /// Keys that went down during the latest drain.
    pressed: Vec<KeyCode>,
    /// Left-button presses this drain, as terminal (column, row).
    clicks: Vec<(u16, u16)>,
    ctrl_c: bool,
    /// Trust Release events. Set when the terminal accepted the
    /// enhancement flags that make it report them.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            down_since: HashMap::new(),
            pressed: Vec::new(),
            clicks: Vec::new(),
            ctrl_c: false,
            honor_release: false,
        }
    }

    /// Consume every queued terminal event without blocking.
    pub fn drain_events(&mut self) {
        self.pressed.clear();
        self.clicks.clear();
        self.ctrl_c = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(Event::Mouse(m)) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                    self.clicks.push((m.column, m.row));
                }
                Ok(_) => {}
                Err(e) => {
                    log::debug!("dropped terminal event: {e}");
                    break;
                }
            }
        }

        let now = Instant::now();
        self.down_since.retain(|_, at| now.duration_since(*at) < REPEAT_GAP);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.ctrl_c = true;
        }

        if key.kind == KeyEventKind::Release {
            if self.honor_release {
                self.down_since.remove(&key.code);
            }
            return;
        }

        if !self.is_held(key.code) {
            self.pressed.push(key.code);
        }
        self.down_since.insert(key.code, Instant::now());
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.down_since
            .get(&code)
            .is_some_and(|at| at.elapsed() < REPEAT_GAP)
    }

    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.is_held(c))
    }

    /// Went down this frame.
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.was_pressed(c))
    }

    /// Digit 1–9 pressed this frame, if any.
    pub fn digit_pressed(&self) -> Option<usize> {
        self.pressed.iter().find_map(|code| match code {
            KeyCode::Char(ch) => ch.to_digit(10).filter(|&d| d > 0).map(|d| d as usize),
            _ => None,
        })
    }

    /// Most recent left click this frame, in terminal cells.
    pub fn last_click(&self) -> Option<(u16, u16)> {
        self.clicks.last().copied()
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.ctrl_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn press_is_fresh_once_then_held() {
        let mut kb = InputState::new();
        kb.on_key(press(KeyCode::Left));
        assert!(kb.was_pressed(KeyCode::Left));
        assert!(kb.is_held(KeyCode::Left));

        kb.pressed.clear();
        kb.on_key(press(KeyCode::Left));
        assert!(!kb.was_pressed(KeyCode::Left));
        assert!(kb.any_held(&[KeyCode::Right, KeyCode::Left]));
    }

    #[test]
    fn release_only_counts_when_honored() {
        let mut kb = InputState::new();
        kb.on_key(press(KeyCode::Char('a')));
        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        kb.on_key(release);
        assert!(kb.is_held(KeyCode::Char('a')));

        kb.honor_release = true;
        kb.on_key(release);
        assert!(!kb.is_held(KeyCode::Char('a')));
    }

    #[test]
    fn digits_and_ctrl_c() {
        let mut kb = InputState::new();
        kb.on_key(press(KeyCode::Char('0')));
        assert_eq!(kb.digit_pressed(), None);
        kb.on_key(press(KeyCode::Char('3')));
        assert_eq!(kb.digit_pressed(), Some(3));
        assert!(!kb.ctrl_c_pressed());
        kb.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(kb.ctrl_c_pressed());
    }
}
