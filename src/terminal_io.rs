use std::collections::{HashMap, HashSet};
use std::mem;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::input::{InputFrame, Key};

/// Maps a terminal key to its game role. Fire has several equivalent bindings.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Key::RotateLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::RotateRight),
        KeyCode::Up | KeyCode::Char('w') => Some(Key::Thrust),
        KeyCode::Down | KeyCode::Char('s') => Some(Key::Reverse),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('j') => Some(Key::Fire),
        KeyCode::Char('q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Turns a tick's worth of terminal key events into an [`InputFrame`].
///
/// Terminals only report key-down (and auto-repeat), so a key counts as held
/// for the ticks it produced events in. It counts as pressed only for a
/// `Press` event on the first of a run of such ticks; `Repeat` events never
/// start a press, even after a quiet tick.
#[derive(Debug, Default)]
pub struct KeyTracker {
    previous: HashSet<Key>,
    current: HashSet<Key>,
    fresh: HashSet<Key>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &Event) -> Option<Key> {
        let Event::Key(KeyEvent { code, kind, .. }) = event else {
            return None;
        };
        if *kind == KeyEventKind::Release {
            return None;
        }
        let key = key_for(*code)?;
        self.current.insert(key);
        if *kind == KeyEventKind::Press {
            self.fresh.insert(key);
        }
        Some(key)
    }

    pub fn finish_frame(&mut self) -> InputFrame {
        let held = mem::take(&mut self.current);
        let fresh = mem::take(&mut self.fresh);
        let pressed = fresh.difference(&self.previous).copied().collect();
        self.previous = held.clone();
        InputFrame { held, pressed }
    }
}

// --- ScriptedInput for debugging ---
pub struct ScriptedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl ScriptedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        ScriptedInput { events }
    }

    /// Thrusts, turns, fires, turns back, and quits on frame 10.
    pub fn demo() -> Self {
        let key = |code: KeyCode| Event::Key(code.into());
        let mut events = HashMap::new();
        events.insert(1, vec![key(KeyCode::Up)]);
        events.insert(2, vec![key(KeyCode::Right), key(KeyCode::Up)]);
        events.insert(3, vec![key(KeyCode::Char(' '))]);
        events.insert(4, vec![key(KeyCode::Left)]);
        events.insert(10, vec![key(KeyCode::Char('q'))]);
        ScriptedInput::new(events)
    }

    pub fn take(&mut self, frame_count: u64) -> Vec<Event> {
        self.events.remove(&frame_count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn fire_has_several_bindings() {
        for code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Char('f'), KeyCode::Char('j')] {
            assert_eq!(key_for(code), Some(Key::Fire));
        }
        assert_eq!(key_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn repeats_are_held_but_not_pressed() {
        let mut tracker = KeyTracker::new();
        tracker.record(&press(KeyCode::Char(' ')));
        tracker.record(&press(KeyCode::Up));
        let first = tracker.finish_frame();
        assert!(first.was_pressed(Key::Fire));
        assert!(first.is_held(Key::Thrust));

        tracker.record(&press(KeyCode::Char(' ')));
        let second = tracker.finish_frame();
        assert!(second.is_held(Key::Fire));
        assert!(!second.was_pressed(Key::Fire));
        assert!(!second.is_held(Key::Thrust));

        let idle = tracker.finish_frame();
        assert!(idle.held.is_empty());
        tracker.record(&press(KeyCode::Enter));
        assert!(tracker.finish_frame().was_pressed(Key::Fire));
    }

    fn repeat(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat))
    }

    #[test]
    fn auto_repeat_after_a_quiet_tick_is_not_a_new_press() {
        let mut tracker = KeyTracker::new();
        tracker.record(&press(KeyCode::Char(' ')));
        assert!(tracker.finish_frame().was_pressed(Key::Fire));

        // Repeat delay: one tick with no events for the held key.
        assert!(tracker.finish_frame().held.is_empty());

        tracker.record(&repeat(KeyCode::Char(' ')));
        let repeated = tracker.finish_frame();
        assert!(repeated.is_held(Key::Fire));
        assert!(!repeated.was_pressed(Key::Fire));

        tracker.record(&repeat(KeyCode::Char(' ')));
        tracker.record(&press(KeyCode::Up));
        let next = tracker.finish_frame();
        assert!(!next.was_pressed(Key::Fire));
        assert!(next.was_pressed(Key::Thrust));
    }

    #[test]
    fn releases_and_unbound_keys_are_ignored() {
        let mut tracker = KeyTracker::new();
        let release = Event::Key(KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release));
        assert_eq!(tracker.record(&release), None);
        assert_eq!(tracker.record(&press(KeyCode::F(5))), None);
        assert_eq!(tracker.record(&Event::FocusGained), None);
        assert_eq!(tracker.finish_frame(), InputFrame::new());
    }

    #[test]
    fn scripted_input_plays_each_frame_once() {
        let mut script = ScriptedInput::demo();
        assert!(script.take(0).is_empty());
        assert_eq!(script.take(2).len(), 2);
        assert!(script.take(2).is_empty());
        assert_eq!(script.take(10), vec![press(KeyCode::Char('q'))]);
    }
}
