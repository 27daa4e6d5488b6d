//! Pieces of the demo binary that don't need a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::RandomSource;
use crate::types::GameAction;

/// Words shown one after another when a game ends
pub const GAME_OVER_WORDS: [&str; 2] = ["GAME", "OVER"];

/// Check if a key should quit the demo
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Random sideways moves and rotations so the panel has something to show.
///
/// Most rolls do nothing; gravity does the rest.
#[derive(Debug, Clone)]
pub struct Autopilot<R> {
    rng: R,
}

impl<R: RandomSource> Autopilot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_action(&mut self) -> Option<GameAction> {
        match self.rng.range_inclusive(0, 5) {
            0 => Some(GameAction::MoveLeft),
            1 => Some(GameAction::MoveRight),
            2 => Some(GameAction::Rotate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedRng, SimpleRng};

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Left)));
    }

    #[test]
    fn autopilot_maps_rolls_to_actions() {
        let mut pilot = Autopilot::new(ScriptedRng::new(vec![0, 1, 2, 3, 5]));
        assert_eq!(pilot.next_action(), Some(GameAction::MoveLeft));
        assert_eq!(pilot.next_action(), Some(GameAction::MoveRight));
        assert_eq!(pilot.next_action(), Some(GameAction::Rotate));
        assert_eq!(pilot.next_action(), None);
        assert_eq!(pilot.next_action(), None);
    }

    #[test]
    fn autopilot_never_soft_drops() {
        let mut pilot = Autopilot::new(SimpleRng::new(3));
        for _ in 0..500 {
            assert_ne!(pilot.next_action(), Some(GameAction::SoftDrop));
        }
    }
}
