// Input manager - turns raw window events into per-tick input frames

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

use super::action::{default_bindings, Action, InputSource};

/// Everything the controller needs to know about input for one tick:
/// the actions to dispatch, in a fixed deterministic order, plus whether
/// no tracked key was held at all ("idle tick").
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Actions for this tick: edge-triggered swings first, then held keys
    pub actions: Vec<Action>,
    /// True when no tracked key is held this tick
    pub idle: bool,
}

/// Dispatch order for held keys. Swing clicks always come first, in the
/// order they arrived.
const HELD_ORDER: [Action; 3] = [Action::Jump, Action::MoveLeft, Action::MoveRight];

/// Main input manager coordinating bindings and per-tick state
pub struct InputManager {
    /// Binding table from raw source to game action
    bindings: HashMap<InputSource, Action>,

    /// Actions whose key is currently held down
    held: HashSet<Action>,

    /// Edge-triggered actions (mouse swings) clicked since the last frame
    clicks: Vec<Action>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings(),
            held: HashSet::new(),
            clicks: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            if let Some(&action) = self.bindings.get(&source) {
                match event.state {
                    ElementState::Pressed => {
                        if !event.repeat {
                            self.press(action);
                        }
                    }
                    ElementState::Released => {
                        self.release(action);
                    }
                }
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_event(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        if let Some(&action) = self.bindings.get(&source) {
            if state == ElementState::Pressed {
                self.click(action);
            }
        }
    }

    /// Register an action's key as held (also used directly by tests and
    /// scripted runs)
    pub fn press(&mut self, action: Action) {
        if action.is_tracked_key() {
            self.held.insert(action);
        } else {
            self.click(action);
        }
    }

    /// Release an action's key
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Register an edge-triggered action for the next frame
    pub fn click(&mut self, action: Action) {
        self.clicks.push(action);
    }

    /// Whether an action's key is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Build the input frame for this tick, draining pending clicks.
    ///
    /// Held keys repeat every tick; clicks fire once.
    pub fn frame(&mut self) -> InputFrame {
        let mut actions = std::mem::take(&mut self.clicks);

        for action in HELD_ORDER {
            if self.held.contains(&action) {
                actions.push(action);
            }
        }

        InputFrame {
            idle: self.held.is_empty(),
            actions,
        }
    }

    /// Clear all held and pending input
    pub fn reset(&mut self) {
        self.held.clear();
        self.clicks.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame_when_nothing_held() {
        let mut manager = InputManager::new();
        let frame = manager.frame();
        assert!(frame.idle);
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_held_key_repeats_every_frame() {
        let mut manager = InputManager::new();
        manager.press(Action::MoveRight);

        let frame = manager.frame();
        assert!(!frame.idle);
        assert_eq!(frame.actions, vec![Action::MoveRight]);

        // Still held next frame
        let frame = manager.frame();
        assert_eq!(frame.actions, vec![Action::MoveRight]);
    }

    #[test]
    fn test_click_fires_once() {
        let mut manager = InputManager::new();
        manager.click(Action::SwingVertical);

        let frame = manager.frame();
        assert_eq!(frame.actions, vec![Action::SwingVertical]);

        let frame = manager.frame();
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_clicks_dont_clear_idle() {
        let mut manager = InputManager::new();
        manager.click(Action::SwingHorizontal);

        // A mouse swing with no key held is still an idle tick for the
        // purposes of the no-input handler
        let frame = manager.frame();
        assert!(frame.idle);
        assert_eq!(frame.actions, vec![Action::SwingHorizontal]);
    }

    #[test]
    fn test_clicks_ordered_before_held_keys() {
        let mut manager = InputManager::new();
        manager.press(Action::MoveLeft);
        manager.click(Action::SwingVertical);

        let frame = manager.frame();
        assert_eq!(frame.actions, vec![Action::SwingVertical, Action::MoveLeft]);
    }

    #[test]
    fn test_release_stops_repeat() {
        let mut manager = InputManager::new();
        manager.press(Action::Jump);
        manager.frame();

        manager.release(Action::Jump);
        let frame = manager.frame();
        assert!(frame.idle);
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_press_routes_swings_to_clicks() {
        let mut manager = InputManager::new();
        // Pressing a swing action must be edge-triggered, not held
        manager.press(Action::SwingVertical);

        let frame = manager.frame();
        assert_eq!(frame.actions, vec![Action::SwingVertical]);
        let frame = manager.frame();
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_mouse_event_processing() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Left, ElementState::Pressed);

        let frame = manager.frame();
        assert_eq!(frame.actions, vec![Action::SwingVertical]);
    }

    #[test]
    fn test_middle_mouse_is_noop() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Middle, ElementState::Pressed);

        let frame = manager.frame();
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut manager = InputManager::new();
        manager.press(Action::MoveLeft);
        manager.click(Action::SwingVertical);
        manager.reset();

        let frame = manager.frame();
        assert!(frame.idle);
        assert!(frame.actions.is_empty());
    }
}
