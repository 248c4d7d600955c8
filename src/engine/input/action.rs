// Game actions and the default key/mouse bindings

use std::collections::HashMap;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the player can ask the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Vertical weapon swing (left mouse)
    SwingVertical,
    /// Horizontal weapon swing (right mouse)
    SwingHorizontal,
}

impl Action {
    /// Whether this action repeats while its key is held. Held actions
    /// feed the idle ("no input") detection; mouse swings are
    /// edge-triggered and don't count.
    pub fn is_tracked_key(self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight | Self::Jump)
    }
}

/// A raw binding source: one keyboard key or one mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default bindings: A/D walk, W jumps, left/right mouse swing. Middle
/// mouse stays unbound.
pub fn default_bindings() -> HashMap<InputSource, Action> {
    HashMap::from([
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::Jump),
        (InputSource::mouse(MouseButton::Left), Action::SwingVertical),
        (
            InputSource::mouse(MouseButton::Right),
            Action::SwingHorizontal,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_binding() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::SwingVertical,
            Action::SwingHorizontal,
        ] {
            assert!(
                bindings.values().any(|a| *a == action),
                "missing binding for {action:?}"
            );
        }
    }

    #[test]
    fn test_swings_are_mouse_bound() {
        let bindings = default_bindings();
        assert_eq!(
            bindings.get(&InputSource::mouse(MouseButton::Left)),
            Some(&Action::SwingVertical)
        );
        assert_eq!(
            bindings.get(&InputSource::mouse(MouseButton::Right)),
            Some(&Action::SwingHorizontal)
        );
    }

    #[test]
    fn test_middle_mouse_unbound() {
        let bindings = default_bindings();
        assert!(!bindings.contains_key(&InputSource::mouse(MouseButton::Middle)));
    }

    #[test]
    fn test_tracked_keys_exclude_swings() {
        assert!(Action::MoveLeft.is_tracked_key());
        assert!(Action::MoveRight.is_tracked_key());
        assert!(Action::Jump.is_tracked_key());
        assert!(!Action::SwingVertical.is_tracked_key());
        assert!(!Action::SwingHorizontal.is_tracked_key());
    }
}
