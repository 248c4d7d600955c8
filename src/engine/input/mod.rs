// Input handling system
//
// Turns raw keyboard/mouse events into one `InputFrame` per simulation tick:
// an ordered list of game actions plus an "idle" flag raised when no tracked
// key is held. The controller consumes frames through a single dispatcher
// rather than per-key callbacks.
//
// - `action`: game actions and the default key/mouse bindings
// - `manager`: held/clicked tracking and per-tick frame assembly

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use manager::{InputFrame, InputManager};
