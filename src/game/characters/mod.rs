// Player character system
//
// This module contains everything that makes the player move:
// - Physical rig (torso + legs + piston) and its joints
// - Controller state machine mapping input and events to joint targets
// - Frame-range sprite animations
// - Tuning stats

pub mod animation;
pub mod character;
pub mod controller;
pub mod rig;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationSet, Clip, ClipId};
pub use character::Character;
pub use controller::{Command, Facing, PlayerController, SwingKind};
pub use rig::{PlayerRig, RenderTransform, RigError};
pub use stats::{PlayerStats, BASE_STATS};
