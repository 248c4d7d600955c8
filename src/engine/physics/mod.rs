// Physics system built on rapier2d
//
// - `world`: the simulation wrapper game code talks to
// - `body`: body/collider builders and the rig/terrain presets
// - `collision`: filter groups, body tags and the per-step event queue

pub mod body;
mod collision;
mod world;

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::{BodyTag, CollisionEvent};
pub use world::{JointHandle, PhysicsWorld};

#[allow(unused_imports)]
pub use collision::CollisionGroups;
