// Collision filtering, body tags and the per-step event queue

use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision filter groups.
///
/// The player rig is three overlapping rigid bodies (torso, legs, piston),
/// only two pairs of which are joint-connected. Rather than suppressing
/// each intra-rig pair individually, the `Player` group's filter simply
/// omits its own membership bit, so rig bodies never touch each other but
/// still hit terrain and loose objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Loose dynamic objects; interacts with everything
    Default = 0b001,
    /// The rig's torso, legs and piston
    Player = 0b010,
    /// Ground platforms and wall brushes
    Terrain = 0b100,
}

impl CollisionGroups {
    fn bit(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// The rapier interaction groups for a collider in this group
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            CollisionGroups::Default => Group::ALL,
            // Everything except other rig bodies
            CollisionGroups::Player => CollisionGroups::Default.bit() | CollisionGroups::Terrain.bit(),
            CollisionGroups::Terrain => Group::ALL,
        };
        InteractionGroups::new(self.bit(), filter)
    }
}

/// Typed marker attached to physics bodies.
///
/// Wall brushes are tagged so the grounding logic can tell a wall graze
/// from a genuine landing. Untagged bodies read as `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyTag {
    #[default]
    Default,
    Wall,
}

impl BodyTag {
    pub fn is_wall(self) -> bool {
        self == BodyTag::Wall
    }
}

/// A contact transition observed during one physics step
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Collects collision events raised inside the physics step so game code
/// can drain them afterwards.
///
/// rapier calls the event handler from within the solver, which only gets
/// a shared reference, hence the mutex. Cleared at the start of each step.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Drop events from the previous step
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Snapshot of this step's events
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let mapped = match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _) => CollisionEvent::Started {
                collider1: h1,
                collider2: h2,
            },
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _) => CollisionEvent::Stopped {
                collider1: h1,
                collider2: h2,
            },
        };
        self.push(mapped);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact force magnitudes are not used by the controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_use_distinct_bits() {
        let bits = [
            CollisionGroups::Default as u32,
            CollisionGroups::Player as u32,
            CollisionGroups::Terrain as u32,
        ];
        for (i, a) in bits.iter().enumerate() {
            assert_eq!(a.count_ones(), 1);
            for b in &bits[i + 1..] {
                assert_eq!(a & b, 0, "group bits must not overlap");
            }
        }
    }

    #[test]
    fn test_rig_bodies_never_self_collide() {
        let groups = CollisionGroups::Player.to_interaction_groups();
        // The membership bit missing from the filter is what keeps torso,
        // legs and piston out of each other's way
        assert!(!groups.filter.contains(groups.memberships));
    }

    #[test]
    fn test_rig_bodies_hit_terrain_and_objects() {
        let groups = CollisionGroups::Player.to_interaction_groups();
        assert!(groups.filter.contains(CollisionGroups::Terrain.bit()));
        assert!(groups.filter.contains(CollisionGroups::Default.bit()));
    }

    #[test]
    fn test_untagged_reads_as_ground() {
        assert!(!BodyTag::default().is_wall());
        assert!(BodyTag::Wall.is_wall());
    }
}
