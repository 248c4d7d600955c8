// Body and collider construction

use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Fluent rigid-body construction for the handful of configurations this
/// game spawns
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// A dynamic body, moved by forces and contacts
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// An immovable body for terrain
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            can_sleep: false,
            gravity_scale: 0.0,
            ..Self::new_dynamic()
        }
    }

    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// 1.0 = normal gravity, 0.0 = ignores gravity entirely
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (keeps the torso permanently upright)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Fluent collider construction. Every collider built here reports
/// collision events; the controller depends on contact-begin notifications
/// for grounding and the jump cue.
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// A box collider with the given half extents
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// A circle collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Mass is derived from shape area times density
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// The body/collider configurations the game actually spawns: the three
/// rig parts and terrain.
pub mod presets {
    use super::*;

    /// Torso: dynamic, rotation locked, unaffected by gravity.
    ///
    /// The torso is the reference frame for rendering; its vertical motion
    /// comes from gravity on the legs and piston through the joints, never
    /// from its own weight.
    pub fn torso_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(0.0)
            .can_sleep(false)
            .build()
    }

    /// Torso collider: light frictionless rectangle, full width/height
    pub fn torso_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0)
            .density(0.1)
            .build()
    }

    /// Legs: the motorized drive wheel of the rig
    pub fn legs_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .can_sleep(false)
            .build()
    }

    /// Legs collider: a heavy circle. Friction is caller-supplied because
    /// the controller toggles it between sticky and frictionless.
    pub fn legs_collider(radius: Real, friction: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Player)
            .friction(friction)
            .density(4.0)
            .build()
    }

    /// Piston: rides the prismatic rail under the torso
    pub fn piston_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .can_sleep(false)
            .build()
    }

    /// Piston collider: the rectangle the spring rams into the ground on
    /// jump launch. Full width/height of the piston.
    pub fn piston_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Player)
            .density(0.5)
            .build()
    }

    /// Fixed terrain body for ground platforms and wall brushes
    pub fn terrain_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Terrain collider, sized by full width/height
    pub fn terrain_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Terrain)
            .friction(0.3)
            .restitution(0.0)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bodies_never_sleep_or_fall() {
        let body = BodyBuilder::new_fixed().position(3.0, -1.0).build();
        assert_eq!(body.body_type(), RigidBodyType::Fixed);
        assert_eq!(body.translation().x, 3.0);
    }

    #[test]
    fn test_collider_reports_collision_events() {
        let collider = ColliderBuilder2D::circle(0.25).build();
        assert!(collider
            .active_events()
            .contains(ActiveEvents::COLLISION_EVENTS));
    }

    #[test]
    fn test_torso_preset_is_upright_and_weightless() {
        let body = presets::torso_body(0.0, 0.0);
        assert!(body.is_rotation_locked());
        assert_eq!(body.gravity_scale(), 0.0);
        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
    }

    #[test]
    fn test_legs_preset_takes_caller_friction() {
        assert_eq!(presets::legs_collider(0.25, 1000.0).friction(), 1000.0);
        assert_eq!(presets::legs_collider(0.25, 0.0).friction(), 0.0);
    }

    #[test]
    fn test_rig_colliders_share_player_group() {
        let torso = presets::torso_collider(0.75, 1.375);
        let legs = presets::legs_collider(0.25, 1000.0);
        let piston = presets::piston_collider(0.5, 0.75);

        let expected = CollisionGroups::Player.to_interaction_groups();
        assert_eq!(torso.collision_groups(), expected);
        assert_eq!(legs.collision_groups(), expected);
        assert_eq!(piston.collision_groups(), expected);
    }
}
