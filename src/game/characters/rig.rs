// The player's physical rig: torso + legs + piston
//
// To locomote the player, the rig is modelled as:
//   +-----+
//   |     |
//   |torso|  <-- rectangle, rotation locked, gravity off
//   |/---\|
//   |legs |  <-- circle, spun by a motor joint against ground friction
//    \---/
// with a spring-loaded piston riding a vertical rail under the torso.
// Extending the spring rams the piston into the ground and launches the
// rig upward; a timer retracts it shortly after.

use glam::Vec2;
use rapier2d::na as nalgebra;
use rapier2d::prelude::{point, PrismaticJointBuilder, RevoluteJointBuilder, SpringJointBuilder};
use rapier2d::prelude::Vector;
use thiserror::Error;

use crate::engine::physics::body::presets;
use crate::engine::physics::{ColliderHandle, JointHandle, PhysicsWorld, RigidBodyHandle};

use super::stats::PlayerStats;

/// Errors raised while assembling the rig
#[derive(Debug, Error)]
pub enum RigError {
    #[error("spawn position ({0}, {1}) is not finite")]
    InvalidSpawn(f32, f32),
}

/// Render-facing transform derived from the rig each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    /// Center of the player silhouette in world space
    pub position: Vec2,
    /// Rotation in radians (always zero while the torso stays rotation
    /// locked, but copied through in case a future posture system unlocks it)
    pub rotation: f32,
}

/// Handles to the rig's bodies and joints, created once at spawn.
///
/// The physics world owns the actual bodies; dropping the rig's owner must
/// remove them through `despawn`.
#[derive(Debug)]
pub struct PlayerRig {
    pub torso: RigidBodyHandle,
    pub legs: RigidBodyHandle,
    pub piston: RigidBodyHandle,

    legs_collider: ColliderHandle,

    /// Revolute Torso<->Legs joint driving horizontal locomotion
    motor_axis: JointHandle,
    /// Spring Piston<->Torso joint; extending it imparts the jump impulse
    spring: JointHandle,
    /// Prismatic Piston<->Torso joint constraining the piston vertically
    #[allow(dead_code)]
    prismatic: JointHandle,

    /// Spring motor stiffness, derived from the configured frequency and
    /// the piston's mass
    spring_stiffness: f32,
    /// Spring motor damping, derived from the damping ratio
    spring_damping: f32,

    /// Vertical offset from torso center to silhouette center
    render_offset: f32,
}

impl PlayerRig {
    /// Assemble the rig at the given spawn position.
    ///
    /// All three bodies share the `Player` collision group, which suppresses
    /// every intra-rig contact pair (including piston<->legs, which no joint
    /// connects).
    pub fn spawn(
        physics: &mut PhysicsWorld,
        stats: &PlayerStats,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<Self, RigError> {
        if !spawn_x.is_finite() || !spawn_y.is_finite() {
            return Err(RigError::InvalidSpawn(spawn_x, spawn_y));
        }

        let torso_width = stats.width + 0.25;
        let torso_height = stats.torso_height();

        // Torso: the upright reference frame
        let torso = physics.add_rigid_body(presets::torso_body(spawn_x, spawn_y));
        physics.add_collider(
            presets::torso_collider(torso_width, stats.height - stats.width / 4.0),
            torso,
        );

        // Legs: drive wheel below the torso center
        let legs_y = spawn_y - (torso_height / 2.0 + stats.width / 4.0);
        let legs = physics.add_rigid_body(presets::legs_body(spawn_x, legs_y));
        let legs_collider = physics.add_collider(
            presets::legs_collider(stats.width / 2.0, stats.ground_friction),
            legs,
        );

        // Piston: spring-loaded ram at the spawn point
        let piston = physics.add_rigid_body(presets::piston_body(spawn_x, spawn_y));
        physics.add_collider(
            presets::piston_collider(stats.width, stats.height / 2.0),
            piston,
        );

        // Motor axis: revolute joint at the bodies' shared origin
        let motor_axis = physics.add_impulse_joint(
            torso,
            legs,
            RevoluteJointBuilder::new()
                .local_anchor1(point![0.0, -(torso_height / 2.0 + stats.width / 4.0)])
                .local_anchor2(point![0.0, 0.0])
                .motor_velocity(0.0, 1.0)
                .motor_max_force(stats.motor_torque)
                .contacts_enabled(false),
        );

        // Spring: rest length 0 keeps the piston retracted against the
        // torso. Stiffness/damping come from the tuned frequency (Hz) and
        // damping ratio against the piston's actual mass.
        let piston_mass = physics.body_mass(piston);
        let omega = std::f32::consts::TAU * stats.spring_frequency;
        let spring_stiffness = piston_mass * omega * omega;
        let spring_damping = 2.0 * piston_mass * stats.spring_damping_ratio * omega;

        let spring = physics.add_impulse_joint(
            piston,
            torso,
            SpringJointBuilder::new(0.0, spring_stiffness, spring_damping)
                .local_anchor1(point![0.0, 0.0])
                .local_anchor2(point![0.0, 0.0])
                .contacts_enabled(false),
        );

        // Prismatic rail: the piston may only slide vertically relative to
        // the torso
        let prismatic = physics.add_impulse_joint(
            piston,
            torso,
            PrismaticJointBuilder::new(Vector::y_axis())
                .local_anchor1(point![0.0, 0.0])
                .local_anchor2(point![0.0, 0.0])
                .contacts_enabled(false),
        );

        Ok(Self {
            torso,
            legs,
            piston,
            legs_collider,
            motor_axis,
            spring,
            prismatic,
            spring_stiffness,
            spring_damping,
            render_offset: stats.render_offset(),
        })
    }

    /// Set the leg motor's target angular rate (rad/s, signed per direction)
    pub fn set_motor_speed(&self, physics: &mut PhysicsWorld, speed: f32) {
        physics.set_motor_velocity(self.motor_axis, speed, 1.0);
    }

    /// Current leg motor target rate
    pub fn motor_speed(&self, physics: &PhysicsWorld) -> f32 {
        physics.motor_velocity(self.motor_axis).unwrap_or(0.0)
    }

    /// Extend the spring to the given rest length (the jump launch)
    pub fn set_spring_length(&self, physics: &mut PhysicsWorld, length: f32) {
        physics.set_spring_rest_length(
            self.spring,
            length,
            self.spring_stiffness,
            self.spring_damping,
        );
    }

    /// Current spring rest length
    pub fn spring_length(&self, physics: &PhysicsWorld) -> f32 {
        physics.spring_rest_length(self.spring).unwrap_or(0.0)
    }

    /// Overwrite the legs' contact friction (sticky when grounded, zero
    /// during jump launch)
    pub fn set_legs_friction(&self, physics: &mut PhysicsWorld, friction: f32) {
        physics.set_collider_friction(self.legs_collider, friction);
    }

    /// Current legs contact friction
    pub fn legs_friction(&self, physics: &PhysicsWorld) -> f32 {
        physics
            .get_collider(self.legs_collider)
            .map(|c| c.friction())
            .unwrap_or(0.0)
    }

    /// Whether the given body is part of this rig
    pub fn owns_body(&self, handle: RigidBodyHandle) -> bool {
        handle == self.torso || handle == self.legs || handle == self.piston
    }

    /// The torso's current vertical velocity
    pub fn vertical_velocity(&self, physics: &PhysicsWorld) -> f32 {
        physics
            .get_rigid_body(self.torso)
            .map(|b| b.linvel().y)
            .unwrap_or(0.0)
    }

    /// Derive the render transform from the torso pose.
    ///
    /// The torso is shorter than the full silhouette by half the player
    /// width, so the silhouette center sits a quarter width below the torso
    /// center.
    pub fn render_transform(&self, physics: &PhysicsWorld) -> RenderTransform {
        let (position, rotation) = physics
            .get_rigid_body(self.torso)
            .map(|body| {
                let t = body.translation();
                (Vec2::new(t.x, t.y - self.render_offset), body.rotation().angle())
            })
            .unwrap_or((Vec2::ZERO, 0.0));

        RenderTransform { position, rotation }
    }

    /// Remove the rig's bodies (and with them its colliders and joints)
    /// from the physics world
    pub fn despawn(self, physics: &mut PhysicsWorld) {
        physics.remove_rigid_body(self.torso);
        physics.remove_rigid_body(self.legs);
        physics.remove_rigid_body(self.piston);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::stats::BASE_STATS;
    use approx::assert_relative_eq;

    fn spawn_rig() -> (PhysicsWorld, PlayerRig) {
        let mut physics = PhysicsWorld::new();
        let rig = PlayerRig::spawn(&mut physics, &BASE_STATS, 0.0, 0.0).unwrap();
        (physics, rig)
    }

    #[test]
    fn test_spawn_rejects_non_finite_position() {
        let mut physics = PhysicsWorld::new();
        assert!(PlayerRig::spawn(&mut physics, &BASE_STATS, f32::NAN, 0.0).is_err());
        assert!(PlayerRig::spawn(&mut physics, &BASE_STATS, 0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_legs_sit_below_torso() {
        let (physics, rig) = spawn_rig();

        let torso_y = physics.get_rigid_body(rig.torso).unwrap().translation().y;
        let legs_y = physics.get_rigid_body(rig.legs).unwrap().translation().y;

        // torso_height/2 + width/4 = 0.5 + 0.125
        assert_relative_eq!(torso_y - legs_y, 0.625, epsilon = 1e-6);
    }

    #[test]
    fn test_torso_is_gravity_free_and_upright() {
        let (physics, rig) = spawn_rig();

        let torso = physics.get_rigid_body(rig.torso).unwrap();
        assert_eq!(torso.gravity_scale(), 0.0);
        assert!(torso.is_rotation_locked());
    }

    #[test]
    fn test_spring_starts_retracted() {
        let (physics, rig) = spawn_rig();
        assert_eq!(rig.spring_length(&physics), 0.0);
    }

    #[test]
    fn test_spring_extend_and_retract() {
        let (mut physics, rig) = spawn_rig();

        rig.set_spring_length(&mut physics, BASE_STATS.jump_force);
        assert_eq!(rig.spring_length(&physics), 1.5);

        rig.set_spring_length(&mut physics, 0.0);
        assert_eq!(rig.spring_length(&physics), 0.0);
    }

    #[test]
    fn test_motor_speed_roundtrip() {
        let (mut physics, rig) = spawn_rig();

        assert_eq!(rig.motor_speed(&physics), 0.0);
        rig.set_motor_speed(&mut physics, -BASE_STATS.move_speed);
        assert_eq!(rig.motor_speed(&physics), -20.0);
    }

    #[test]
    fn test_legs_friction_toggles() {
        let (mut physics, rig) = spawn_rig();

        assert_eq!(rig.legs_friction(&physics), BASE_STATS.ground_friction);
        rig.set_legs_friction(&mut physics, 0.0);
        assert_eq!(rig.legs_friction(&physics), 0.0);
    }

    #[test]
    fn test_render_transform_offset() {
        let (physics, rig) = spawn_rig();

        let transform = rig.render_transform(&physics);
        assert_relative_eq!(transform.position.y, -0.125, epsilon = 1e-6);
        assert_eq!(transform.rotation, 0.0);
    }

    #[test]
    fn test_owns_body() {
        let (mut physics, rig) = spawn_rig();

        assert!(rig.owns_body(rig.torso));
        assert!(rig.owns_body(rig.legs));
        assert!(rig.owns_body(rig.piston));

        let other = physics.add_rigid_body(presets::terrain_body(5.0, 0.0));
        assert!(!rig.owns_body(other));
    }

    #[test]
    fn test_torso_holds_altitude_without_support() {
        // Gravity is off for the torso; over a short window with the legs
        // and piston hanging from the joints the assembly should not
        // free-fall the way an unjointed dynamic body would
        let (mut physics, rig) = spawn_rig();

        for _ in 0..5 {
            physics.step();
        }

        let torso_y = physics.get_rigid_body(rig.torso).unwrap().translation().y;
        assert!(torso_y > -1.0, "torso dropped too far: {torso_y}");
    }

    #[test]
    fn test_despawn_removes_bodies() {
        let (mut physics, rig) = spawn_rig();
        let torso = rig.torso;

        rig.despawn(&mut physics);
        assert!(physics.get_rigid_body(torso).is_none());
    }
}
