// The physics world wrapper around rapier2d

use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{BodyTag, CollisionEvent as GameCollisionEvent, CollisionEventQueue};

pub type JointHandle = rapier2d::prelude::ImpulseJointHandle;

/// Owns the whole rapier simulation: body/collider/joint sets, the solver
/// pipeline, the per-step collision event queue and the typed body tags.
///
/// Game code talks to physics exclusively through this type; rapier handles
/// leak out, rapier sets do not.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Contact begin/end events collected during `step`
    collision_event_queue: CollisionEventQueue,

    /// Typed tags attached to bodies (wall brushes etc.)
    body_tags: HashMap<RigidBodyHandle, BodyTag>,
}

impl PhysicsWorld {
    /// A world with standard downward gravity and a 1/60s timestep
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: vector![0.0, -9.81],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_tags: HashMap::new(),
        }
    }

    /// Advance the simulation by one fixed timestep. Collision events from
    /// the previous step are discarded first; the new step's events are
    /// readable through `get_collision_events` until the next call.
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.collision_event_queue,
        );
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    pub fn add_impulse_joint(
        &mut self,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        joint: impl Into<GenericJoint>,
    ) -> JointHandle {
        self.impulse_joint_set.insert(body1, body2, joint, true)
    }

    /// Remove a body together with its colliders, joints and tag
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.body_tags.remove(&handle);
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// The body a collider is attached to
    pub fn collider_parent(&self, handle: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(handle).and_then(|c| c.parent())
    }

    /// Overwrite a collider's friction coefficient.
    ///
    /// The grounding logic toggles the legs between frictionless (jump
    /// launch) and sticky (landed) through this.
    pub fn set_collider_friction(&mut self, handle: ColliderHandle, friction: Real) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_friction(friction);
        }
    }

    /// Apply a one-off linear impulse to a body, waking it
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, x: Real, y: Real) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.apply_impulse(vector![x, y], true);
        }
    }

    /// Mass of a body including its attached colliders
    pub fn body_mass(&self, handle: RigidBodyHandle) -> Real {
        self.rigid_body_set
            .get(handle)
            .map(|b| b.mass())
            .unwrap_or(0.0)
    }

    /// Tag a body (e.g. mark a terrain brush as a wall)
    pub fn tag_body(&mut self, handle: RigidBodyHandle, tag: BodyTag) {
        self.body_tags.insert(handle, tag);
    }

    /// Read a body's tag; untagged bodies read as `BodyTag::Default`
    pub fn body_tag(&self, handle: RigidBodyHandle) -> BodyTag {
        self.body_tags.get(&handle).copied().unwrap_or_default()
    }

    /// Set the target angular velocity of a motorized revolute joint
    pub fn set_motor_velocity(&mut self, handle: JointHandle, velocity: Real, factor: Real) {
        if let Some(joint) = self.impulse_joint_set.get_mut(handle) {
            joint
                .data
                .set_motor_velocity(JointAxis::AngX, velocity, factor);
        }
    }

    /// Read back the target angular velocity of a motorized joint
    pub fn motor_velocity(&self, handle: JointHandle) -> Option<Real> {
        self.impulse_joint_set
            .get(handle)
            .and_then(|joint| joint.data.motor(JointAxis::AngX))
            .map(|motor| motor.target_vel)
    }

    /// Set the rest length of a spring joint.
    ///
    /// rapier models the spring as a position motor on the coupled linear
    /// axis, so the stiffness/damping pair must be re-supplied along with
    /// the new target length.
    pub fn set_spring_rest_length(
        &mut self,
        handle: JointHandle,
        rest_length: Real,
        stiffness: Real,
        damping: Real,
    ) {
        if let Some(joint) = self.impulse_joint_set.get_mut(handle) {
            joint
                .data
                .set_motor_position(JointAxis::X, rest_length, stiffness, damping);
        }
    }

    /// Read back the rest length of a spring joint
    pub fn spring_rest_length(&self, handle: JointHandle) -> Option<Real> {
        self.impulse_joint_set
            .get(handle)
            .and_then(|joint| joint.data.motor(JointAxis::X))
            .map(|motor| motor.target_pos)
    }

    /// Collision events from the most recent `step`
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
