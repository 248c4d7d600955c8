// Player character: rig + controller + animation glue

use log::info;

use crate::engine::input::InputFrame;
use crate::engine::physics::{CollisionEvent, PhysicsWorld};

use super::animation::AnimationSet;
use super::controller::PlayerController;
use super::rig::{PlayerRig, RenderTransform, RigError};
use super::stats::PlayerStats;

/// Downward torso velocity (units/s) past which the falling signal raises.
/// Small enough to catch walking off a ledge, large enough to ignore solver
/// jitter while standing.
const FALL_VELOCITY_THRESHOLD: f32 = 0.5;

/// A playable character: the physical rig, its controller state machine and
/// its animation clips, updated together once per simulation tick.
pub struct Character {
    pub rig: PlayerRig,
    pub controller: PlayerController,
    pub animations: AnimationSet,

    /// Render transform derived from the torso after each tick
    render: RenderTransform,
}

impl Character {
    /// Spawn a character at the given position
    pub fn spawn(
        physics: &mut PhysicsWorld,
        stats: PlayerStats,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<Self, RigError> {
        let rig = PlayerRig::spawn(physics, &stats, spawn_x, spawn_y)?;
        let render = rig.render_transform(physics);

        info!("spawned player character at ({spawn_x}, {spawn_y})");

        Ok(Self {
            rig,
            controller: PlayerController::new(stats),
            animations: AnimationSet::player_clips(),
            render,
        })
    }

    /// Run one simulation tick. The caller has already stepped the physics
    /// world; this routes its events and input through the controller in a
    /// fixed order:
    ///
    /// 1. collision events from the step just taken,
    /// 2. falling detection from torso velocity,
    /// 3. ordered input command dispatch,
    /// 4. timer advancement,
    /// 5. pose sync into the render transform,
    /// 6. animation advancement.
    pub fn update(&mut self, physics: &mut PhysicsWorld, frame: &InputFrame, dt: f32) {
        self.route_collisions(physics);

        let vy = self.rig.vertical_velocity(physics);
        self.controller.on_falling(vy < -FALL_VELOCITY_THRESHOLD);

        self.controller
            .dispatch(frame, &self.rig, physics, &mut self.animations);

        self.controller.tick_timers(dt, &self.rig, physics);

        self.render = self.rig.render_transform(physics);

        self.controller.advance_animation(&mut self.animations, dt);
    }

    /// Feed this step's contact-begin events to the controller
    fn route_collisions(&mut self, physics: &mut PhysicsWorld) {
        for event in physics.get_collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };

            let (Some(body1), Some(body2)) = (
                physics.collider_parent(collider1),
                physics.collider_parent(collider2),
            ) else {
                continue;
            };

            if body1 == self.rig.legs || body2 == self.rig.legs {
                let tag1 = physics.body_tag(body1);
                let tag2 = physics.body_tag(body2);
                self.controller
                    .on_legs_contact(tag1, tag2, &self.rig, physics);
            }

            if body1 == self.rig.piston || body2 == self.rig.piston {
                self.controller.on_piston_contact();
            }
        }
    }

    /// The render transform from the most recent tick
    pub fn render_transform(&self) -> RenderTransform {
        self.render
    }

    /// Sprite sheet frame the render layer should display
    pub fn current_frame(&self) -> u32 {
        self.animations.frame(self.controller.active_clip())
    }

    /// Sprite x-scale sign for the current facing
    pub fn sprite_flip(&self) -> f32 {
        self.controller.facing().sign()
    }

    /// Remove the character's bodies from the physics world
    pub fn despawn(self, physics: &mut PhysicsWorld) {
        self.rig.despawn(physics);
    }
}
