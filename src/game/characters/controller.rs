// Player controller state machine
//
// Maps input commands, collision events and timer completions onto rig
// joint targets and the active animation clip. One ordered dispatcher
// processes an explicit command list each tick; there are no per-key
// callbacks and no shared mutable captures.

use log::debug;

use crate::core::Timer;
use crate::engine::input::{Action, InputFrame};
use crate::engine::physics::{BodyTag, PhysicsWorld};

use super::animation::{AnimationSet, ClipId};
use super::rig::PlayerRig;
use super::stats::PlayerStats;

/// Attack swing variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingKind {
    Vertical,
    Horizontal,
}

/// Horizontal facing, mirrored into the sprite by the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Sprite x-scale sign for this facing
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A single resolved input command for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Attack(SwingKind),
}

impl Command {
    /// The input-symbol-to-command table
    pub fn from_action(action: Action) -> Command {
        match action {
            Action::MoveLeft => Command::MoveLeft,
            Action::MoveRight => Command::MoveRight,
            Action::Jump => Command::Jump,
            Action::SwingVertical => Command::Attack(SwingKind::Vertical),
            Action::SwingHorizontal => Command::Attack(SwingKind::Horizontal),
        }
    }
}

/// What the player is committed to this tick.
///
/// Walking while attacking is unrepresentable: movement is only applied in
/// `Free`, so attack exclusivity is structural rather than guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionState {
    Free,
    Attacking(SwingKind),
}

/// The player controller state machine.
///
/// `airborne` and the cooldown latches deliberately stay independent of
/// `ActionState`: jumping does not block attacking (only the reverse), and
/// grounding may clear `airborne` while an aerial swing still plays. Both
/// asymmetries are long-standing gameplay behavior.
pub struct PlayerController {
    stats: PlayerStats,

    /// True from jump launch (or fall detection) until the legs touch
    /// non-wall ground
    airborne: bool,
    /// Jump key re-arms when the jump cooldown elapses
    can_jump: bool,
    /// Attack re-arms when the attack cooldown elapses
    can_attack: bool,
    /// Current commitment (free or mid-swing)
    action: ActionState,
    /// Horizontal facing, flipped by move commands
    facing: Facing,

    /// The clip currently owned by the controller
    active_clip: ClipId,

    /// Re-arms the jump key
    jump_cooldown: Timer,
    /// Retracts the spring after launch
    spring_reset: Timer,
    /// Re-arms attacks
    attack_cooldown: Timer,
}

impl PlayerController {
    pub fn new(stats: PlayerStats) -> Self {
        let jump_cooldown = Timer::new(stats.jump_cooldown);
        let spring_reset = Timer::new(stats.spring_reset_delay);
        let attack_cooldown = Timer::new(stats.attack_cooldown);

        Self {
            stats,
            airborne: false,
            can_jump: true,
            can_attack: true,
            action: ActionState::Free,
            facing: Facing::Right,
            active_clip: ClipId::Standing,
            jump_cooldown,
            spring_reset,
            attack_cooldown,
        }
    }

    /// Process one tick's input frame through the ordered dispatcher
    pub fn dispatch(
        &mut self,
        frame: &InputFrame,
        rig: &PlayerRig,
        physics: &mut PhysicsWorld,
        animations: &mut AnimationSet,
    ) {
        if frame.idle {
            self.on_idle(rig, physics);
        }

        for &action in &frame.actions {
            self.handle(Command::from_action(action), rig, physics, animations);
        }
    }

    /// Apply a single command
    pub fn handle(
        &mut self,
        command: Command,
        rig: &PlayerRig,
        physics: &mut PhysicsWorld,
        animations: &mut AnimationSet,
    ) {
        match command {
            Command::MoveLeft => self.on_move(Facing::Left, rig, physics),
            Command::MoveRight => self.on_move(Facing::Right, rig, physics),
            Command::Jump => self.on_jump(rig, physics),
            Command::Attack(kind) => self.on_attack(kind, rig, physics, animations),
        }
    }

    /// No tracked key held this tick: stop the motor; settle into the
    /// standing pose unless something else owns the animation
    fn on_idle(&mut self, rig: &PlayerRig, physics: &mut PhysicsWorld) {
        rig.set_motor_speed(physics, 0.0);
        if !self.airborne && self.action == ActionState::Free {
            self.active_clip = ClipId::Standing;
        }
    }

    /// Move key held: spin the legs on ground, nudge them in the air.
    /// Ignored entirely mid-swing.
    fn on_move(&mut self, direction: Facing, rig: &PlayerRig, physics: &mut PhysicsWorld) {
        if self.attacking() {
            return;
        }

        if !self.airborne {
            rig.set_motor_speed(physics, direction.sign() * self.stats.move_speed);
            self.active_clip = ClipId::Walking;
        } else {
            physics.apply_impulse(rig.legs, direction.sign() * self.stats.air_impulse, 0.0);
        }

        self.facing = direction;
    }

    /// Jump key: extend the spring, free the legs, arm both jump timers
    fn on_jump(&mut self, rig: &PlayerRig, physics: &mut PhysicsWorld) {
        if !self.can_jump {
            return;
        }

        debug!("jump launch");
        self.airborne = true;
        self.can_jump = false;
        rig.set_spring_length(physics, self.stats.jump_force);
        rig.set_motor_speed(physics, 0.0);
        rig.set_legs_friction(physics, self.stats.launch_friction);
        self.jump_cooldown.start();
        self.spring_reset.start();
    }

    /// Attack trigger: commit to a swing variant picked by the current
    /// grounded/aerial state. The swing clip restarts so a previously
    /// completed one-shot can replay.
    fn on_attack(
        &mut self,
        kind: SwingKind,
        rig: &PlayerRig,
        physics: &mut PhysicsWorld,
        animations: &mut AnimationSet,
    ) {
        if !self.can_attack {
            return;
        }

        debug!("attack: {kind:?} (airborne: {})", self.airborne);
        self.can_attack = false;
        self.action = ActionState::Attacking(kind);

        let clip = match (kind, self.airborne) {
            (SwingKind::Vertical, false) => ClipId::VSwing,
            (SwingKind::Vertical, true) => ClipId::VSwingAerial,
            (SwingKind::Horizontal, false) => ClipId::HSwing,
            (SwingKind::Horizontal, true) => ClipId::HSwingAerial,
        };
        animations.restart(clip);
        self.active_clip = clip;
        rig.set_motor_speed(physics, 0.0);
        self.attack_cooldown.start();
    }

    /// Falling signal from the torso (derived from vertical velocity by the
    /// caller). Falling always marks the controller airborne; only
    /// grounding clears it.
    pub fn on_falling(&mut self, falling: bool) {
        if falling {
            if !self.attacking() {
                self.active_clip = ClipId::Falling;
            }
            self.airborne = true;
        }
    }

    /// Legs contact began. Wall brushes never count as ground; anything
    /// else re-grounds the rig and makes the legs sticky again. The
    /// physical contact itself is always allowed to resolve.
    pub fn on_legs_contact(
        &mut self,
        tag_a: BodyTag,
        tag_b: BodyTag,
        rig: &PlayerRig,
        physics: &mut PhysicsWorld,
    ) {
        if tag_a.is_wall() || tag_b.is_wall() {
            return;
        }

        self.airborne = false;
        rig.set_legs_friction(physics, self.stats.ground_friction);
        if !self.attacking() {
            self.active_clip = ClipId::Standing;
        }
    }

    /// Piston contact began: the extended piston struck the ground during
    /// launch, which is the ascent visual cue
    pub fn on_piston_contact(&mut self) {
        self.active_clip = ClipId::Jumping;
    }

    /// Advance the three cooldown timers and apply their completions
    pub fn tick_timers(&mut self, dt: f32, rig: &PlayerRig, physics: &mut PhysicsWorld) {
        if self.jump_cooldown.advance(dt) {
            self.can_jump = true;
        }
        if self.spring_reset.advance(dt) {
            rig.set_spring_length(physics, 0.0);
        }
        if self.attack_cooldown.advance(dt) {
            self.can_attack = true;
        }
    }

    /// Advance the active clip; a finishing swing releases the attack
    /// commitment (one shared handler for all four swing variants)
    pub fn advance_animation(&mut self, animations: &mut AnimationSet, dt: f32) {
        if animations.advance(self.active_clip, dt) && self.active_clip.is_swing() {
            self.action = ActionState::Free;
            self.active_clip = if self.airborne {
                ClipId::Aerial
            } else {
                ClipId::Standing
            };
        }
    }

    /// Whether the controller considers the player airborne
    pub fn airborne(&self) -> bool {
        self.airborne
    }

    /// Whether a swing is currently in progress
    pub fn attacking(&self) -> bool {
        matches!(self.action, ActionState::Attacking(_))
    }

    /// Whether the jump key is armed
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Whether an attack may start
    pub fn can_attack(&self) -> bool {
        self.can_attack
    }

    /// The clip the controller currently owns
    pub fn active_clip(&self) -> ClipId {
        self.active_clip
    }

    /// Current horizontal facing
    pub fn facing(&self) -> Facing {
        self.facing
    }
}
