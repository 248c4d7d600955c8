// Player tuning constants
//
// Everything here was tuned against the rig geometry; the width/height pair
// in particular feeds directly into body placement, so change with care.

/// Fixed player tuning values
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Dimensions (world units)
    /// Full silhouette width
    pub width: f32,
    /// Full silhouette height
    pub height: f32,

    // Locomotion
    /// Target angular rate of the leg motor (rad/s), signed per direction
    pub move_speed: f32,
    /// Lateral impulse applied to the legs per tick while airborne
    pub air_impulse: f32,
    /// Max force the leg motor may exert to reach its target rate
    pub motor_torque: f32,

    // Jump
    /// Spring rest length while launching; 0 retracts the piston
    pub jump_force: f32,
    /// Spring oscillation frequency (Hz)
    pub spring_frequency: f32,
    /// Spring damping ratio (1.0 = critically damped)
    pub spring_damping_ratio: f32,

    // Friction
    /// Legs friction while grounded ("sticky")
    pub ground_friction: f32,
    /// Legs friction during jump launch
    pub launch_friction: f32,

    // Timers (seconds)
    /// Cooldown before the jump key re-arms
    pub jump_cooldown: f32,
    /// Delay before the spring retracts after launch; shorter than the jump
    /// cooldown so the spring acts as an impulse, not a sustained force
    pub spring_reset_delay: f32,
    /// Cooldown before another attack may start
    pub attack_cooldown: f32,
}

/// The one set of player stats
pub const BASE_STATS: PlayerStats = PlayerStats {
    width: 0.5,
    height: 1.5,

    move_speed: 20.0,
    air_impulse: 0.03,
    motor_torque: 20.0,

    jump_force: 1.5,
    spring_frequency: 10.0,
    spring_damping_ratio: 1.0,

    ground_friction: 1000.0,
    launch_friction: 0.0,

    jump_cooldown: 0.25,
    spring_reset_delay: 0.1,
    attack_cooldown: 0.33,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Height of the torso rectangle; the torso is shorter than the full
    /// silhouette by one leg diameter
    pub fn torso_height(&self) -> f32 {
        self.height - self.width
    }

    /// Vertical offset from torso center to the render transform center
    pub fn render_offset(&self) -> f32 {
        self.width / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.move_speed, 20.0);
        assert_eq!(stats.jump_force, 1.5);
        assert_eq!(stats.width, 0.5);
    }

    #[test]
    fn test_spring_reset_shorter_than_jump_cooldown() {
        // The spring must retract before the jump re-arms, otherwise the
        // spring force would be sustained instead of impulsive
        let stats = PlayerStats::default();
        assert!(stats.spring_reset_delay < stats.jump_cooldown);
    }

    #[test]
    fn test_torso_height() {
        let stats = PlayerStats::default();
        assert_eq!(stats.torso_height(), 1.0);
        assert_eq!(stats.render_offset(), 0.125);
    }
}
