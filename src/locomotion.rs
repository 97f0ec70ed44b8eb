//! First-person locomotion: speeds, sprinting and stamina
//!
//! `Locomotion` is the movement side of the carry handshake. It does not
//! move anything itself; each tick it works out whether the player is
//! sprinting, updates stamina and returns the speed to move at.
//!
//! # Stamina
//!
//! - Sprinting drains `stamina_drain_rate` per second. Hitting zero marks
//!   the player exhausted.
//! - After `stamina_regen_delay` seconds without sprinting, stamina
//!   regenerates at `stamina_regen_rate` per second.
//! - Exhaustion clears once stamina climbs above `exhaustion_recovery` of
//!   the maximum. Until then sprinting is impossible.

use crate::carry::{CarryMovement, CarryProfile};
use crate::config::LocomotionConfig;

/// Movement input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    /// Forward/back axis, positive is forward
    pub forward: f32,
    /// Left/right axis
    pub strafe: f32,
    pub run: bool,
    pub crouch: bool,
}

impl MoveInput {
    pub fn walking_forward() -> Self {
        MoveInput {
            forward: 1.0,
            ..Default::default()
        }
    }

    pub fn sprinting_forward() -> Self {
        MoveInput {
            forward: 1.0,
            run: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Locomotion {
    config: LocomotionConfig,
    stamina: f32,
    exhausted: bool,
    sprinting: bool,
    /// Seconds since the last tick spent sprinting
    since_sprint: f32,
    carrying: bool,
    carry: CarryProfile,
}

impl Locomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        Locomotion {
            stamina: config.max_stamina,
            config,
            exhausted: false,
            sprinting: false,
            since_sprint: f32::INFINITY,
            carrying: false,
            carry: CarryProfile::NONE,
        }
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying
    }

    pub fn carry_profile(&self) -> CarryProfile {
        self.carry
    }

    /// Advances one frame and returns the movement speed in m/s
    ///
    /// Sprint eligibility is decided first, then stamina is drained or
    /// regenerated for this frame.
    pub fn tick(&mut self, input: &MoveInput, dt: f32) -> f32 {
        let dt = dt.max(0.0);

        let has_stamina = self.stamina > 0.0 && !self.exhausted;
        self.sprinting = input.run
            && input.forward > 0.0
            && !input.crouch
            && self.carry.allow_sprint
            && has_stamina;

        self.update_stamina(dt);

        let base = if input.crouch {
            self.config.crouch_speed
        } else if self.sprinting {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };
        base * self.carry.speed_multiplier
    }

    fn update_stamina(&mut self, dt: f32) {
        let max = self.config.max_stamina;

        if self.sprinting {
            self.stamina -= self.config.stamina_drain_rate * dt;
            self.since_sprint = 0.0;
            if self.stamina <= 0.0 {
                self.stamina = 0.0;
                self.exhausted = true;
                log::debug!("Out of stamina");
            }
        } else {
            self.since_sprint += dt;
            if self.since_sprint > self.config.stamina_regen_delay {
                self.stamina += self.config.stamina_regen_rate * dt;
            }
            if self.exhausted && self.stamina > max * self.config.exhaustion_recovery {
                self.exhausted = false;
            }
        }

        self.stamina = self.stamina.clamp(0.0, max);
    }
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl CarryMovement for Locomotion {
    fn set_carry_state(&mut self, carrying: bool, speed_multiplier: f32, allow_sprint: bool) {
        self.carrying = carrying;
        self.carry = CarryProfile {
            speed_multiplier,
            allow_sprint,
        };
    }

    fn reset_carry_state(&mut self) {
        self.carrying = false;
        self.carry = CarryProfile::NONE;
    }
}
