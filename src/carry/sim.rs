//! Minimal rigid body used when no engine is attached
//!
//! `SimBody` integrates linear motion only, with semi-implicit Euler and
//! the usual game-engine damping model `v *= 1 / (1 + dt * damping)`.
//! It is enough to drive the carry controller headless and in tests.

use glam::Vec3;

use super::body::{CollisionMode, DynamicBody};

/// Standard gravity in m/s^2
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct SimBody {
    pub mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub gravity_enabled: bool,
    pub collision_mode: CollisionMode,
    accumulated_force: Vec3,
}

impl SimBody {
    /// Creates a body at rest; mass is clamped to a small positive value
    pub fn new(mass: f32, position: Vec3) -> Self {
        SimBody {
            mass: mass.max(1e-3),
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            linear_damping: 0.05,
            angular_damping: 0.15,
            gravity_enabled: true,
            collision_mode: CollisionMode::Discrete,
            accumulated_force: Vec3::ZERO,
        }
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn with_collision_mode(mut self, mode: CollisionMode) -> Self {
        self.collision_mode = mode;
        self
    }

    /// Force accumulated since the last step
    pub fn pending_force(&self) -> Vec3 {
        self.accumulated_force
    }

    /// Advances one physics step and clears the force accumulator
    pub fn integrate(&mut self, dt: f32, gravity: Vec3) {
        if dt <= 0.0 {
            return;
        }

        let mut acceleration = self.accumulated_force / self.mass;
        if self.gravity_enabled {
            acceleration += gravity;
        }

        self.velocity += acceleration * dt;
        self.velocity *= 1.0 / (1.0 + dt * self.linear_damping);
        self.angular_velocity *= 1.0 / (1.0 + dt * self.angular_damping);
        self.position += self.velocity * dt;

        self.accumulated_force = Vec3::ZERO;
    }
}

impl DynamicBody for SimBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping;
    }

    fn angular_damping(&self) -> f32 {
        self.angular_damping
    }

    fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping;
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn collision_mode(&self) -> CollisionMode {
        self.collision_mode
    }

    fn set_collision_mode(&mut self, mode: CollisionMode) {
        self.collision_mode = mode;
    }

    fn add_force(&mut self, force: Vec3) {
        self.accumulated_force += force;
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_under_gravity() {
        let mut body = SimBody::new(1.0, Vec3::ZERO).with_damping(0.0, 0.0);
        body.integrate(0.5, GRAVITY);

        assert!((body.velocity.y + 4.905).abs() < 1e-4);
        assert!(body.position.y < 0.0);
    }

    #[test]
    fn test_gravity_disabled_stays_put() {
        let mut body = SimBody::new(1.0, Vec3::ONE);
        body.gravity_enabled = false;
        body.integrate(1.0, GRAVITY);

        assert_eq!(body.position, Vec3::ONE);
    }

    #[test]
    fn test_force_is_cleared_after_step() {
        let mut body = SimBody::new(2.0, Vec3::ZERO).with_damping(0.0, 0.0);
        body.gravity_enabled = false;
        body.add_force(Vec3::X * 4.0);
        assert_eq!(body.pending_force(), Vec3::X * 4.0);

        body.integrate(1.0, GRAVITY);
        assert_eq!(body.velocity, Vec3::X * 2.0);
        assert_eq!(body.pending_force(), Vec3::ZERO);
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let mut body = SimBody::new(4.0, Vec3::ZERO);
        body.add_impulse(Vec3::Z * 8.0);

        assert_eq!(body.velocity, Vec3::Z * 2.0);
    }
}
