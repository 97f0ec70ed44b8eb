//! The physical surface of a dynamic body, as seen by the carry controller
//!
//! The host engine owns the actual rigid bodies. The controller only needs
//! the handful of properties below, so engines plug in by implementing
//! [`DynamicBody`] for their body handle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Collision detection mode of a dynamic body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    #[default]
    Discrete,
    Continuous,
    /// Swept against static and dynamic geometry; used while held
    ContinuousDynamic,
    ContinuousSpeculative,
}

/// Read/write access to the properties the carry controller touches
pub trait DynamicBody {
    fn position(&self) -> Vec3;
    fn linear_velocity(&self) -> Vec3;

    fn linear_damping(&self) -> f32;
    fn set_linear_damping(&mut self, damping: f32);

    fn angular_damping(&self) -> f32;
    fn set_angular_damping(&mut self, damping: f32);

    fn gravity_enabled(&self) -> bool;
    fn set_gravity_enabled(&mut self, enabled: bool);

    fn collision_mode(&self) -> CollisionMode;
    fn set_collision_mode(&mut self, mode: CollisionMode);

    /// Accumulates a continuous force for the next physics step
    fn add_force(&mut self, force: Vec3);

    /// Applies an instantaneous change in momentum
    fn add_impulse(&mut self, impulse: Vec3);
}

/// Physical properties captured at grab time and restored on release
///
/// Restoring always uses the captured values, never defaults, so bodies
/// authored with custom damping come back exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSnapshot {
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub gravity_enabled: bool,
    pub collision_mode: CollisionMode,
}

impl PhysicsSnapshot {
    pub fn capture(body: &impl DynamicBody) -> Self {
        PhysicsSnapshot {
            linear_damping: body.linear_damping(),
            angular_damping: body.angular_damping(),
            gravity_enabled: body.gravity_enabled(),
            collision_mode: body.collision_mode(),
        }
    }

    pub fn restore(&self, body: &mut impl DynamicBody) {
        body.set_linear_damping(self.linear_damping);
        body.set_angular_damping(self.angular_damping);
        body.set_gravity_enabled(self.gravity_enabled);
        body.set_collision_mode(self.collision_mode);
    }
}
