// Physical carry module
//
// This module lets the player pick up and carry dynamic bodies, including:
// - The body interface the controller drives and the snapshot it restores
// - Grabbable objects with weight classes and carry profiles
// - The spring-damper carry controller and its movement handshake
// - A small rigid body for running without an engine

pub mod body;
pub mod controller;
pub mod grabbable;
pub mod movement;
pub mod sim;

pub use body::{CollisionMode, DynamicBody, PhysicsSnapshot};
pub use controller::{CarryController, CarryState, ReleaseReason};
pub use grabbable::{CarryProfile, Grabbable, GrabbableId, GrabbableSet, WeightClass};
pub use movement::CarryMovement;
pub use sim::{GRAVITY, SimBody};
