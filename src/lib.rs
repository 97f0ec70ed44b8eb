// Holdfast gameplay systems
//
// - item: item definitions and the read-only catalog
// - inventory: grid ("Tetris") inventory and the player wrapper
// - weapon: loadout slots and magazine reloads
// - carry: spring-damper physical carrying
// - locomotion: speeds, sprint and stamina
// - surface: surface lookup for footsteps and impacts
// - config: tuning loaded from JSON
// - timer: tick-driven phase timers for timed sequences

pub mod carry;
pub mod config;
pub mod inventory;
pub mod item;
pub mod locomotion;
pub mod surface;
pub mod timer;
pub mod weapon;
