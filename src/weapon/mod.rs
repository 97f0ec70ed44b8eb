// Weapon module
//
// This module covers the inventory-facing side of weapons:
// - loadout.rs: quick-select slots linked to inventory items
// - reload.rs: magazine and tick-driven reload drawing ammo from the grid

pub mod loadout;
pub mod reload;

pub use loadout::Loadout;
pub use reload::{ReloadState, Weapon};
