// Inventory system module
//
// This module provides the grid ("Tetris") inventory, including:
// - Sparse grid of rectangular, rotatable, stackable entries
// - Player inventory with weapon loadout and world pickups/drops

pub mod entry;
pub mod error;
pub mod grid;
pub mod player;

// Re-export main types
pub use entry::{EntryId, InventoryEntry};
pub use error::InventoryError;
pub use grid::{GridInventory, RotateOutcome, StackOverflowPolicy};
pub use player::PlayerInventory;
