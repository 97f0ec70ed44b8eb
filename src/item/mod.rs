// Item system module
//
// This module provides the item data model, including:
// - Item definitions and properties
// - Item catalog for centralized, read-only storage
// - Item stacks for quantities outside the grid (pickups, drops)

pub mod definition;
pub mod properties;
pub mod registry;
pub mod stack;

// Re-export main types for convenient access
pub use definition::ItemDefinition;
pub use properties::ItemProperties;
pub use registry::{CatalogError, ItemCatalog};
pub use stack::ItemStack;
