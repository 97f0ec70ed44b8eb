use std::sync::Arc;

use super::entry::EntryId;
use super::grid::GridInventory;
use crate::config::InventoryConfig;
use crate::item::{ItemDefinition, ItemProperties, ItemStack};
use crate::weapon::Loadout;

/// Player-specific inventory with weapon loadout
///
/// This wraps the core `GridInventory` with the player-facing operations:
/// picking up world items, dropping entries back into the world, and
/// keeping the loadout slots consistent with what is actually carried.
#[derive(Debug, Clone)]
pub struct PlayerInventory {
    pub grid: GridInventory,
    pub loadout: Loadout,
}

impl PlayerInventory {
    pub fn new(grid: GridInventory, loadout: Loadout) -> Self {
        PlayerInventory { grid, loadout }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(GridInventory::from_config(config), Loadout::new(config.loadout_slots))
    }

    /// Picks up `quantity` units of an item lying in the world
    ///
    /// Returns false when it does not fit, in which case the pickup should
    /// stay in the world. Units merged into existing stacks before the
    /// failure are kept (see `GridInventory::add_item`).
    pub fn pickup(&mut self, definition: &Arc<ItemDefinition>, quantity: u32) -> bool {
        let picked = self.grid.add_item(definition, quantity.max(1));
        if picked {
            log::info!("Picked up {} x{}", definition.name, quantity.max(1));
        }
        picked
    }

    /// Drops an entry into the world
    ///
    /// Removes it from the grid and unlinks it from the loadout. The
    /// returned stack carries every unit the entry held, so a non-stackable
    /// entry picked up as several units comes back out whole; the spawn
    /// layer turns it into a world pickup.
    pub fn drop_item(&mut self, id: EntryId) -> Option<ItemStack> {
        let entry = self.grid.remove_item(id)?;
        let definition = entry.definition();

        // Another entry of the same weapon keeps the slot valid
        if !self.grid.contains_item(&definition.id) {
            self.loadout.on_item_dropped(&definition.id);
        }

        let quantity = entry.stack_size();
        log::info!("Dropped {} x{}", definition.name, quantity);
        Some(ItemStack::new(definition.id.clone(), quantity))
    }

    /// Checks if the player has at least `quantity` of an item
    pub fn has_item(&self, item_id: &str, quantity: u32) -> bool {
        self.grid.count_item(item_id) >= quantity
    }

    /// True when a carried key opens `door_id`
    pub fn has_key_for(&self, door_id: &str) -> bool {
        self.grid.entries().iter().any(|entry| {
            matches!(&entry.definition().properties, ItemProperties::Key { door_id: opens } if opens == door_id)
        })
    }

    /// Uses one unit of a consumable and returns the health it restores
    ///
    /// None when the item is not carried or is not a consumable; nothing is
    /// removed in that case.
    pub fn use_consumable(&mut self, item_id: &str) -> Option<f32> {
        let entry = self.grid.entries().iter().find(|entry| entry.item_id() == item_id)?;
        let heal = match &entry.definition().properties {
            ItemProperties::Consumable { heal } => *heal,
            _ => return None,
        };

        self.grid.consume_item(item_id, 1);
        log::info!("Used {} (+{} health)", item_id, heal);
        Some(heal)
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::from_config(&InventoryConfig::default())
    }
}
