use serde::{Serialize, Deserialize};

/// A quantity of one item type outside the grid
///
/// Used for world pickups and for what comes out of the inventory when
/// an entry is dropped. The spawn layer turns it back into a world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// ID of the item definition in the catalog
    pub item_id: String,

    /// How many units
    pub quantity: u32,
}

impl ItemStack {
    /// Creates a new item stack
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        ItemStack {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Returns true if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
