use crate::inventory::GridInventory;
use crate::item::ItemDefinition;

/// Quick-select weapon slots
///
/// Each slot links to an item by ID; the item itself stays in the grid.
/// At most one slot is active at a time (`None` = bare hands).
#[derive(Debug, Clone)]
pub struct Loadout {
    slots: Vec<Option<String>>,
    active: Option<usize>,
}

impl Loadout {
    /// Creates a loadout with `slot_count` empty slots, nothing equipped
    pub fn new(slot_count: usize) -> Self {
        Loadout {
            slots: vec![None; slot_count],
            active: None,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Item ID linked to a slot
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_deref()
    }

    /// Index of the equipped slot, `None` when bare-handed
    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    /// Item ID of the equipped weapon
    pub fn active_item(&self) -> Option<&str> {
        self.slot(self.active?)
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Slot holding `item_id`, if any
    pub fn slot_of(&self, item_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_deref() == Some(item_id))
    }

    /// Links a weapon to a slot
    ///
    /// A weapon occupies one slot at most, so it is unlinked from any slot
    /// it was already in. Overwriting the active slot holsters. Returns
    /// false for out-of-range slots and non-weapon items.
    pub fn assign(&mut self, item: &ItemDefinition, slot: usize) -> bool {
        if slot >= self.slots.len() {
            return false;
        }
        if !item.properties.is_equippable() {
            log::warn!("{} is not a weapon", item.id);
            return false;
        }

        let overwrites_active =
            self.active == Some(slot) && self.slot(slot) != Some(item.id.as_str());

        for (index, linked) in self.slots.iter_mut().enumerate() {
            if linked.as_deref() == Some(item.id.as_str()) {
                // Moving the equipped weapon drags the active index along
                if self.active == Some(index) {
                    self.active = Some(slot);
                }
                *linked = None;
            }
        }

        if overwrites_active {
            self.active = None;
        }

        self.slots[slot] = Some(item.id.clone());
        log::debug!("{} assigned to slot {}", item.id, slot + 1);
        true
    }

    /// Equips a slot (or bare hands with `None`)
    ///
    /// Selecting the active slot again holsters. Empty slots and slots
    /// whose item is no longer in `inventory` also fall back to bare hands.
    /// Returns the slot that ends up active.
    pub fn equip(&mut self, slot: Option<usize>, inventory: &GridInventory) -> Option<usize> {
        self.active = match slot {
            Some(index) if self.active == Some(index) => None,
            Some(index) => match self.slot(index) {
                Some(item_id) if inventory.contains_item(item_id) => Some(index),
                _ => None,
            },
            None => None,
        };
        self.active
    }

    /// Unlinks every slot pointing at a dropped item, holstering if needed
    pub fn on_item_dropped(&mut self, item_id: &str) {
        for (index, linked) in self.slots.iter_mut().enumerate() {
            if linked.as_deref() == Some(item_id) {
                if self.active == Some(index) {
                    self.active = None;
                }
                *linked = None;
                log::debug!("Slot {} cleared, {} was dropped", index + 1, item_id);
            }
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(3)
    }
}
