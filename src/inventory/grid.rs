use std::sync::Arc;

use serde::{Serialize, Deserialize};

use super::entry::{EntryId, InventoryEntry};
use super::error::InventoryError;
use crate::config::InventoryConfig;
use crate::item::{ItemCatalog, ItemDefinition};

/// How `add_item` sizes the new stack it creates for leftover units
///
/// `Preserve` matches the shipped game: the whole remainder lands in one
/// new entry, even past `max_stack_size`. `Split` cuts the remainder into
/// stacks of at most `max_stack_size` (1 for non-stackables) and only
/// commits if every one of them fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackOverflowPolicy {
    #[default]
    Preserve,
    Split,
}

/// Result of `GridInventory::rotate_item`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Rotated footprint fits at the current anchor
    InPlace,
    /// Rotated footprint only fits elsewhere; the entry moved there
    Relocated { x: i32, y: i32 },
    /// No valid anchor for the rotated footprint; the entry is untouched
    Reverted,
}

/// "Tetris" inventory: items with rectangular footprints on a grid
///
/// The grid has a fixed number of columns and `ceil(capacity / columns)`
/// rows. Storage is sparse: only the placed entries are kept, in insertion
/// order, and cell occupancy is derived from their rectangles.
///
/// # Invariants
///
/// - No two entries overlap.
/// - Every entry lies inside `[0, columns) x [0, rows)`.
///
/// Both are enforced by routing every placement through
/// [`GridInventory::can_place_item_at`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use holdfast::inventory::GridInventory;
/// use holdfast::item::ItemDefinition;
///
/// let mut grid = GridInventory::new(4, 8);
/// let ammo = Arc::new(ItemDefinition::new("ammo", "Ammo").with_footprint(2, 1).stackable(30));
///
/// assert!(grid.add_item(&ammo, 5));
/// assert!(grid.add_item(&ammo, 10));
/// assert_eq!(grid.len(), 1);
/// assert_eq!(grid.count_item("ammo"), 15);
/// ```
#[derive(Debug, Clone)]
pub struct GridInventory {
    columns: u32,
    capacity: u32,
    policy: StackOverflowPolicy,
    entries: Vec<InventoryEntry>,
    next_id: u64,
}

impl GridInventory {
    /// Creates an empty grid; `columns` is clamped to at least 1
    pub fn new(columns: u32, capacity: u32) -> Self {
        GridInventory {
            columns: columns.max(1),
            capacity,
            policy: StackOverflowPolicy::default(),
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_policy(mut self, policy: StackOverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.columns, config.capacity).with_policy(config.overflow_policy)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Logical row count: `ceil(capacity / columns)`
    pub fn rows(&self) -> u32 {
        self.capacity.div_ceil(self.columns)
    }

    pub fn policy(&self) -> StackOverflowPolicy {
        self.policy
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units of an item across all its stacks
    ///
    /// `add_item` keeps every item's total within `u32`; the sum saturates
    /// regardless.
    pub fn count_item(&self, item_id: &str) -> u32 {
        let total: u64 = self
            .entries
            .iter()
            .filter(|entry| entry.item_id() == item_id)
            .map(|entry| u64::from(entry.stack_size()))
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.item_id() == item_id)
    }

    /// Checks whether a `width x height` rectangle anchored at `(x, y)` fits
    ///
    /// Returns false for negative anchors, empty rectangles, rectangles that
    /// leave the grid, and rectangles overlapping any entry other than
    /// `ignore`. Overlap is tested on half-open intervals, so entries that
    /// merely touch do not collide.
    ///
    /// This is the only placement predicate: automatic placement, drag and
    /// drop, and rotation all go through it.
    pub fn can_place_item_at(
        &self,
        width: u32,
        height: u32,
        x: i32,
        y: i32,
        ignore: Option<EntryId>,
    ) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if x < 0 || y < 0 {
            return false;
        }

        let (x, y) = (i64::from(x), i64::from(y));
        let (width, height) = (i64::from(width), i64::from(height));

        if x + width > i64::from(self.columns) || y + height > i64::from(self.rows()) {
            return false;
        }

        !self
            .entries
            .iter()
            .filter(|entry| Some(entry.id()) != ignore)
            .any(|entry| entry.overlaps(x, y, width, height))
    }

    /// First anchor in row-major order where the rectangle fits
    pub fn find_free_anchor(&self, width: u32, height: u32) -> Option<(i32, i32)> {
        self.find_free_anchor_ignoring(width, height, None)
    }

    fn find_free_anchor_ignoring(
        &self,
        width: u32,
        height: u32,
        ignore: Option<EntryId>,
    ) -> Option<(i32, i32)> {
        let rows = i32::try_from(self.rows()).unwrap_or(i32::MAX);
        let columns = i32::try_from(self.columns).unwrap_or(i32::MAX);

        for y in 0..rows {
            for x in 0..columns {
                if self.can_place_item_at(width, height, x, y, ignore) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Adds `amount` units of an item
    ///
    /// # Strategy
    /// 1. Stackable items top up existing under-full stacks, oldest first
    /// 2. Any remainder becomes a new entry at the first free anchor
    ///    (row-major, unrotated footprint), sized by the overflow policy
    /// 3. Returns false when the remainder has nowhere to go
    ///
    /// Units already merged into existing stacks in step 1 stay there
    /// even when step 2 fails. Adding 0 units is a no-op that succeeds.
    /// An add that would take the item's total past `u32::MAX` is refused
    /// outright.
    pub fn add_item(&mut self, definition: &Arc<ItemDefinition>, amount: u32) -> bool {
        if amount == 0 {
            return true;
        }

        let held = u64::from(self.count_item(&definition.id));
        if held + u64::from(amount) > u64::from(u32::MAX) {
            log::debug!("Refusing {} x{}, already holding {}", definition.id, amount, held);
            return false;
        }

        let mut remaining = amount;

        // Phase 1: top up existing stacks
        if definition.stackable {
            for entry in self.entries.iter_mut() {
                if !entry.definition().can_stack_with(definition) || entry.space_left() == 0 {
                    continue;
                }

                let to_add = entry.space_left().min(remaining);
                entry.stack_size += to_add;
                remaining -= to_add;

                if remaining == 0 {
                    log::debug!("Stacked {} x{}", definition.id, amount);
                    return true;
                }
            }
        }

        // Phase 2: place the remainder
        let placed = match self.policy {
            StackOverflowPolicy::Preserve => self.place_new_stack(definition, remaining).is_some(),
            StackOverflowPolicy::Split => self.place_split_stacks(definition, remaining),
        };

        if placed {
            log::debug!("Added {} x{}", definition.id, amount);
        } else {
            log::debug!(
                "No room for {} x{} ({} merged into existing stacks)",
                definition.id,
                remaining,
                amount - remaining
            );
        }
        placed
    }

    /// Looks the item up in the catalog, then adds it
    pub fn add_item_by_id(
        &mut self,
        catalog: &ItemCatalog,
        item_id: &str,
        amount: u32,
    ) -> Result<bool, InventoryError> {
        let definition = catalog
            .get(item_id)
            .ok_or_else(|| InventoryError::InvalidItem(item_id.to_string()))?;

        Ok(self.add_item(&definition, amount))
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn place_new_stack(&mut self, definition: &Arc<ItemDefinition>, stack_size: u32) -> Option<EntryId> {
        let (width, height) = definition.footprint();
        let (x, y) = self.find_free_anchor(width, height)?;

        let id = self.allocate_id();
        self.entries
            .push(InventoryEntry::new(id, Arc::clone(definition), x, y, stack_size));
        Some(id)
    }

    fn place_split_stacks(&mut self, definition: &Arc<ItemDefinition>, amount: u32) -> bool {
        let per_stack = if definition.stackable {
            definition.max_stack_size.max(1)
        } else {
            1
        };
        let (checkpoint_len, checkpoint_id) = (self.entries.len(), self.next_id);

        let mut remaining = amount;
        while remaining > 0 {
            let stack_size = remaining.min(per_stack);
            if self.place_new_stack(definition, stack_size).is_none() {
                // All-or-nothing: drop the stacks placed by this call
                self.entries.truncate(checkpoint_len);
                self.next_id = checkpoint_id;
                return false;
            }
            remaining -= stack_size;
        }
        true
    }

    /// Removes up to `amount_needed` units of an item
    ///
    /// Draws from the most recently added stacks first and deletes stacks
    /// that run empty. Returns how many units were actually removed, which
    /// is less than requested when stock runs short.
    pub fn consume_item(&mut self, item_id: &str, amount_needed: u32) -> u32 {
        let mut consumed = 0;
        let mut index = self.entries.len();

        while index > 0 && consumed < amount_needed {
            index -= 1;

            let entry = &mut self.entries[index];
            if entry.item_id() != item_id {
                continue;
            }

            let take = (amount_needed - consumed).min(entry.stack_size);
            entry.stack_size -= take;
            consumed += take;

            if entry.stack_size == 0 {
                self.entries.remove(index);
            }
        }

        if consumed < amount_needed {
            log::debug!("Consumed {} of {} {} requested", consumed, amount_needed, item_id);
        }
        consumed
    }

    /// Removes an entry; returns None if it is not in this grid
    pub fn remove_item(&mut self, id: EntryId) -> Option<InventoryEntry> {
        let index = self.index_of(id)?;
        Some(self.entries.remove(index))
    }

    /// Moves an entry to `(x, y)` with the given orientation
    ///
    /// This is the end of a drag-and-drop: the anchor and the rotation
    /// are committed together, or not at all.
    pub fn place_item(&mut self, id: EntryId, x: i32, y: i32, rotated: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let entry = &self.entries[index];
        let (width, height) = if rotated == entry.rotated {
            (entry.width(), entry.height())
        } else {
            (entry.height(), entry.width())
        };

        if !self.can_place_item_at(width, height, x, y, Some(id)) {
            return false;
        }

        let entry = &mut self.entries[index];
        entry.x = x;
        entry.y = y;
        entry.rotated = rotated;
        true
    }

    /// Moves an entry to `(x, y)` keeping its orientation
    pub fn move_item(&mut self, id: EntryId, x: i32, y: i32) -> bool {
        match self.get(id) {
            Some(entry) => {
                let rotated = entry.rotated;
                self.place_item(id, x, y, rotated)
            }
            None => false,
        }
    }

    /// Toggles an entry's rotation
    ///
    /// Keeps the current anchor when the rotated footprint fits there,
    /// otherwise relocates to the first free anchor. When neither works the
    /// entry is left exactly as it was. Returns None for unknown entries.
    pub fn rotate_item(&mut self, id: EntryId) -> Option<RotateOutcome> {
        let index = self.index_of(id)?;

        let entry = &self.entries[index];
        let (x, y) = entry.anchor();
        let (width, height) = (entry.height(), entry.width());

        let outcome = if self.can_place_item_at(width, height, x, y, Some(id)) {
            RotateOutcome::InPlace
        } else if let Some((new_x, new_y)) = self.find_free_anchor_ignoring(width, height, Some(id)) {
            RotateOutcome::Relocated { x: new_x, y: new_y }
        } else {
            return Some(RotateOutcome::Reverted);
        };

        let entry = &mut self.entries[index];
        entry.rotated = !entry.rotated;
        if let RotateOutcome::Relocated { x, y } = outcome {
            entry.x = x;
            entry.y = y;
        }
        Some(outcome)
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }
}
