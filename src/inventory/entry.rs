use std::fmt;
use std::sync::Arc;

use crate::item::ItemDefinition;

/// Stable handle to one entry of a `GridInventory`
///
/// IDs are never reused within an inventory, so a stale handle held by
/// the presentation layer simply stops matching once its entry is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed item in the grid
///
/// Only the owning `GridInventory` can move, rotate or restack an entry,
/// which keeps the no-overlap invariant in one place.
#[derive(Debug, Clone)]
pub struct InventoryEntry {
    id: EntryId,
    definition: Arc<ItemDefinition>,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) rotated: bool,
    pub(crate) stack_size: u32,
}

impl InventoryEntry {
    pub(crate) fn new(id: EntryId, definition: Arc<ItemDefinition>, x: i32, y: i32, stack_size: u32) -> Self {
        InventoryEntry {
            id,
            definition,
            x,
            y,
            rotated: false,
            stack_size,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    pub fn item_id(&self) -> &str {
        &self.definition.id
    }

    /// Top-left cell as (column, row)
    pub fn anchor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    /// Effective width in cells (height of the definition when rotated)
    pub fn width(&self) -> u32 {
        if self.rotated { self.definition.height } else { self.definition.width }
    }

    /// Effective height in cells (width of the definition when rotated)
    pub fn height(&self) -> u32 {
        if self.rotated { self.definition.width } else { self.definition.height }
    }

    /// Room left before the stack reaches `max_stack_size`
    pub fn space_left(&self) -> u32 {
        self.definition.max_stack_size.saturating_sub(self.stack_size)
    }

    /// Half-open overlap test against the rectangle `[x, x+w) x [y, y+h)`
    pub(crate) fn overlaps(&self, x: i64, y: i64, width: i64, height: i64) -> bool {
        let (ex, ey) = (i64::from(self.x), i64::from(self.y));
        let (ew, eh) = (i64::from(self.width()), i64::from(self.height()));

        let overlap_x = x < ex + ew && x + width > ex;
        let overlap_y = y < ey + eh && y + height > ey;

        overlap_x && overlap_y
    }
}
