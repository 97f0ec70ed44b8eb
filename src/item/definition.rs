use serde::{Serialize, Deserialize};
use super::properties::ItemProperties;

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all inventory entries. Definitions are owned by the
/// `ItemCatalog` and handed out as `Arc<ItemDefinition>`; nothing
/// in the inventory ever mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups and stack matching)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Description shown in the details panel
    #[serde(default)]
    pub description: String,

    /// Path to the 2D inventory icon
    #[serde(default)]
    pub icon_path: String,

    /// Spawnable world object created when the item is dropped
    #[serde(default)]
    pub prefab_path: Option<String>,

    /// Footprint width in grid cells (columns)
    #[serde(default = "one")]
    pub width: u32,

    /// Footprint height in grid cells (rows)
    #[serde(default = "one")]
    pub height: u32,

    /// Whether several units share one grid entry
    #[serde(default)]
    pub stackable: bool,

    /// Maximum stack size (only meaningful when `stackable`)
    #[serde(default = "one")]
    pub max_stack_size: u32,

    /// Item-specific behaviour
    #[serde(default)]
    pub properties: ItemProperties,
}

fn one() -> u32 {
    1
}

impl ItemDefinition {
    /// Creates a 1x1, non-stackable material definition
    ///
    /// Use the `with_*` helpers to shape it further:
    ///
    /// ```
    /// use holdfast::item::{ItemDefinition, ItemProperties};
    ///
    /// let ammo = ItemDefinition::new("pistol_ammo", "9mm Rounds")
    ///     .with_footprint(1, 1)
    ///     .stackable(30)
    ///     .with_properties(ItemProperties::Ammo);
    /// assert!(ammo.stackable);
    /// assert_eq!(ammo.max_stack_size, 30);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon_path: String::new(),
            prefab_path: None,
            width: 1,
            height: 1,
            stackable: false,
            max_stack_size: 1,
            properties: ItemProperties::Material,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = icon_path.into();
        self
    }

    pub fn with_prefab(mut self, prefab_path: impl Into<String>) -> Self {
        self.prefab_path = Some(prefab_path.into());
        self
    }

    /// Sets the unrotated footprint in grid cells
    pub fn with_footprint(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Marks the item stackable up to `max_stack_size` units per entry
    pub fn stackable(mut self, max_stack_size: u32) -> Self {
        self.stackable = true;
        self.max_stack_size = max_stack_size;
        self
    }

    pub fn with_properties(mut self, properties: ItemProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Unrotated footprint as (width, height)
    pub fn footprint(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true if entries of this item can take units of `other`
    ///
    /// Whether there is room left is a property of the entry, not the item.
    pub fn can_stack_with(&self, other: &ItemDefinition) -> bool {
        self.id == other.id && self.stackable
    }
}
