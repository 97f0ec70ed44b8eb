use serde::{Serialize, Deserialize};

/// Different categories of items with type-specific data
///
/// This enum lets ammo, weapons and keys carry their own data while
/// sharing the core `ItemDefinition` structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemProperties {
    /// Basic material (no special behaviour)
    #[default]
    Material,

    /// Ammunition drawn by weapons during reload
    Ammo,

    /// Firearm that can be assigned to a loadout slot
    Weapon {
        /// Item ID of the ammo this weapon draws from the inventory
        ammo_id: String,
        magazine_size: u32,
        /// Seconds between starting a reload and the rounds going in
        reload_seconds: f32,
    },

    /// Opens a specific door or lock
    Key {
        door_id: String,
    },

    /// Used up on use, restoring health
    Consumable {
        heal: f32,
    },
}

impl ItemProperties {
    /// Returns true for items that may sit in a loadout slot
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemProperties::Weapon { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_json() {
        let props: ItemProperties = serde_json::from_str(
            r#"{ "kind": "weapon", "ammo_id": "pistol_ammo", "magazine_size": 12, "reload_seconds": 1.5 }"#,
        )
        .unwrap();

        assert!(props.is_equippable());
        match props {
            ItemProperties::Weapon { ammo_id, magazine_size, .. } => {
                assert_eq!(ammo_id, "pistol_ammo");
                assert_eq!(magazine_size, 12);
            }
            other => panic!("unexpected properties: {:?}", other),
        }
    }
}
