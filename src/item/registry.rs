use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::definition::ItemDefinition;

/// Errors raised while building the item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item '{0}' already registered")]
    Duplicate(String),

    #[error("Item '{id}' has an empty footprint ({width}x{height})")]
    EmptyFootprint { id: String, width: u32, height: u32 },

    #[error("Item '{0}' has a max stack size of 0")]
    ZeroStackSize(String),

    #[error("Could not read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk layout of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<ItemDefinition>,
}

/// Central, read-only store of all item definitions
///
/// This is the single source of truth for what items exist. Inventories
/// hold `Arc` clones of the definitions handed out here and match stacks
/// by `id`.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl ItemCatalog {
    /// Creates a new empty catalog
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
        }
    }

    /// Registers a new item definition
    ///
    /// Rejects duplicate IDs and definitions the grid could never hold
    /// (zero-sized footprint or zero stack size).
    pub fn register(&mut self, item: ItemDefinition) -> Result<Arc<ItemDefinition>, CatalogError> {
        if self.items.contains_key(&item.id) {
            return Err(CatalogError::Duplicate(item.id));
        }
        if item.width == 0 || item.height == 0 {
            return Err(CatalogError::EmptyFootprint {
                id: item.id,
                width: item.width,
                height: item.height,
            });
        }
        if item.max_stack_size == 0 {
            return Err(CatalogError::ZeroStackSize(item.id));
        }

        let item = Arc::new(item);
        self.items.insert(item.id.clone(), Arc::clone(&item));
        Ok(item)
    }

    /// Gets an item definition by ID
    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    /// Returns true if an item with this ID exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all definitions in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.items.values()
    }

    /// Parses a catalog from JSON of the form `{ "items": [ ... ] }`
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for item in file.items {
            catalog.register(item)?;
        }
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        log::info!("Loaded {} item definitions", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "items": [
            { "id": "pistol_ammo", "name": "9mm Rounds", "stackable": true, "max_stack_size": 30,
              "properties": { "kind": "ammo" } },
            { "id": "shotgun", "name": "Shotgun", "width": 3, "height": 1,
              "properties": { "kind": "weapon", "ammo_id": "shells", "magazine_size": 6, "reload_seconds": 2.0 } }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = ItemCatalog::from_json_str(CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.exists("shotgun"));
        assert_eq!(catalog.get("shotgun").unwrap().footprint(), (3, 1));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ItemCatalog::new();
        catalog.register(ItemDefinition::new("pipe", "Pipe")).unwrap();

        let result = catalog.register(ItemDefinition::new("pipe", "Other Pipe"));
        assert!(matches!(result, Err(CatalogError::Duplicate(id)) if id == "pipe"));
        assert_eq!(catalog.get("pipe").unwrap().name, "Pipe");
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        let mut catalog = ItemCatalog::new();

        let flat = ItemDefinition::new("flat", "Flat").with_footprint(0, 2);
        assert!(matches!(catalog.register(flat), Err(CatalogError::EmptyFootprint { .. })));

        let mut bad_stack = ItemDefinition::new("bad", "Bad");
        bad_stack.max_stack_size = 0;
        assert!(matches!(catalog.register(bad_stack), Err(CatalogError::ZeroStackSize(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_shared_definition() {
        let mut catalog = ItemCatalog::new();
        let registered = catalog.register(ItemDefinition::new("pipe", "Pipe")).unwrap();
        let fetched = catalog.get("pipe").unwrap();

        assert!(Arc::ptr_eq(&registered, &fetched));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("holdfast-no-such-catalog.json");

        assert!(matches!(ItemCatalog::load_from_file(&path), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("holdfast-items-{}.json", std::process::id()));
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = ItemCatalog::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.len(), 2);
    }
}
