use thiserror::Error;

/// Errors that can occur during inventory operations
///
/// Ordinary outcomes such as a full grid or a short stack are not errors;
/// those come back as `bool`/amount results. This type only covers
/// requests that name something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Item ID doesn't exist in the catalog
    #[error("Invalid item ID: {0}")]
    InvalidItem(String),
}
