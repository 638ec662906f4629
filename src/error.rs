// Error types for the card registry and the CSV import

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A card already exists for this holder (names compared trimmed, case-insensitive)
    #[error("A card with that name already exists: {name}")]
    DuplicateName { name: String },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
}
