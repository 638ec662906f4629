// Card Registry - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod card;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod luhn;
pub mod registry;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use card::{normalize_name, Card};
pub use error::{ImportError, RegistryError};
pub use import::{import_csv, import_reader, ImportReport, RejectedRow};
pub use luhn::is_valid_card_number;
pub use registry::CardRegistry;
pub use validation::{CardRequest, ValidCard, ValidationError, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
