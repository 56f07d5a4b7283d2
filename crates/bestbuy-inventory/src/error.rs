//! # Inventory Error Types
//!
//! Failures while loading, validating or saving the inventory configuration,
//! and while turning it into a `Store`.

use bestbuy_core::CoreError;
use thiserror::Error;

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    // =========================================================================
    // File Errors
    // =========================================================================
    /// Reading or writing the config file failed.
    #[error("Inventory file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse inventory: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written back as TOML.
    #[error("Failed to serialize inventory: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No explicit path, no env var, and no platform config directory.
    #[error("No inventory path available")]
    NoConfigPath,

    // =========================================================================
    // Content Errors
    // =========================================================================
    /// Structurally valid TOML with inconsistent content.
    #[error("Invalid inventory configuration: {0}")]
    InvalidConfig(String),

    /// A product names a promotion that is not declared.
    #[error("Product '{product}' references unknown promotion '{promotion}'")]
    UnknownPromotion { product: String, promotion: String },

    /// A product or promotion entry failed domain validation.
    #[error("Invalid entry '{name}': {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: CoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestbuy_core::ValidationError;

    #[test]
    fn test_error_messages() {
        let err = InventoryError::UnknownPromotion {
            product: "Google Pixel 7".to_string(),
            promotion: "Half Off".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Product 'Google Pixel 7' references unknown promotion 'Half Off'"
        );

        let err = InventoryError::InvalidEntry {
            name: "Broken".to_string(),
            source: ValidationError::MustNotBeNegative {
                field: "price".to_string(),
            }
            .into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid entry 'Broken': Invalid argument: price cannot be negative"
        );
    }
}
