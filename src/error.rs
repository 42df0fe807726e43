//! Error types for the card generator

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for application entry points
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog content was not valid JSON for the activity schema
    #[error("Invalid catalog data for '{lang}': {source}")]
    Parse {
        lang: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records in one catalog share an identifier
    #[error("Duplicate activity id {id} in catalog '{lang}'")]
    DuplicateId { lang: String, id: u32 },
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported language: {0} (expected one of en, el, es, sv, it)")]
    UnsupportedLanguage(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from a single card export
#[derive(Error, Debug)]
pub enum ExportError {
    /// SVG could not be parsed or rendered into pixels
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Pixels could not be encoded
    #[error("Encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Encoded bytes could not be written
    #[error("Saving {filename} failed: {source}")]
    Save {
        filename: String,
        #[source]
        source: io::Error,
    },
}

/// Top-level errors surfaced when the program exits
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("Logger setup failed: {0}")]
    Logger(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_message() {
        let err = ConfigError::UnsupportedLanguage("fr".to_string());
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn test_app_error_from_config() {
        let err: AppError = ConfigError::Invalid("scale".to_string()).into();
        assert_eq!(err.to_string(), "Invalid configuration: scale");
    }
}
