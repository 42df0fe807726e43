//! Data models for the card generator
//!
//! This module contains the core data structures:
//! - Activity records loaded from the catalog
//! - The supported language set
//! - Enums for filter and view state

pub mod activity;
pub mod enums;
pub mod language;

// Re-exports for convenient access
pub use activity::{Activity, find_activity};
pub use enums::{BucketFilter, Focus, InputMode};
pub use language::Language;
