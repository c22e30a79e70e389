//! Shared types, error model, and configuration for ATOC.
//!
//! This crate is the foundation depended on by all other ATOC crates.
//! It provides:
//! - [`AtocError`] — the unified error type
//! - Domain types ([`Feature`], [`GeometryKind`], [`Classification`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{AtocError, Result};
pub use types::{
    Classification, DEFAULT_CLASSIFICATION, DEFAULT_DOCUMENT_NAME, DOCUMENT_DESCRIPTION, Feature,
    GeometryKind,
};
