//! Shared types, error model, and configuration for the docset builder.
//!
//! This crate is the foundation depended on by all other docset builder crates.
//! It provides:
//! - [`DocsetError`] — the unified error type
//! - Domain types ([`CatalogEntry`], [`EntryType`], [`FormatRule`], [`RuleOp`])
//! - The anchor [`slug`] utility
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod slug;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AnchorConfig, AppConfig, FormatConfig, StorageConfig, config_dir, config_file_path,
    init_config, init_config_in, load_config, load_config_from, validate_anchors,
};
pub use error::{DocsetError, Result};
pub use slug::slugify;
pub use types::{CatalogEntry, EntryType, FormatRule, INDEX_FILE_NAME, RuleOp, base_file_name};
