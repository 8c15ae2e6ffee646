//! Shared types, error model, and configuration for moduledoc.
//!
//! This crate is the foundation depended on by all other moduledoc crates.
//! It provides:
//! - [`ModuleDocError`] — the unified error type
//! - Domain types ([`ModuleDescriptor`], [`ModuleGroups`], [`Category`], [`RenderedPages`])
//! - Configuration ([`DocConfig`], [`SiteConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, DocConfig, OutputConfig, SiteConfig, init_config, load_config,
    load_config_from, resolve_config_path, user_config_path,
};
pub use error::{ModuleDocError, Result};
pub use types::{Category, ModuleDescriptor, ModuleGroups, RenderedPages, UNCATEGORIZED};
