//! Shared types, error model, and configuration for Interplayer.
//!
//! This crate is the foundation depended on by all other Interplayer crates.
//! It provides:
//! - [`InterplayerError`] — the unified error type
//! - Domain types ([`Entry`], [`KnowledgeBase`], [`VisitRecord`], [`RunId`])
//! - Configuration ([`AppConfig`], [`WalkConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, NotationConfig, WalkConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{InterplayerError, Result};
pub use types::{
    Entry, HeaderPolicy, Indent, KnowledgeBase, RunId, VisitRecord, VisitStatus, WalkSummary,
};
