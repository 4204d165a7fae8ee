//! ruledoc core library.
//!
//! This crate exposes programmatic APIs for generating lint rule docs and
//! rules lists from a plugin manifest, and for checking them for drift.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Plugin manifest, closed vocabularies and report structs.
//! - `normalize`: Raw rule records to `RuleDetails`.
//! - `configs`: Config membership per severity tier and config emojis.
//! - `notices` / `legend` / `table`: Header and rules list rendering.
//! - `splice`: Marker-delimited document updates.
//! - `validate`: Rule doc content checks.
//! - `generate`: The orchestrator tying the above together.
//! - `output`: Human/JSON printers for reports.
pub mod cli;
pub mod config;
pub mod configs;
pub mod emoji;
pub mod error;
pub mod generate;
pub mod legend;
pub mod models;
pub mod normalize;
pub mod notices;
pub mod output;
pub mod schema;
pub mod splice;
pub mod table;
pub mod validate;
