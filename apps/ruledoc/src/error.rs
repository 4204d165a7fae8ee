//! Error types for configuration, manifest loading, rendering and generation.
//!
//! Validation failures found in rule docs are not errors; they are reported
//! as [`crate::models::Issue`] values and the run continues.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Rendering contract violations. These indicate a caller bug, not bad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render a configs legend for a plugin with no configs")]
    NoConfigs,

    #[error("cannot render a type legend without any rules")]
    NoRules,

    #[error("notice `{notice}` has no content for rule `{rule}`")]
    NoNoticeContent { notice: String, rule: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("missing marker: {0}")]
    MissingMarker(String),

    #[error("marker out of order: `{end}` appears before `{begin}`")]
    MarkersOutOfOrder { begin: String, end: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("unknown {kind} `{value}` (expected one of: {expected})")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid configEmoji entry `{0}` (expected `config,emoji` or `config`)")]
    ConfigEmoji(String),

    #[error("configEmoji references unknown config `{0}`")]
    UnknownConfig(String),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read plugin manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid plugin manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{path}: {source}")]
    Splice { path: PathBuf, source: SpliceError },

    #[error("could not find rule doc for `{rule}`: {path} (pass --init-rule-docs to create it)")]
    MissingRuleDoc { rule: String, path: PathBuf },

    #[error("could not find rule list file: {0}")]
    MissingRuleList(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
