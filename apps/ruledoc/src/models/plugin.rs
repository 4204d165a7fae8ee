//! Plugin manifest: the rule and config records exported by a lint plugin.
//!
//! The manifest is a JSON dump of the plugin object, e.g.
//!
//! ```json
//! {
//!   "name": "eslint-plugin-foo",
//!   "rules": { "no-bar": { "meta": { "fixable": "code" } } },
//!   "configs": { "recommended": { "rules": { "foo/no-bar": "error" } } }
//! }
//! ```
//!
//! Rule records are kept as raw JSON so entries without standard metadata can
//! be skipped during normalization instead of failing the whole load.

use crate::error::ManifestError;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Clone)]
/// Top-level plugin manifest.
pub struct Plugin {
    /// Package name, used to derive the rule prefix.
    #[serde(default)]
    pub name: Option<String>,
    /// Rule records in plugin enumeration order.
    #[serde(default)]
    pub rules: Map<String, Json>,
    /// Config records keyed by config name.
    #[serde(default)]
    pub configs: BTreeMap<String, Json>,
}

impl Plugin {
    /// Load and parse a manifest file.
    #[tracing::instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Plugin, ManifestError> {
        let s = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let plugin: Plugin = serde_json::from_str(&s).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            rules = plugin.rules.len(),
            configs = plugin.configs.len(),
            "Loaded plugin manifest"
        );
        Ok(plugin)
    }

    /// Rule prefix used in config keys and titles (`foo` for `foo/no-bar`).
    pub fn prefix(&self) -> String {
        self.name
            .as_deref()
            .map(plugin_prefix_from_name)
            .unwrap_or_default()
    }

    /// Every `rules` map a config contributes: the config's own map, maps in
    /// legacy `overrides`, and maps of flat-config arrays.
    pub fn config_rule_maps<'a>(&'a self, config: &str) -> Vec<&'a Map<String, Json>> {
        let mut out = Vec::new();
        if let Some(cfg) = self.configs.get(config) {
            collect_rule_maps(cfg, &mut out);
        }
        out
    }
}

fn collect_rule_maps<'a>(value: &'a Json, out: &mut Vec<&'a Map<String, Json>>) {
    match value {
        Json::Object(obj) => {
            if let Some(Json::Object(rules)) = obj.get("rules") {
                out.push(rules);
            }
            if let Some(Json::Array(overrides)) = obj.get("overrides") {
                for ov in overrides {
                    collect_rule_maps(ov, out);
                }
            }
        }
        Json::Array(items) => {
            for it in items {
                collect_rule_maps(it, out);
            }
        }
        _ => {}
    }
}

/// Derive the rule prefix from a plugin package name.
///
/// - `eslint-plugin-foo` → `foo`
/// - `@scope/eslint-plugin` → `@scope`
/// - `@scope/eslint-plugin-foo` → `@scope/foo`
pub fn plugin_prefix_from_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('@') {
        let (scope, pkg) = rest.split_once('/').unwrap_or((rest, ""));
        return match pkg {
            "eslint-plugin" | "" => format!("@{}", scope),
            p => match p.strip_prefix("eslint-plugin-") {
                Some(short) => format!("@{}/{}", scope, short),
                None => format!("@{}/{}", scope, p),
            },
        };
    }
    name.strip_prefix("eslint-plugin-")
        .unwrap_or(name)
        .to_string()
}
