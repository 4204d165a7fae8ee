//! Config membership and config emojis.
//!
//! Membership answers "which configs set rule X to tier Y". It is derived
//! once from the manifest configs and never stored on `RuleDetails`.

use crate::emoji;
use crate::error::ConfigError;
use crate::models::plugin::Plugin;
use crate::models::tags::Severity;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
/// Rule → severity tier → config names (sorted), ignoring `ignore_config`.
pub struct ConfigMembership {
    config_names: Vec<String>,
    by_rule: BTreeMap<String, BTreeMap<Severity, Vec<String>>>,
}

impl ConfigMembership {
    pub fn from_plugin(plugin: &Plugin, prefix: &str, ignore: &[String]) -> Self {
        let mut by_rule: BTreeMap<String, BTreeMap<Severity, Vec<String>>> = BTreeMap::new();
        let mut config_names = Vec::new();
        for config in plugin.configs.keys() {
            if ignore.iter().any(|i| i == config) {
                continue;
            }
            config_names.push(config.clone());
            // Later maps (overrides) win over earlier ones within one config.
            let mut levels: BTreeMap<String, Severity> = BTreeMap::new();
            for rules in plugin.config_rule_maps(config) {
                for (key, value) in rules {
                    let Some(rule) = strip_rule_prefix(key, prefix) else {
                        continue;
                    };
                    if let Some(sev) = Severity::from_value(value) {
                        levels.insert(rule.to_string(), sev);
                    }
                }
            }
            for (rule, sev) in levels {
                by_rule
                    .entry(rule)
                    .or_default()
                    .entry(sev)
                    .or_default()
                    .push(config.clone());
            }
        }
        ConfigMembership {
            config_names,
            by_rule,
        }
    }

    /// Non-ignored config names, sorted.
    pub fn config_names(&self) -> &[String] {
        &self.config_names
    }

    /// Configs that set `rule` to `severity`.
    pub fn configs_for_rule(&self, rule: &str, severity: Severity) -> &[String] {
        self.by_rule
            .get(rule)
            .and_then(|m| m.get(&severity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_in_any_config(&self, rule: &str) -> bool {
        self.by_rule.get(rule).is_some_and(|m| !m.is_empty())
    }
}

fn strip_rule_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(key);
    }
    key.strip_prefix(prefix)?.strip_prefix('/')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEmoji {
    pub config: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// At most one emoji per config name, in display order.
pub struct ConfigEmojis(Vec<ConfigEmoji>);

impl ConfigEmojis {
    /// Combine user entries with defaults for well-known config names.
    ///
    /// User entries come first in the order given. An entry without an emoji
    /// removes the default for that config. Entries naming configs the plugin
    /// does not have are rejected.
    pub fn resolve(
        config_names: &[String],
        user: &[(String, Option<String>)],
    ) -> Result<Self, ConfigError> {
        let mut out: Vec<ConfigEmoji> = Vec::new();
        for (config, emoji) in user {
            if !config_names.iter().any(|c| c == config) {
                return Err(ConfigError::UnknownConfig(config.clone()));
            }
            if let Some(e) = emoji {
                if !out.iter().any(|ce| &ce.config == config) {
                    out.push(ConfigEmoji {
                        config: config.clone(),
                        emoji: e.clone(),
                    });
                }
            }
        }
        for config in config_names {
            if user.iter().any(|(c, _)| c == config) {
                continue;
            }
            if let Some(e) = emoji::default_config_emoji(config) {
                out.push(ConfigEmoji {
                    config: config.clone(),
                    emoji: e.to_string(),
                });
            }
        }
        Ok(ConfigEmojis(out))
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        ConfigEmojis(
            pairs
                .into_iter()
                .map(|(c, e)| ConfigEmoji {
                    config: c.into(),
                    emoji: e.into(),
                })
                .collect(),
        )
    }

    pub fn get(&self, config: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|ce| ce.config == config)
            .map(|ce| ce.emoji.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigEmoji> {
        self.0.iter()
    }
}
