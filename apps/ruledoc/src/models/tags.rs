//! Closed vocabularies: severity tiers, rule categories, notices, columns
//! and title formats.
//!
//! Names accepted from configuration are the camelCase / kebab-case tokens
//! users already write in their option lists (`fixableAndHasSuggestions`,
//! `desc-parens-prefix-name`).

use crate::error::ConfigError;
use serde_json::Value as Json;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Severity tier a config assigns to a rule.
pub enum Severity {
    Error,
    Warn,
    Off,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warn, Severity::Off];

    /// Map a raw severity encoding to its tier.
    ///
    /// Accepts `2|1|0`, `"error"|"warn"|"off"` (also numeric strings) and the
    /// array form `["error", {..options}]`, where only the first element counts.
    pub fn from_value(value: &Json) -> Option<Severity> {
        match value {
            Json::Number(n) => match n.as_u64()? {
                2 => Some(Severity::Error),
                1 => Some(Severity::Warn),
                0 => Some(Severity::Off),
                _ => None,
            },
            Json::String(s) => match s.as_str() {
                "error" | "2" => Some(Severity::Error),
                "warn" | "1" => Some(Severity::Warn),
                "off" | "0" => Some(Severity::Off),
                _ => None,
            },
            Json::Array(items) => items.first().and_then(Severity::from_value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Rule category from `meta.type`. Declaration order is the canonical
/// legend order.
pub enum RuleType {
    Problem,
    Suggestion,
    Layout,
}

impl RuleType {
    pub const ALL: [RuleType; 3] = [RuleType::Problem, RuleType::Suggestion, RuleType::Layout];

    pub fn parse(s: &str) -> Option<RuleType> {
        match s {
            "problem" => Some(RuleType::Problem),
            "suggestion" => Some(RuleType::Suggestion),
            "layout" => Some(RuleType::Layout),
            _ => None,
        }
    }
}

/// Build a `FromStr`/`Display` pair plus an `ALL` list for a config-facing enum.
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($token => Ok($name::$variant),)+
                    other => Err(ConfigError::UnknownValue {
                        kind: $kind,
                        value: other.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

config_enum! {
    /// Notices that may appear in a rule doc header.
    NoticeType, "rule doc notice" {
        Configs => "configs",
        Deprecated => "deprecated",
        Fixable => "fixable",
        FixableAndHasSuggestions => "fixableAndHasSuggestions",
        HasSuggestions => "hasSuggestions",
        Options => "options",
        RequiresTypeChecking => "requiresTypeChecking",
        Type => "type",
    }
}

config_enum! {
    /// Columns that may appear in the rules list table.
    ColumnType, "rule list column" {
        Name => "name",
        Description => "description",
        ConfigsError => "configsError",
        ConfigsWarn => "configsWarn",
        ConfigsOff => "configsOff",
        Deprecated => "deprecated",
        Fixable => "fixable",
        HasSuggestions => "hasSuggestions",
        Options => "options",
        RequiresTypeChecking => "requiresTypeChecking",
        Type => "type",
    }
}

config_enum! {
    /// Layout of the `#` title line of a rule doc.
    TitleFormat, "rule doc title format" {
        Desc => "desc",
        DescParensName => "desc-parens-name",
        DescParensPrefixName => "desc-parens-prefix-name",
        Name => "name",
        PrefixName => "prefix-name",
    }
}

pub const DEFAULT_NOTICES: &[NoticeType] = &[
    NoticeType::Deprecated,
    NoticeType::Configs,
    NoticeType::FixableAndHasSuggestions,
    NoticeType::RequiresTypeChecking,
];

pub const DEFAULT_COLUMNS: &[ColumnType] = &[
    ColumnType::Name,
    ColumnType::Description,
    ColumnType::ConfigsError,
    ColumnType::ConfigsWarn,
    ColumnType::ConfigsOff,
    ColumnType::Fixable,
    ColumnType::HasSuggestions,
    ColumnType::RequiresTypeChecking,
    ColumnType::Deprecated,
];
