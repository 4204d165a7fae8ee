//! Normalize raw manifest rule records into [`RuleDetails`].
//!
//! Entries without a `meta` object are skipped: plugins sometimes export
//! helpers next to their rules and those are not documented.

use crate::models::plugin::Plugin;
use crate::models::tags::RuleType;
use crate::models::RuleDetails;
use serde_json::Value as Json;

/// `meta.fixable` values that make a rule auto-fixable.
const FIX_KINDS: &[&str] = &["code", "whitespace"];

/// Normalize every rule in manifest order.
pub fn rule_details(plugin: &Plugin) -> Vec<RuleDetails> {
    plugin
        .rules
        .iter()
        .filter_map(|(name, record)| {
            let details = normalize_rule(name, record);
            if details.is_none() {
                tracing::debug!(rule = %name, "Skipping rule without meta");
            }
            details
        })
        .collect()
}

/// Normalize one record; `None` when it has no usable metadata.
pub fn normalize_rule(name: &str, record: &Json) -> Option<RuleDetails> {
    let meta = record.get("meta")?.as_object()?;
    let docs = meta.get("docs").and_then(Json::as_object);

    let description = docs
        .and_then(|d| d.get("description"))
        .and_then(Json::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let fixable = meta
        .get("fixable")
        .and_then(Json::as_str)
        .is_some_and(|f| FIX_KINDS.contains(&f));
    let has_suggestions = flag(meta.get("hasSuggestions"));
    let requires_type_checking = flag(docs.and_then(|d| d.get("requiresTypeChecking")));

    // `deprecated` is a boolean, or an object carrying replacement info.
    let deprecated_val = meta.get("deprecated");
    let deprecated = match deprecated_val {
        Some(Json::Object(_)) => true,
        other => flag(other),
    };
    let replaced_by = meta
        .get("replacedBy")
        .or_else(|| deprecated_val.and_then(|d| d.get("replacedBy")))
        .map(string_list)
        .unwrap_or_default();

    let schema = meta
        .get("schema")
        .cloned()
        .unwrap_or_else(|| Json::Array(Vec::new()));
    let rule_type = meta
        .get("type")
        .and_then(Json::as_str)
        .and_then(RuleType::parse);

    Some(RuleDetails {
        name: name.to_string(),
        description,
        fixable,
        has_suggestions,
        requires_type_checking,
        deprecated,
        replaced_by,
        schema,
        rule_type,
    })
}

fn flag(v: Option<&Json>) -> bool {
    matches!(v, Some(Json::Bool(true)))
}

/// Accept `["a", "b"]` or objects like `[{ "rule": { "name": "a" } }]`.
fn string_list(v: &Json) -> Vec<String> {
    let Json::Array(items) = v else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|it| match it {
            Json::String(s) => Some(s.clone()),
            Json::Object(o) => o
                .get("rule")
                .and_then(|r| r.get("name"))
                .and_then(Json::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}
