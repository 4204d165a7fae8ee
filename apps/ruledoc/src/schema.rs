//! Option discovery in rule JSON schemas.

use serde_json::Value as Json;

/// Whether a rule schema declares any configuration.
///
/// ESLint schemas are either a list of per-position schemas or one full
/// schema object; an empty list or empty object means "no options".
pub fn has_options(schema: &Json) -> bool {
    match schema {
        Json::Array(items) => !items.is_empty(),
        Json::Object(obj) => {
            // `{ type: "array", items: [] }` is the explicit no-options form.
            if let Some(Json::Array(items)) = obj.get("items") {
                if items.is_empty() && obj.get("type").and_then(Json::as_str) == Some("array") {
                    return false;
                }
            }
            !obj.is_empty()
        }
        _ => false,
    }
}

/// Every property name declared anywhere in the schema, deduplicated in
/// first-seen order.
pub fn named_options(schema: &Json) -> Vec<String> {
    let mut out = Vec::new();
    collect(schema, &mut out);
    out
}

fn collect(schema: &Json, out: &mut Vec<String>) {
    match schema {
        Json::Array(items) => {
            for it in items {
                collect(it, out);
            }
        }
        Json::Object(obj) => {
            for (key, value) in obj {
                if key == "properties" {
                    if let Json::Object(props) = value {
                        for (name, sub) in props {
                            if !out.iter().any(|o| o == name) {
                                out.push(name.clone());
                            }
                            collect(sub, out);
                        }
                        continue;
                    }
                }
                collect(value, out);
            }
        }
        _ => {}
    }
}
