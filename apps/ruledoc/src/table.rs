//! Rules list and configs list composition.

use crate::error::RenderError;
use crate::legend::{column_for, render_legend, visible_columns, ListContext};
use crate::models::plugin::Plugin;
use crate::models::tags::ColumnType;
use crate::models::RuleDetails;
use crate::splice::{
    BEGIN_CONFIG_LIST_MARKER, BEGIN_RULE_LIST_MARKER, END_CONFIG_LIST_MARKER,
    END_RULE_LIST_MARKER,
};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// A group of rules rendered under one optional sub-heading.
#[derive(Debug)]
pub struct RuleGroup<'a> {
    pub title: Option<String>,
    pub rules: Vec<&'a RuleDetails>,
}

/// Partition rules by the value at `split_by` in their raw manifest records.
///
/// Rules without a value (or with `false`/`null`) form the first, untitled
/// group. Other groups follow in ascending order of their title. Rules are
/// sorted by name inside each group.
pub fn group_rules<'a>(
    rules: &'a [RuleDetails],
    plugin: &Plugin,
    split_by: Option<&str>,
) -> Vec<RuleGroup<'a>> {
    let mut untitled: Vec<&RuleDetails> = Vec::new();
    let mut titled: BTreeMap<String, Vec<&RuleDetails>> = BTreeMap::new();
    for rule in rules {
        let key = split_by.and_then(|path| {
            let value = lookup_path(plugin.rules.get(&rule.name)?, path)?;
            group_title(value, path)
        });
        match key {
            Some(k) => titled.entry(k).or_default().push(rule),
            None => untitled.push(rule),
        }
    }
    let mut groups = Vec::new();
    if !untitled.is_empty() {
        groups.push(RuleGroup {
            title: None,
            rules: untitled,
        });
    }
    for (title, rules) in titled {
        groups.push(RuleGroup {
            title: Some(title),
            rules,
        });
    }
    for g in groups.iter_mut() {
        g.rules.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

/// Follow a dotted path (`meta.docs.category`) through JSON objects.
fn lookup_path<'v>(value: &'v Json, path: &str) -> Option<&'v Json> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .try_fold(value, |cur, seg| cur.get(seg))
}

fn group_title(value: &Json, path: &str) -> Option<String> {
    match value {
        Json::String(s) if !s.is_empty() => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(true) => path.rsplit('.').next().map(str::to_string),
        _ => None,
    }
}

/// Heading level for split-group sub-headings: one deeper than the last
/// heading above the rules list marker, never shallower than `##`.
pub fn split_heading_level(contents: &str) -> usize {
    let mut level = 1;
    for line in contents.lines() {
        if line.strip_suffix('\r').unwrap_or(line) == BEGIN_RULE_LIST_MARKER {
            break;
        }
        let hashes = line.chars().take_while(|c| *c == '#').count();
        if hashes > 0 && line[hashes..].starts_with(' ') {
            level = hashes;
        }
    }
    (level + 1).clamp(2, 6)
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Markdown table lines for one group.
pub fn render_table(
    columns: &[ColumnType],
    rules: &[&RuleDetails],
    ctx: &ListContext<'_>,
) -> Vec<String> {
    let header: Vec<String> = columns.iter().map(|c| column_for(*c).header(ctx)).collect();
    let align: Vec<String> = columns
        .iter()
        .map(|c| {
            if column_for(*c).is_text() {
                ":--".to_string()
            } else {
                ":-:".to_string()
            }
        })
        .collect();
    let mut lines = vec![table_row(&header), table_row(&align)];
    for rule in rules {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| column_for(*c).cell(rule, ctx))
            .collect();
        lines.push(table_row(&cells));
    }
    lines
}

/// Options for composing the rules list block.
pub struct ListOptions<'a> {
    pub columns: &'a [ColumnType],
    pub split_by: Option<&'a str>,
    pub heading_level: usize,
}

/// Full rules list block including its begin/end markers.
pub fn render_rules_list(
    rules: &[RuleDetails],
    plugin: &Plugin,
    opts: &ListOptions<'_>,
    ctx: &ListContext<'_>,
) -> Result<Vec<String>, RenderError> {
    let columns = visible_columns(opts.columns, rules, ctx);
    let legend = render_legend(&columns, rules, ctx)?;

    let mut lines = vec![BEGIN_RULE_LIST_MARKER.to_string(), String::new()];
    if !legend.is_empty() {
        lines.extend(legend.split('\n').map(str::to_string));
        lines.push(String::new());
    }
    let groups = group_rules(rules, plugin, opts.split_by);
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if let Some(title) = &group.title {
            lines.push(format!("{} {}", "#".repeat(opts.heading_level), title));
            lines.push(String::new());
        }
        lines.extend(render_table(&columns, &group.rules, ctx));
    }
    if !groups.is_empty() {
        lines.push(String::new());
    }
    lines.push(END_RULE_LIST_MARKER.to_string());
    Ok(lines)
}

/// Configs list block: one row per non-ignored config with its emoji.
pub fn render_configs_list(ctx: &ListContext<'_>) -> Vec<String> {
    let mut lines = vec![BEGIN_CONFIG_LIST_MARKER.to_string(), String::new()];
    let names = ctx.membership.config_names();
    if !names.is_empty() {
        lines.push(table_row(&[String::new(), "Name".to_string()]));
        lines.push(table_row(&[":-".to_string(), ":--".to_string()]));
        for name in names {
            let emoji = ctx.config_emojis.get(name).unwrap_or_default().to_string();
            lines.push(table_row(&[emoji, format!("`{}`", name)]));
        }
        lines.push(String::new());
    }
    lines.push(END_CONFIG_LIST_MARKER.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{ConfigEmojis, ConfigMembership};
    use crate::models::tags::DEFAULT_COLUMNS;
    use crate::normalize;
    use serde_json::json;
    use std::path::Path;

    fn plugin() -> Plugin {
        serde_json::from_value(json!({
            "name": "eslint-plugin-foo",
            "rules": {
                "no-zed": { "meta": { "type": "layout", "docs": { "description": "disallow zed" }, "fixable": "code" } },
                "no-bar": { "meta": { "type": "problem", "docs": { "description": "disallow bar" }, "hasSuggestions": true } },
                "no-baz": { "meta": { "docs": { "description": "disallow baz" }, "deprecated": true } },
                "no-abc": { "meta": { "type": "problem", "docs": { "description": "disallow abc" } } }
            },
            "configs": {
                "recommended": { "rules": { "foo/no-bar": "error", "foo/no-zed": "warn" } }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_group_rules_split_and_sorted() {
        let p = plugin();
        let details = normalize::rule_details(&p);
        let groups = group_rules(&details, &p, Some("meta.type"));
        let shape: Vec<(Option<&str>, Vec<&str>)> = groups
            .iter()
            .map(|g| {
                (
                    g.title.as_deref(),
                    g.rules.iter().map(|r| r.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            shape,
            vec![
                (None, vec!["no-baz"]),
                (Some("layout"), vec!["no-zed"]),
                (Some("problem"), vec!["no-abc", "no-bar"]),
            ]
        );
        let flat = group_rules(&details, &p, None);
        assert_eq!(flat.len(), 1);
        let names: Vec<_> = flat[0].rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["no-abc", "no-bar", "no-baz", "no-zed"]);
    }

    #[test]
    fn test_boolean_split_uses_last_path_segment() {
        let p = plugin();
        let details = normalize::rule_details(&p);
        let groups = group_rules(&details, &p, Some("meta.deprecated"));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].title.as_deref(), Some("deprecated"));
    }

    #[test]
    fn test_split_heading_level() {
        let doc = format!("# Title\n\n## Rules\n\n{}\n", BEGIN_RULE_LIST_MARKER);
        assert_eq!(split_heading_level(&doc), 3);
        assert_eq!(split_heading_level(BEGIN_RULE_LIST_MARKER), 2);
        let doc = format!("#hashtag\n{}\n### After\n", BEGIN_RULE_LIST_MARKER);
        assert_eq!(split_heading_level(&doc), 2);
    }

    #[test]
    fn test_rules_list_snapshot() {
        let p = plugin();
        let details = normalize::rule_details(&p);
        let m = ConfigMembership::from_plugin(&p, "foo", &[]);
        let e = ConfigEmojis::resolve(m.config_names(), &[]).unwrap();
        let ctx = ListContext {
            membership: &m,
            config_emojis: &e,
            url_configs: None,
            url_rule_doc: None,
            path_rule_doc: "docs/rules/{name}.md",
            list_path: Path::new("README.md"),
        };
        let opts = ListOptions {
            columns: DEFAULT_COLUMNS,
            split_by: None,
            heading_level: 2,
        };
        let out = render_rules_list(&details, &p, &opts, &ctx).unwrap().join("\n");
        insta::assert_snapshot!(out, @r"
        <!-- begin auto-generated rules list -->

        ✅ Set in the `recommended` configuration.\
        ⚠️ Configurations set to warn in.\
        🔧 Automatically fixable by the [`--fix` CLI option](https://eslint.org/docs/latest/user-guide/command-line-interface#--fix).\
        💡 Manually fixable by [editor suggestions](https://eslint.org/docs/latest/use/core-concepts#rule-suggestions).\
        ❌ Deprecated.

        | Name | Description | ✅ | ⚠️ | 🔧 | 💡 | ❌ |
        | :-- | :-- | :-: | :-: | :-: | :-: | :-: |
        | [no-abc](docs/rules/no-abc.md) | disallow abc |  |  |  |  |  |
        | [no-bar](docs/rules/no-bar.md) | disallow bar | ✅ |  |  | 💡 |  |
        | [no-baz](docs/rules/no-baz.md) | disallow baz |  |  |  |  | ❌ |
        | [no-zed](docs/rules/no-zed.md) | disallow zed |  | ✅ | 🔧 |  |  |

        <!-- end auto-generated rules list -->
        ");
    }

    #[test]
    fn test_configs_list() {
        let p = plugin();
        let m = ConfigMembership::from_plugin(&p, "foo", &[]);
        let e = ConfigEmojis::resolve(m.config_names(), &[]).unwrap();
        let ctx = ListContext {
            membership: &m,
            config_emojis: &e,
            url_configs: None,
            url_rule_doc: None,
            path_rule_doc: "docs/rules/{name}.md",
            list_path: Path::new("README.md"),
        };
        assert_eq!(
            render_configs_list(&ctx),
            vec![
                BEGIN_CONFIG_LIST_MARKER.to_string(),
                String::new(),
                "|  | Name |".to_string(),
                "| :- | :-- |".to_string(),
                "| ✅ | `recommended` |".to_string(),
                String::new(),
                END_CONFIG_LIST_MARKER.to_string(),
            ]
        );
    }
}
