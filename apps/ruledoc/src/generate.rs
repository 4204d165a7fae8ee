//! Rule doc and rules list generation.
//!
//! Renders every rule doc header and every rules list, splices them into the
//! target files, and either writes the result or (in check mode) records the
//! files that would change. Rule docs are independent of each other and are
//! processed in parallel; lists are rendered after all rule details exist.

use crate::config::Settings;
use crate::configs::{ConfigEmojis, ConfigMembership};
use crate::error::{GenerateError, Result, SpliceError};
use crate::legend::ListContext;
use crate::models::plugin::Plugin;
use crate::models::{DocAction, DocKind, Issue, Report, RuleDetails};
use crate::notices::{self, HeaderContext};
use crate::splice::{
    self, BEGIN_CONFIG_LIST_MARKER, BEGIN_RULE_LIST_MARKER, END_CONFIG_LIST_MARKER,
    END_RULE_HEADER_MARKER, END_RULE_LIST_MARKER,
};
use crate::table::{self, ListOptions};
use crate::{normalize, validate};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything derived once per run and shared by all renders.
struct Prepared {
    prefix: String,
    details: Vec<RuleDetails>,
    membership: ConfigMembership,
    emojis: ConfigEmojis,
}

fn prepare(settings: &Settings, plugin: &Plugin) -> Result<Prepared> {
    let prefix = settings
        .plugin_prefix
        .clone()
        .unwrap_or_else(|| plugin.prefix());
    let details = normalize::rule_details(plugin);
    let membership = ConfigMembership::from_plugin(plugin, &prefix, &settings.ignore_config);
    let all_configs: Vec<String> = plugin.configs.keys().cloned().collect();
    let emojis = ConfigEmojis::resolve(&all_configs, &settings.config_emoji)?;
    Ok(Prepared {
        prefix,
        details,
        membership,
        emojis,
    })
}

/// Load the plugin manifest named by `settings`, relative to the repo root.
pub fn load_plugin(settings: &Settings) -> Result<Plugin> {
    Ok(Plugin::load(&settings.repo_root.join(&settings.manifest))?)
}

/// Generate (or check) all rule docs and rules lists.
#[tracing::instrument(skip_all, fields(root = %settings.repo_root.display(), check = settings.check))]
pub fn run_generate(settings: &Settings, plugin: &Plugin) -> Result<Report> {
    let prep = prepare(settings, plugin)?;
    tracing::debug!(rules = prep.details.len(), prefix = %prep.prefix, "Normalized rules");

    let header_ctx = HeaderContext {
        prefix: &prep.prefix,
        membership: &prep.membership,
        config_emojis: &prep.emojis,
        notices: &settings.notices,
        title_format: settings.title_format,
        url_configs: settings.url_configs.as_deref(),
        url_rule_doc: settings.url_rule_doc.as_deref(),
        path_rule_doc: &settings.path_rule_doc,
    };

    let per_rule: Vec<(DocAction, Vec<Issue>)> = prep
        .details
        .par_iter()
        .map(|rule| process_rule_doc(settings, rule, &header_ctx))
        .collect::<Result<Vec<_>>>()?;

    let mut report = Report::default();
    for (action, issues) in per_rule {
        report.actions.push(action);
        report.issues.extend(issues);
    }

    for list in &settings.path_rule_list {
        report
            .actions
            .push(process_rule_list(settings, plugin, &prep, list)?);
    }
    Ok(report)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `new` when it differs from `old`, unless checking.
fn commit(
    settings: &Settings,
    path: &Path,
    rel: &str,
    kind: DocKind,
    old: Option<&str>,
    new: &str,
) -> Result<DocAction> {
    let changed = old != Some(new);
    let mut wrote = false;
    if changed {
        if settings.check {
            tracing::warn!(file = rel, "Out of date");
        } else {
            write_file(path, new)?;
            wrote = true;
            tracing::info!(file = rel, "Updated");
        }
    }
    Ok(DocAction {
        file: rel.to_string(),
        kind,
        changed,
        wrote,
        created: old.is_none(),
    })
}

pub fn rule_doc_path(settings: &Settings, rule: &str) -> (String, PathBuf) {
    let rel = settings.path_rule_doc.replace("{name}", rule);
    let abs = settings.repo_root.join(&rel);
    (rel, abs)
}

fn process_rule_doc(
    settings: &Settings,
    rule: &RuleDetails,
    ctx: &HeaderContext<'_>,
) -> Result<(DocAction, Vec<Issue>)> {
    let (rel, path) = rule_doc_path(settings, &rule.name);
    let existing = if path.exists() {
        Some(read_file(&path)?)
    } else if settings.init_rule_docs {
        None
    } else {
        return Err(GenerateError::MissingRuleDoc {
            rule: rule.name.clone(),
            path,
        });
    };
    let contents = existing.as_deref().unwrap_or("");

    let header = notices::render_rule_header(rule, ctx)?;
    let updated = splice::splice_header(contents, &header, END_RULE_HEADER_MARKER);
    let action = commit(settings, &path, &rel, DocKind::RuleDoc, existing.as_deref(), &updated)?;

    let issues = validate::check_rule_doc(
        &rel,
        rule,
        contents,
        &settings.section_include,
        &settings.section_exclude,
    );
    for issue in &issues {
        tracing::debug!(rule = %issue.rule, message = %issue.message, "Validation failure");
    }
    Ok((action, issues))
}

fn process_rule_list(
    settings: &Settings,
    plugin: &Plugin,
    prep: &Prepared,
    list: &str,
) -> Result<DocAction> {
    let path = settings.repo_root.join(list);
    if !path.exists() {
        return Err(GenerateError::MissingRuleList(path));
    }
    let contents = read_file(&path)?;
    let updated = render_list_file(settings, plugin, prep, list, &path, &contents)?;
    commit(settings, &path, list, DocKind::RuleList, Some(&contents), &updated)
}

fn render_list_file(
    settings: &Settings,
    plugin: &Plugin,
    prep: &Prepared,
    list: &str,
    path: &Path,
    contents: &str,
) -> Result<String> {
    let splice_err = |source: SpliceError| GenerateError::Splice {
        path: path.to_path_buf(),
        source,
    };
    let ctx = ListContext {
        membership: &prep.membership,
        config_emojis: &prep.emojis,
        url_configs: settings.url_configs.as_deref(),
        url_rule_doc: settings.url_rule_doc.as_deref(),
        path_rule_doc: &settings.path_rule_doc,
        list_path: Path::new(list),
    };
    let opts = ListOptions {
        columns: &settings.columns,
        split_by: settings.split_by.as_deref(),
        heading_level: table::split_heading_level(contents),
    };
    let block = table::render_rules_list(&prep.details, plugin, &opts, &ctx)?;
    let mut updated = splice::replace_between_markers(
        contents,
        BEGIN_RULE_LIST_MARKER,
        END_RULE_LIST_MARKER,
        &block,
    )
    .map_err(splice_err)?;

    if splice::has_marker(&updated, BEGIN_CONFIG_LIST_MARKER) {
        let configs_block = table::render_configs_list(&ctx);
        updated = splice::replace_between_markers(
            &updated,
            BEGIN_CONFIG_LIST_MARKER,
            END_CONFIG_LIST_MARKER,
            &configs_block,
        )
        .map_err(splice_err)?;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueKind;
    use serde_json::json;
    use tempfile::tempdir;

    fn plugin() -> Plugin {
        serde_json::from_value(json!({
            "name": "eslint-plugin-foo",
            "rules": {
                "no-foo": { "meta": {
                    "docs": { "description": "disallow foo" },
                    "fixable": "code",
                    "schema": [{ "properties": { "ignoreBar": {} } }]
                } },
                "no-bar": { "meta": { "docs": { "description": "disallow bar" } } }
            },
            "configs": { "recommended": { "rules": { "foo/no-foo": "error" } } }
        }))
        .unwrap()
    }

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("docs/rules")).unwrap();
        fs::write(root.join("docs/rules/no-foo.md"), "# no-foo\n\n## Options\n\nUse ignoreBar.\n").unwrap();
        fs::write(root.join("docs/rules/no-bar.md"), "Body.\n").unwrap();
        fs::write(
            root.join("README.md"),
            format!("# eslint-plugin-foo\n\n## Rules\n\n{}\n{}\n", BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER),
        )
        .unwrap();
    }

    #[test]
    fn test_generate_writes_headers_and_list() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        let settings = Settings::with_root(root);
        let report = run_generate(&settings, &plugin()).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.actions.len(), 3);
        assert!(report.actions.iter().all(|a| a.wrote));

        let doc = fs::read_to_string(root.join("docs/rules/no-foo.md")).unwrap();
        assert!(doc.starts_with("# Disallow foo (`foo/no-foo`)\n"));
        assert!(doc.contains("💼 This rule is enabled in the ✅ `recommended` config."));
        assert!(doc.ends_with(&format!("{}\n\n## Options\n\nUse ignoreBar.\n", END_RULE_HEADER_MARKER)));

        let readme = fs::read_to_string(root.join("README.md")).unwrap();
        assert!(readme.contains("| [no-foo](docs/rules/no-foo.md) | disallow foo | ✅ | 🔧 |"));
    }

    #[test]
    fn test_check_mode_reports_drift_without_writing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        let mut settings = Settings::with_root(root);
        settings.check = true;
        let before = fs::read_to_string(root.join("README.md")).unwrap();
        let report = run_generate(&settings, &plugin()).unwrap();
        assert_eq!(report.drifted().count(), 3);
        assert!(report.failed(true));
        assert!(report.actions.iter().all(|a| !a.wrote));
        assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), before);
    }

    #[test]
    fn test_second_run_is_a_fixed_point() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        let settings = Settings::with_root(root);
        run_generate(&settings, &plugin()).unwrap();
        let mut check = settings.clone();
        check.check = true;
        let report = run_generate(&check, &plugin()).unwrap();
        assert_eq!(report.drifted().count(), 0);
        assert!(!report.failed(true));
    }

    #[test]
    fn test_validation_issues_do_not_stop_the_run() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        fs::write(root.join("docs/rules/no-foo.md"), "no options mentioned\n").unwrap();
        let settings = Settings::with_root(root);
        let report = run_generate(&settings, &plugin()).unwrap();
        let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::OptionsSection, IssueKind::OptionMention]);
        // Every file is still processed, and the run still fails.
        assert_eq!(report.actions.len(), 3);
        assert!(report.failed(false));
    }

    #[test]
    fn test_missing_rule_doc_requires_init() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        fs::remove_file(root.join("docs/rules/no-bar.md")).unwrap();
        let mut settings = Settings::with_root(root);
        assert!(matches!(
            run_generate(&settings, &plugin()),
            Err(GenerateError::MissingRuleDoc { rule, .. }) if rule == "no-bar"
        ));

        settings.init_rule_docs = true;
        let report = run_generate(&settings, &plugin()).unwrap();
        let created: Vec<_> = report.actions.iter().filter(|a| a.created).collect();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].file, "docs/rules/no-bar.md");
        let doc = fs::read_to_string(root.join("docs/rules/no-bar.md")).unwrap();
        assert_eq!(
            doc,
            format!("# Disallow bar (`foo/no-bar`)\n\n{}\n", END_RULE_HEADER_MARKER)
        );
    }

    #[test]
    fn test_list_without_markers_is_fatal() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        fs::write(root.join("README.md"), "# Plugin\n").unwrap();
        let settings = Settings::with_root(root);
        assert!(matches!(
            run_generate(&settings, &plugin()),
            Err(GenerateError::Splice { .. })
        ));
    }

    #[test]
    fn test_configs_list_is_filled_when_markers_present() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        seed(root);
        let readme = format!(
            "# Plugin\n\n{}\n{}\n\n{}\n{}\n",
            BEGIN_CONFIG_LIST_MARKER, END_CONFIG_LIST_MARKER, BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER
        );
        fs::write(root.join("README.md"), readme).unwrap();
        run_generate(&Settings::with_root(root), &plugin()).unwrap();
        let out = fs::read_to_string(root.join("README.md")).unwrap();
        assert!(out.contains("| ✅ | `recommended` |"));
    }
}
