//! Configuration discovery and effective settings resolution.
//!
//! ruledoc reads `ruledoc.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags to produce `Settings`.
//! Defaults:
//! - `manifest`: `ruledoc.manifest.json`
//! - `pathRuleDoc`: `docs/rules/{name}.md`
//! - `pathRuleList`: `["README.md"]`
//! - `ruleDocNotices`: deprecated, configs, fixableAndHasSuggestions, requiresTypeChecking
//! - `ruleListColumns`: name, description, configsError, configsWarn, configsOff,
//!   fixable, hasSuggestions, requiresTypeChecking, deprecated
//! - `ruleDocTitleFormat`: `desc-parens-prefix-name`
//! - `output`: `human`
//! - `check|initRuleDocs`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::tags::{ColumnType, NoticeType, TitleFormat, DEFAULT_COLUMNS, DEFAULT_NOTICES};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST: &str = "ruledoc.manifest.json";
pub const DEFAULT_PATH_RULE_DOC: &str = "docs/rules/{name}.md";
pub const DEFAULT_PATH_RULE_LIST: &str = "README.md";

const CONFIG_FILES: &[&str] = &["ruledoc.toml", "ruledoc.yaml", "ruledoc.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Root configuration loaded from `ruledoc.toml|yaml`.
pub struct RuledocConfig {
    pub manifest: Option<String>,
    pub plugin_prefix: Option<String>,
    pub rule_doc_notices: Option<Vec<String>>,
    pub rule_list_columns: Option<Vec<String>>,
    /// `"config,emoji"` pairs; a bare `"config"` removes its emoji.
    pub config_emoji: Option<Vec<String>>,
    pub ignore_config: Option<Vec<String>>,
    pub split_by: Option<String>,
    pub url_configs: Option<String>,
    pub url_rule_doc: Option<String>,
    pub rule_doc_section_include: Option<Vec<String>>,
    pub rule_doc_section_exclude: Option<Vec<String>>,
    pub rule_doc_title_format: Option<String>,
    pub path_rule_doc: Option<String>,
    pub path_rule_list: Option<Vec<String>>,
    pub init_rule_docs: Option<bool>,
    pub check: Option<bool>,
    pub output: Option<String>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line; `None`/empty means "not given".
pub struct Overrides {
    pub repo_root: Option<String>,
    pub manifest: Option<String>,
    pub plugin_prefix: Option<String>,
    pub rule_doc_notices: Vec<String>,
    pub rule_list_columns: Vec<String>,
    pub config_emoji: Vec<String>,
    pub ignore_config: Vec<String>,
    pub split_by: Option<String>,
    pub url_configs: Option<String>,
    pub url_rule_doc: Option<String>,
    pub rule_doc_section_include: Vec<String>,
    pub rule_doc_section_exclude: Vec<String>,
    pub rule_doc_title_format: Option<String>,
    pub path_rule_doc: Option<String>,
    pub path_rule_list: Vec<String>,
    pub init_rule_docs: Option<bool>,
    pub check: Option<bool>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the generator after applying precedence.
pub struct Settings {
    pub repo_root: PathBuf,
    pub manifest: String,
    pub plugin_prefix: Option<String>,
    pub notices: Vec<NoticeType>,
    pub columns: Vec<ColumnType>,
    pub config_emoji: Vec<(String, Option<String>)>,
    pub ignore_config: Vec<String>,
    pub split_by: Option<String>,
    pub url_configs: Option<String>,
    pub url_rule_doc: Option<String>,
    pub section_include: Vec<String>,
    pub section_exclude: Vec<String>,
    pub title_format: TitleFormat,
    pub path_rule_doc: String,
    pub path_rule_list: Vec<String>,
    pub init_rule_docs: bool,
    pub check: bool,
    pub output: String,
}

impl Settings {
    /// Defaults rooted at `repo_root`, as if no config file or flags existed.
    pub fn with_root(repo_root: impl Into<PathBuf>) -> Self {
        Settings {
            repo_root: repo_root.into(),
            manifest: DEFAULT_MANIFEST.to_string(),
            plugin_prefix: None,
            notices: DEFAULT_NOTICES.to_vec(),
            columns: DEFAULT_COLUMNS.to_vec(),
            config_emoji: Vec::new(),
            ignore_config: Vec::new(),
            split_by: None,
            url_configs: None,
            url_rule_doc: None,
            section_include: Vec::new(),
            section_exclude: Vec::new(),
            title_format: TitleFormat::DescParensPrefixName,
            path_rule_doc: DEFAULT_PATH_RULE_DOC.to_string(),
            path_rule_list: vec![DEFAULT_PATH_RULE_LIST.to_string()],
            init_rule_docs: false,
            check: false,
            output: "human".to_string(),
        }
    }
}

/// Find the repository root by walking up to a config file or `.git`.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RuledocConfig` from `ruledoc.toml` or `ruledoc.yaml|yml` if present.
///
/// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
#[tracing::instrument(fields(root = %root.display()))]
pub fn load_config(root: &Path) -> Result<Option<RuledocConfig>, ConfigError> {
    let toml_path = root.join("ruledoc.toml");
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg: RuledocConfig = toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: toml_path.clone(),
            source,
        })?;
        tracing::debug!(path = %toml_path.display(), "Loaded config");
        return Ok(Some(cfg));
    }
    for yml in ["ruledoc.yaml", "ruledoc.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg: RuledocConfig =
                serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                    path: p.clone(),
                    source,
                })?;
            tracing::debug!(path = %p.display(), "Loaded config");
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// CLI list if given, else config list, else nothing.
fn pick_list(cli: &[String], cfg: Option<Vec<String>>) -> Option<Vec<String>> {
    if !cli.is_empty() {
        Some(cli.to_vec())
    } else {
        cfg
    }
}

fn parse_all<T>(values: &[String]) -> Result<Vec<T>, ConfigError>
where
    T: std::str::FromStr<Err = ConfigError> + PartialEq,
{
    let mut out: Vec<T> = Vec::new();
    for v in values.iter().flat_map(|v| v.split(',')) {
        if v.trim().is_empty() {
            continue;
        }
        let parsed: T = v.parse()?;
        if !out.contains(&parsed) {
            out.push(parsed);
        }
    }
    Ok(out)
}

/// Parse `config,emoji` entries. A bare `config` means "no emoji".
pub fn parse_config_emoji(entries: &[String]) -> Result<Vec<(String, Option<String>)>, ConfigError> {
    entries
        .iter()
        .map(|entry| {
            let (config, emoji) = match entry.split_once(',') {
                Some((c, e)) => (c.trim(), Some(e.trim())),
                None => (entry.trim(), None),
            };
            if config.is_empty() || emoji.is_some_and(|e| e.is_empty() || e.contains(',')) {
                return Err(ConfigError::ConfigEmoji(entry.clone()));
            }
            Ok((config.to_string(), emoji.map(str::to_string)))
        })
        .collect()
}

/// Resolve `Settings` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Settings, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    let mut s = Settings::with_root(repo_root);

    if let Some(m) = cli.manifest.clone().or(cfg.manifest) {
        s.manifest = m;
    }
    s.plugin_prefix = cli.plugin_prefix.clone().or(cfg.plugin_prefix);
    if let Some(list) = pick_list(&cli.rule_doc_notices, cfg.rule_doc_notices) {
        s.notices = parse_all(&list)?;
    }
    if let Some(list) = pick_list(&cli.rule_list_columns, cfg.rule_list_columns) {
        s.columns = parse_all(&list)?;
    }
    if let Some(list) = pick_list(&cli.config_emoji, cfg.config_emoji) {
        s.config_emoji = parse_config_emoji(&list)?;
    }
    s.ignore_config = pick_list(&cli.ignore_config, cfg.ignore_config).unwrap_or_default();
    s.split_by = cli.split_by.clone().or(cfg.split_by);
    s.url_configs = cli.url_configs.clone().or(cfg.url_configs);
    s.url_rule_doc = cli.url_rule_doc.clone().or(cfg.url_rule_doc);
    s.section_include =
        pick_list(&cli.rule_doc_section_include, cfg.rule_doc_section_include).unwrap_or_default();
    s.section_exclude =
        pick_list(&cli.rule_doc_section_exclude, cfg.rule_doc_section_exclude).unwrap_or_default();
    if let Some(tf) = cli.rule_doc_title_format.clone().or(cfg.rule_doc_title_format) {
        s.title_format = tf.parse()?;
    }
    if let Some(p) = cli.path_rule_doc.clone().or(cfg.path_rule_doc) {
        s.path_rule_doc = p;
    }
    if let Some(list) = pick_list(&cli.path_rule_list, cfg.path_rule_list) {
        s.path_rule_list = list;
    }
    s.init_rule_docs = cli.init_rule_docs.or(cfg.init_rule_docs).unwrap_or(false);
    s.check = cli.check.or(cfg.check).unwrap_or(false);
    if let Some(o) = cli.output.clone().or(cfg.output) {
        s.output = o;
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> Overrides {
        Overrides {
            repo_root: root.to_str().map(str::to_string),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let s = resolve_effective(&at(dir.path())).unwrap();
        assert_eq!(s.manifest, DEFAULT_MANIFEST);
        assert_eq!(s.notices, DEFAULT_NOTICES);
        assert_eq!(
            s.notices,
            vec![
                NoticeType::Deprecated,
                NoticeType::Configs,
                NoticeType::FixableAndHasSuggestions,
                NoticeType::RequiresTypeChecking,
            ]
        );
        assert_eq!(s.columns, DEFAULT_COLUMNS);
        assert_eq!(s.path_rule_list, vec!["README.md".to_string()]);
        assert_eq!(s.title_format, TitleFormat::DescParensPrefixName);
        assert!(!s.check);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("ruledoc.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
manifest = "build/plugin.json"
ruleDocNotices = ["type", "options"]
ruleListColumns = ["name", "type"]
configEmoji = ["recommended,🌟", "all"]
ignoreConfig = ["internal"]
splitBy = "meta.type"
ruleDocTitleFormat = "name"
pathRuleList = ["README.md", "docs/rules.md"]
check = true
"#
        )
        .unwrap();

        let s = resolve_effective(&at(root)).unwrap();
        assert_eq!(s.manifest, "build/plugin.json");
        assert_eq!(s.notices, vec![NoticeType::Type, NoticeType::Options]);
        assert_eq!(s.columns, vec![ColumnType::Name, ColumnType::Type]);
        assert_eq!(
            s.config_emoji,
            vec![
                ("recommended".to_string(), Some("🌟".to_string())),
                ("all".to_string(), None)
            ]
        );
        assert_eq!(s.ignore_config, vec!["internal".to_string()]);
        assert_eq!(s.split_by.as_deref(), Some("meta.type"));
        assert_eq!(s.title_format, TitleFormat::Name);
        assert_eq!(s.path_rule_list.len(), 2);
        assert!(s.check);
    }

    #[test]
    fn test_load_yaml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("ruledoc.yaml"),
            "manifest: plugin.json\ncheck: true\nruleListColumns:\n  - name\n  - fixable\n",
        )
        .unwrap();
        let mut cli = at(root);
        cli.check = Some(false);
        cli.rule_list_columns = vec!["name,description".to_string()];
        let s = resolve_effective(&cli).unwrap();
        assert_eq!(s.manifest, "plugin.json");
        assert!(!s.check);
        assert_eq!(s.columns, vec![ColumnType::Name, ColumnType::Description]);
    }

    #[test]
    fn test_unknown_values_are_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("ruledoc.toml"), "ruleDocNotices = [\"shiny\"]\n").unwrap();
        let err = resolve_effective(&at(root)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownValue { kind: "rule doc notice", .. }));

        fs::write(root.join("ruledoc.toml"), "notAKey = 1\n").unwrap();
        assert!(matches!(
            resolve_effective(&at(root)),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn test_parse_config_emoji() {
        assert!(parse_config_emoji(&["a,b,c".to_string()]).is_err());
        assert!(parse_config_emoji(&[",x".to_string()]).is_err());
        assert_eq!(
            parse_config_emoji(&["strict, 🔒".to_string()]).unwrap(),
            vec![("strict".to_string(), Some("🔒".to_string()))]
        );
    }

    #[test]
    fn test_repo_root_walks_up_to_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("packages/plugin")).unwrap();
        assert_eq!(detect_repo_root(&root.join("packages/plugin")), root);
    }
}
