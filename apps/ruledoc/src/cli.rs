//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ruledoc",
    version,
    about = "Generate rule docs and rules lists for lint plugins",
    long_about = "ruledoc keeps rule doc headers and README rules lists in sync with a lint plugin manifest.\n\nConfiguration precedence: CLI > ruledoc.toml > defaults.",
    after_help = "Examples:\n  ruledoc generate\n  ruledoc generate --check\n  ruledoc generate --rule-list-columns name,description,fixable --split-by meta.type",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current ruledoc version.")]
    Version,
    /// Regenerate rule doc headers and rules lists
    #[command(
        about = "Generate rule docs and rules lists",
        long_about = "Render each rule doc header and every rules list from the plugin manifest. With --check nothing is written and drift fails the run.",
        after_help = "Examples:\n  ruledoc generate --manifest plugin.json\n  ruledoc generate --check --output json"
    )]
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Plugin manifest JSON (default: ruledoc.manifest.json)")]
    pub manifest: Option<String>,
    #[arg(long, help = "Rule name prefix (default: derived from the plugin name)")]
    pub plugin_prefix: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if any file would change (nothing is written)")]
    pub check: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Create missing rule docs")]
    pub init_rule_docs: bool,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, value_delimiter = ',', help = "Ordered notices for rule doc headers")]
    pub rule_doc_notices: Vec<String>,
    #[arg(long, value_delimiter = ',', help = "Ordered columns for the rules list")]
    pub rule_list_columns: Vec<String>,
    #[arg(long, help = "Emoji for a config as `config,emoji`; bare `config` removes it (repeatable)")]
    pub config_emoji: Vec<String>,
    #[arg(long, value_delimiter = ',', help = "Configs to leave out of docs")]
    pub ignore_config: Vec<String>,
    #[arg(long, help = "Dotted rule property to split the rules list by (e.g. meta.type)")]
    pub split_by: Option<String>,
    #[arg(long, help = "Link target for the word `config(s)` in notices and legend")]
    pub url_configs: Option<String>,
    #[arg(long, help = "Rule doc URL template with {name}, used instead of relative links")]
    pub url_rule_doc: Option<String>,
    #[arg(long, help = "Heading every rule doc must contain (repeatable)")]
    pub rule_doc_section_include: Vec<String>,
    #[arg(long, help = "Heading no rule doc may contain (repeatable)")]
    pub rule_doc_section_exclude: Vec<String>,
    #[arg(long, help = "Title layout: desc|desc-parens-name|desc-parens-prefix-name|name|prefix-name")]
    pub rule_doc_title_format: Option<String>,
    #[arg(long, help = "Rule doc path template (default: docs/rules/{name}.md)")]
    pub path_rule_doc: Option<String>,
    #[arg(long, help = "File holding the rules list (repeatable; default: README.md)")]
    pub path_rule_list: Vec<String>,
}

impl GenerateArgs {
    /// Boolean switches only override config when set.
    pub fn into_overrides(self) -> Overrides {
        Overrides {
            repo_root: self.repo_root,
            manifest: self.manifest,
            plugin_prefix: self.plugin_prefix,
            rule_doc_notices: self.rule_doc_notices,
            rule_list_columns: self.rule_list_columns,
            config_emoji: self.config_emoji,
            ignore_config: self.ignore_config,
            split_by: self.split_by,
            url_configs: self.url_configs,
            url_rule_doc: self.url_rule_doc,
            rule_doc_section_include: self.rule_doc_section_include,
            rule_doc_section_exclude: self.rule_doc_section_exclude,
            rule_doc_title_format: self.rule_doc_title_format,
            path_rule_doc: self.path_rule_doc,
            path_rule_list: self.path_rule_list,
            init_rule_docs: self.init_rule_docs.then_some(true),
            check: self.check.then_some(true),
            output: self.output,
        }
    }
}
