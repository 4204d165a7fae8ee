//! Rules list columns: header glyph, legend lines and per-rule cells.
//!
//! Every [`ColumnType`] maps to a [`Column`] implementation through
//! [`column_for`]. Columns without data are hidden by [`visible_columns`] and
//! hidden columns never reach the legend.

use crate::configs::{ConfigEmojis, ConfigMembership};
use crate::emoji::*;
use crate::error::RenderError;
use crate::models::tags::{ColumnType, RuleType, Severity};
use crate::models::RuleDetails;
use crate::notices::{URL_FIX, URL_SUGGESTIONS, URL_TYPE_INFORMATION};
use crate::schema;
use std::path::Path;

/// Separator between legend lines: a markdown hard line break.
pub const LEGEND_SEPARATOR: &str = "\\\n";

/// Plugin-wide inputs for the rules list.
pub struct ListContext<'a> {
    pub membership: &'a ConfigMembership,
    pub config_emojis: &'a ConfigEmojis,
    pub url_configs: Option<&'a str>,
    pub url_rule_doc: Option<&'a str>,
    /// Rule doc path template relative to the repo root.
    pub path_rule_doc: &'a str,
    /// The list file the table is written to, relative to the repo root.
    pub list_path: &'a Path,
}

impl ListContext<'_> {
    fn configs_word(&self, word: &str) -> String {
        match self.url_configs {
            Some(url) => format!("[{}]({})", word, url),
            None => word.to_string(),
        }
    }

    /// Link to a rule doc as seen from the list file.
    pub fn rule_doc_link(&self, rule: &str) -> String {
        if let Some(url) = self.url_rule_doc {
            return url.replace("{name}", rule);
        }
        let doc = self.path_rule_doc.replace("{name}", rule);
        let base = self.list_path.parent().unwrap_or_else(|| Path::new(""));
        let rel = pathdiff::diff_paths(Path::new(&doc), base)
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or(doc);
        rel.replace('\\', "/")
    }
}

pub trait Column {
    fn header(&self, ctx: &ListContext<'_>) -> String;
    /// Whether any rule has data for this column.
    fn has_data(&self, rules: &[RuleDetails], ctx: &ListContext<'_>) -> bool;
    fn legend(&self, rules: &[RuleDetails], ctx: &ListContext<'_>)
        -> Result<Vec<String>, RenderError>;
    fn cell(&self, rule: &RuleDetails, ctx: &ListContext<'_>) -> String;
    /// Text columns are left-aligned; glyph columns are centered.
    fn is_text(&self) -> bool {
        false
    }
}

struct NameColumn;
struct DescriptionColumn;
struct ConfigsColumn(Severity);
struct FlagColumn {
    glyph: &'static str,
    legend: fn() -> String,
    get: fn(&RuleDetails) -> bool,
}
struct TypeColumn;

static CONFIGS_ERROR: ConfigsColumn = ConfigsColumn(Severity::Error);
static CONFIGS_WARN: ConfigsColumn = ConfigsColumn(Severity::Warn);
static CONFIGS_OFF: ConfigsColumn = ConfigsColumn(Severity::Off);

static DEPRECATED: FlagColumn = FlagColumn {
    glyph: EMOJI_DEPRECATED,
    legend: || format!("{} Deprecated.", EMOJI_DEPRECATED),
    get: |r| r.deprecated,
};
static FIXABLE: FlagColumn = FlagColumn {
    glyph: EMOJI_FIXABLE,
    legend: || {
        format!(
            "{} Automatically fixable by the [`--fix` CLI option]({}).",
            EMOJI_FIXABLE, URL_FIX
        )
    },
    get: |r| r.fixable,
};
static HAS_SUGGESTIONS: FlagColumn = FlagColumn {
    glyph: EMOJI_HAS_SUGGESTIONS,
    legend: || {
        format!(
            "{} Manually fixable by [editor suggestions]({}).",
            EMOJI_HAS_SUGGESTIONS, URL_SUGGESTIONS
        )
    },
    get: |r| r.has_suggestions,
};
static OPTIONS: FlagColumn = FlagColumn {
    glyph: EMOJI_OPTIONS,
    legend: || format!("{} Has configuration options.", EMOJI_OPTIONS),
    get: |r| schema::has_options(&r.schema),
};
static REQUIRES_TYPE_CHECKING: FlagColumn = FlagColumn {
    glyph: EMOJI_REQUIRES_TYPE_CHECKING,
    legend: || {
        format!(
            "{} Requires [type information]({}).",
            EMOJI_REQUIRES_TYPE_CHECKING, URL_TYPE_INFORMATION
        )
    },
    get: |r| r.requires_type_checking,
};

pub fn column_for(kind: ColumnType) -> &'static dyn Column {
    match kind {
        ColumnType::Name => &NameColumn,
        ColumnType::Description => &DescriptionColumn,
        ColumnType::ConfigsError => &CONFIGS_ERROR,
        ColumnType::ConfigsWarn => &CONFIGS_WARN,
        ColumnType::ConfigsOff => &CONFIGS_OFF,
        ColumnType::Deprecated => &DEPRECATED,
        ColumnType::Fixable => &FIXABLE,
        ColumnType::HasSuggestions => &HAS_SUGGESTIONS,
        ColumnType::Options => &OPTIONS,
        ColumnType::RequiresTypeChecking => &REQUIRES_TYPE_CHECKING,
        ColumnType::Type => &TypeColumn,
    }
}

impl Column for NameColumn {
    fn header(&self, _ctx: &ListContext<'_>) -> String {
        "Name".to_string()
    }

    fn has_data(&self, _rules: &[RuleDetails], _ctx: &ListContext<'_>) -> bool {
        true
    }

    fn legend(
        &self,
        _rules: &[RuleDetails],
        _ctx: &ListContext<'_>,
    ) -> Result<Vec<String>, RenderError> {
        Ok(Vec::new())
    }

    fn cell(&self, rule: &RuleDetails, ctx: &ListContext<'_>) -> String {
        format!("[{}]({})", rule.name, ctx.rule_doc_link(&rule.name))
    }

    fn is_text(&self) -> bool {
        true
    }
}

impl Column for DescriptionColumn {
    fn header(&self, _ctx: &ListContext<'_>) -> String {
        "Description".to_string()
    }

    fn has_data(&self, rules: &[RuleDetails], _ctx: &ListContext<'_>) -> bool {
        rules.iter().any(|r| r.description.is_some())
    }

    fn legend(
        &self,
        _rules: &[RuleDetails],
        _ctx: &ListContext<'_>,
    ) -> Result<Vec<String>, RenderError> {
        Ok(Vec::new())
    }

    fn cell(&self, rule: &RuleDetails, _ctx: &ListContext<'_>) -> String {
        rule.description
            .as_deref()
            .map(escape_cell)
            .unwrap_or_default()
    }

    fn is_text(&self) -> bool {
        true
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

impl ConfigsColumn {
    fn glyph(&self) -> &'static str {
        match self.0 {
            Severity::Error => EMOJI_CONFIG_ERROR,
            Severity::Warn => EMOJI_CONFIG_WARN,
            Severity::Off => EMOJI_CONFIG_OFF,
        }
    }
}

impl Column for ConfigsColumn {
    fn header(&self, ctx: &ListContext<'_>) -> String {
        // A lone config with its own emoji is clearer than the generic glyph.
        if let [only] = ctx.membership.config_names() {
            if self.0 == Severity::Error {
                if let Some(e) = ctx.config_emojis.get(only) {
                    return e.to_string();
                }
            }
        }
        self.glyph().to_string()
    }

    fn has_data(&self, rules: &[RuleDetails], ctx: &ListContext<'_>) -> bool {
        rules
            .iter()
            .any(|r| !ctx.membership.configs_for_rule(&r.name, self.0).is_empty())
    }

    fn legend(
        &self,
        _rules: &[RuleDetails],
        ctx: &ListContext<'_>,
    ) -> Result<Vec<String>, RenderError> {
        let names = ctx.membership.config_names();
        if names.is_empty() {
            return Err(RenderError::NoConfigs);
        }
        let mut lines = Vec::new();
        match self.0 {
            Severity::Error => {
                let sole_has_emoji = names.len() == 1 && ctx.config_emojis.get(&names[0]).is_some();
                if names.len() > 1 || !sole_has_emoji {
                    lines.push(format!(
                        "{} {} enabled in.",
                        EMOJI_CONFIG_ERROR,
                        ctx.configs_word("Configurations")
                    ));
                }
                for ce in ctx.config_emojis.iter() {
                    if names.contains(&ce.config) {
                        lines.push(format!(
                            "{} Set in the `{}` {}.",
                            ce.emoji,
                            ce.config,
                            ctx.configs_word("configuration")
                        ));
                    }
                }
            }
            Severity::Warn => lines.push(format!(
                "{} {} set to warn in.",
                EMOJI_CONFIG_WARN,
                ctx.configs_word("Configurations")
            )),
            Severity::Off => lines.push(format!(
                "{} {} disabled in.",
                EMOJI_CONFIG_OFF,
                ctx.configs_word("Configurations")
            )),
        }
        Ok(lines)
    }

    fn cell(&self, rule: &RuleDetails, ctx: &ListContext<'_>) -> String {
        let configs = ctx.membership.configs_for_rule(&rule.name, self.0);
        let mut glyphs: Vec<&str> = ctx
            .config_emojis
            .iter()
            .filter(|ce| configs.contains(&ce.config))
            .map(|ce| ce.emoji.as_str())
            .collect();
        if configs.iter().any(|c| ctx.config_emojis.get(c).is_none()) {
            glyphs.push(self.glyph());
        }
        glyphs.join(" ")
    }
}

impl Column for FlagColumn {
    fn header(&self, _ctx: &ListContext<'_>) -> String {
        self.glyph.to_string()
    }

    fn has_data(&self, rules: &[RuleDetails], _ctx: &ListContext<'_>) -> bool {
        rules.iter().any(self.get)
    }

    fn legend(
        &self,
        _rules: &[RuleDetails],
        _ctx: &ListContext<'_>,
    ) -> Result<Vec<String>, RenderError> {
        Ok(vec![(self.legend)()])
    }

    fn cell(&self, rule: &RuleDetails, _ctx: &ListContext<'_>) -> String {
        if (self.get)(rule) {
            self.glyph.to_string()
        } else {
            String::new()
        }
    }
}

pub fn rule_type_glyph(t: RuleType) -> &'static str {
    match t {
        RuleType::Problem => EMOJI_TYPE_PROBLEM,
        RuleType::Suggestion => EMOJI_TYPE_SUGGESTION,
        RuleType::Layout => EMOJI_TYPE_LAYOUT,
    }
}

fn rule_type_legend(t: RuleType) -> String {
    let text = match t {
        RuleType::Problem => "Identifies problems that could cause errors or unexpected behavior.",
        RuleType::Suggestion => "Identifies potential improvements.",
        RuleType::Layout => "Focuses on code formatting.",
    };
    format!("{} {}", rule_type_glyph(t), text)
}

impl Column for TypeColumn {
    fn header(&self, _ctx: &ListContext<'_>) -> String {
        EMOJI_TYPE.to_string()
    }

    fn has_data(&self, rules: &[RuleDetails], _ctx: &ListContext<'_>) -> bool {
        rules.iter().any(|r| r.rule_type.is_some())
    }

    fn legend(
        &self,
        rules: &[RuleDetails],
        _ctx: &ListContext<'_>,
    ) -> Result<Vec<String>, RenderError> {
        if rules.is_empty() {
            return Err(RenderError::NoRules);
        }
        let mut lines = Vec::new();
        for t in RuleType::ALL {
            if rules.iter().any(|r| r.rule_type == Some(t)) {
                if lines.is_empty() {
                    lines.push(format!("{} The type of rule.", EMOJI_TYPE));
                }
                lines.push(rule_type_legend(t));
            }
        }
        Ok(lines)
    }

    fn cell(&self, rule: &RuleDetails, _ctx: &ListContext<'_>) -> String {
        rule.rule_type.map(rule_type_glyph).unwrap_or_default().to_string()
    }
}

/// Selected columns that have data, in selection order.
pub fn visible_columns(
    selected: &[ColumnType],
    rules: &[RuleDetails],
    ctx: &ListContext<'_>,
) -> Vec<ColumnType> {
    let mut out: Vec<ColumnType> = Vec::new();
    for c in selected {
        if !out.contains(c) && column_for(*c).has_data(rules, ctx) {
            out.push(*c);
        }
    }
    out
}

/// Legend lines for the visible columns, in column order.
pub fn legend_lines(
    columns: &[ColumnType],
    rules: &[RuleDetails],
    ctx: &ListContext<'_>,
) -> Result<Vec<String>, RenderError> {
    let mut lines = Vec::new();
    for c in columns {
        lines.extend(column_for(*c).legend(rules, ctx)?);
    }
    Ok(lines)
}

/// Legend paragraph: lines joined by hard line breaks.
pub fn render_legend(
    columns: &[ColumnType],
    rules: &[RuleDetails],
    ctx: &ListContext<'_>,
) -> Result<String, RenderError> {
    Ok(legend_lines(columns, rules, ctx)?.join(LEGEND_SEPARATOR))
}
