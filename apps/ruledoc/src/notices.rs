//! Rule doc header rendering: title line, notices and the end marker.
//!
//! Each notice kind is a small type implementing [`Notice`]; the configured
//! [`NoticeType`] list picks them in order through [`notice_for`].

use crate::configs::{ConfigEmojis, ConfigMembership};
use crate::emoji::*;
use crate::error::RenderError;
use crate::models::tags::{NoticeType, RuleType, Severity, TitleFormat};
use crate::models::RuleDetails;
use crate::schema;
use crate::splice::END_RULE_HEADER_MARKER;
use std::path::Path;

pub const URL_FIX: &str = "https://eslint.org/docs/latest/user-guide/command-line-interface#--fix";
pub const URL_SUGGESTIONS: &str =
    "https://eslint.org/docs/latest/use/core-concepts#rule-suggestions";
pub const URL_TYPE_INFORMATION: &str = "https://typescript-eslint.io/linting/typed-linting";

/// Plugin-wide inputs shared by every rule header.
pub struct HeaderContext<'a> {
    pub prefix: &'a str,
    pub membership: &'a ConfigMembership,
    pub config_emojis: &'a ConfigEmojis,
    pub notices: &'a [NoticeType],
    pub title_format: TitleFormat,
    pub url_configs: Option<&'a str>,
    pub url_rule_doc: Option<&'a str>,
    /// Rule doc path template, e.g. `docs/rules/{name}.md`.
    pub path_rule_doc: &'a str,
}

impl HeaderContext<'_> {
    fn consolidates_fix_notices(&self) -> bool {
        self.notices.contains(&NoticeType::FixableAndHasSuggestions)
    }

    /// Link target for another rule's doc, as seen from a rule doc.
    fn sibling_doc_link(&self, rule: &str) -> String {
        if let Some(url) = self.url_rule_doc {
            return url.replace("{name}", rule);
        }
        let file = Path::new(self.path_rule_doc)
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "{name}.md".to_string());
        file.replace("{name}", rule)
    }
}

/// A header notice: when it applies and what it says.
pub trait Notice {
    fn applies(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> bool;
    fn render(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> Result<String, RenderError>;
}

struct ConfigsNotice;
struct DeprecatedNotice;
struct FixableNotice;
struct FixableAndHasSuggestionsNotice;
struct HasSuggestionsNotice;
struct OptionsNotice;
struct RequiresTypeCheckingNotice;
struct TypeNotice;

pub fn notice_for(kind: NoticeType) -> &'static dyn Notice {
    match kind {
        NoticeType::Configs => &ConfigsNotice,
        NoticeType::Deprecated => &DeprecatedNotice,
        NoticeType::Fixable => &FixableNotice,
        NoticeType::FixableAndHasSuggestions => &FixableAndHasSuggestionsNotice,
        NoticeType::HasSuggestions => &HasSuggestionsNotice,
        NoticeType::Options => &OptionsNotice,
        NoticeType::RequiresTypeChecking => &RequiresTypeCheckingNotice,
        NoticeType::Type => &TypeNotice,
    }
}

impl Notice for ConfigsNotice {
    fn applies(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> bool {
        ctx.membership.is_in_any_config(&rule.name)
    }

    fn render(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        let sentences: Vec<String> = Severity::ALL
            .iter()
            .filter_map(|sev| {
                configs_sentence(ctx.membership.configs_for_rule(&rule.name, *sev), *sev, ctx)
            })
            .collect();
        if sentences.is_empty() {
            return Err(RenderError::NoNoticeContent {
                notice: NoticeType::Configs.to_string(),
                rule: rule.name.clone(),
            });
        }
        Ok(sentences.join(" "))
    }
}

fn configs_sentence(configs: &[String], sev: Severity, ctx: &HeaderContext<'_>) -> Option<String> {
    if configs.is_empty() {
        return None;
    }
    let (glyph, term) = match sev {
        Severity::Error => (EMOJI_CONFIG_ERROR, "is enabled"),
        Severity::Warn => (EMOJI_CONFIG_WARN, "_warns_"),
        Severity::Off => (EMOJI_CONFIG_OFF, "is _disabled_"),
    };
    let csv = configs
        .iter()
        .map(|c| match ctx.config_emojis.get(c) {
            Some(e) => format!("{} `{}`", e, c),
            None => format!("`{}`", c),
        })
        .collect::<Vec<_>>()
        .join(", ");
    let word = |w: &str| match ctx.url_configs {
        Some(url) => format!("[{}]({})", w, url),
        None => w.to_string(),
    };
    Some(if configs.len() > 1 {
        format!(
            "{} This rule {} in the following {}: {}.",
            glyph,
            term,
            word("configs"),
            csv
        )
    } else {
        format!("{} This rule {} in the {} {}.", glyph, term, csv, word("config"))
    })
}

impl Notice for DeprecatedNotice {
    fn applies(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> bool {
        rule.deprecated
    }

    fn render(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        let mut s = format!("{} This rule is deprecated.", EMOJI_DEPRECATED);
        if !rule.replaced_by.is_empty() {
            let links = rule
                .replaced_by
                .iter()
                .map(|r| format!("[`{}`]({})", r, ctx.sibling_doc_link(r)))
                .collect::<Vec<_>>()
                .join(", ");
            s.push_str(&format!(" It was replaced by {}.", links));
        }
        Ok(s)
    }
}

impl Notice for FixableNotice {
    fn applies(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> bool {
        rule.fixable && !(ctx.consolidates_fix_notices() && rule.has_suggestions)
    }

    fn render(&self, _rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "{} This rule is automatically fixable by the [`--fix` CLI option]({}).",
            EMOJI_FIXABLE, URL_FIX
        ))
    }
}

impl Notice for HasSuggestionsNotice {
    fn applies(&self, rule: &RuleDetails, ctx: &HeaderContext<'_>) -> bool {
        rule.has_suggestions && !(ctx.consolidates_fix_notices() && rule.fixable)
    }

    fn render(&self, _rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "{} This rule is manually fixable by [editor suggestions]({}).",
            EMOJI_HAS_SUGGESTIONS, URL_SUGGESTIONS
        ))
    }
}

impl Notice for FixableAndHasSuggestionsNotice {
    fn applies(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> bool {
        rule.fixable && rule.has_suggestions
    }

    fn render(&self, _rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "{}{} This rule is automatically fixable by the [`--fix` CLI option]({}) and manually fixable by [editor suggestions]({}).",
            EMOJI_FIXABLE, EMOJI_HAS_SUGGESTIONS, URL_FIX, URL_SUGGESTIONS
        ))
    }
}

impl Notice for OptionsNotice {
    fn applies(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> bool {
        schema::has_options(&rule.schema)
    }

    fn render(&self, _rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        Ok(format!("{} This rule is configurable.", EMOJI_OPTIONS))
    }
}

impl Notice for RequiresTypeCheckingNotice {
    fn applies(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> bool {
        rule.requires_type_checking
    }

    fn render(&self, _rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "{} This rule requires [type information]({}).",
            EMOJI_REQUIRES_TYPE_CHECKING, URL_TYPE_INFORMATION
        ))
    }
}

impl Notice for TypeNotice {
    fn applies(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> bool {
        rule.rule_type.is_some()
    }

    fn render(&self, rule: &RuleDetails, _ctx: &HeaderContext<'_>) -> Result<String, RenderError> {
        let text = match rule.rule_type {
            Some(RuleType::Problem) => format!(
                "{} This rule identifies problems that could cause errors or unexpected behavior.",
                EMOJI_TYPE_PROBLEM
            ),
            Some(RuleType::Suggestion) => format!(
                "{} This rule identifies potential improvements.",
                EMOJI_TYPE_SUGGESTION
            ),
            Some(RuleType::Layout) => {
                format!("{} This rule focuses on code formatting.", EMOJI_TYPE_LAYOUT)
            }
            None => {
                return Err(RenderError::NoNoticeContent {
                    notice: NoticeType::Type.to_string(),
                    rule: rule.name.clone(),
                })
            }
        };
        Ok(text)
    }
}

/// Title line for a rule doc.
pub fn render_title(rule: &RuleDetails, prefix: &str, format: TitleFormat) -> String {
    let prefixed = if prefix.is_empty() {
        rule.name.clone()
    } else {
        format!("{}/{}", prefix, rule.name)
    };
    let desc = rule
        .description
        .as_deref()
        .map(sentence_case)
        .filter(|d| d.chars().any(char::is_alphanumeric));
    let Some(desc) = desc else {
        return match format {
            TitleFormat::DescParensName | TitleFormat::Name => format!("# `{}`", rule.name),
            _ => format!("# `{}`", prefixed),
        };
    };
    match format {
        TitleFormat::Desc => format!("# {}", desc),
        TitleFormat::DescParensName => format!("# {} (`{}`)", desc, rule.name),
        TitleFormat::DescParensPrefixName => format!("# {} (`{}`)", desc, prefixed),
        TitleFormat::Name => format!("# `{}`", rule.name),
        TitleFormat::PrefixName => format!("# `{}`", prefixed),
    }
}

/// Upper-case the first letter and drop one trailing period.
fn sentence_case(desc: &str) -> String {
    let trimmed = desc.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Notice lines for one rule, in configured order.
pub fn render_notices(
    rule: &RuleDetails,
    ctx: &HeaderContext<'_>,
) -> Result<Vec<String>, RenderError> {
    let mut out = Vec::new();
    for kind in ctx.notices {
        let notice = notice_for(*kind);
        if notice.applies(rule, ctx) {
            out.push(notice.render(rule, ctx)?);
        }
    }
    Ok(out)
}

/// Full header block: title, notices, end marker; one blank line between each.
pub fn render_rule_header(
    rule: &RuleDetails,
    ctx: &HeaderContext<'_>,
) -> Result<Vec<String>, RenderError> {
    let mut parts = vec![render_title(rule, ctx.prefix, ctx.title_format)];
    parts.extend(render_notices(rule, ctx)?);
    parts.push(END_RULE_HEADER_MARKER.to_string());

    let mut lines = Vec::with_capacity(parts.len() * 2);
    for (i, p) in parts.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(p);
    }
    Ok(lines)
}
