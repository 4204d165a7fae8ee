//! Rule doc content checks.
//!
//! Checks run against the rule doc as it was before the header update and
//! each violation becomes its own [`Issue`]. Nothing here aborts a run.

use crate::models::{Issue, IssueKind, RuleDetails};
use crate::schema;
use regex::Regex;

/// Headings that count as an options section.
pub const OPTIONS_HEADERS: &[&str] = &["Options", "Config"];

/// Whether any markdown heading line contains one of `headers`.
pub fn has_section_header(contents: &str, headers: &[&str]) -> bool {
    headers.iter().any(|h| {
        let pattern = format!(r"(?m)^#+ .*{}.*$", regex::escape(h));
        // Escaped input always yields a valid pattern.
        Regex::new(&pattern)
            .map(|re| re.is_match(contents))
            .unwrap_or(false)
    })
}

/// Rules with options must have an options section. Rules without options
/// are never flagged, whatever the doc contains.
pub fn check_options_section(file: &str, rule: &RuleDetails, contents: &str) -> Option<Issue> {
    if !schema::has_options(&rule.schema) || has_section_header(contents, OPTIONS_HEADERS) {
        return None;
    }
    Some(Issue {
        file: file.to_string(),
        rule: rule.name.clone(),
        kind: IssueKind::OptionsSection,
        message: format!(
            "`{}` rule doc should have included one of these headers: {}",
            rule.name,
            OPTIONS_HEADERS.join(", ")
        ),
    })
}

/// Every named option must be mentioned somewhere in the doc.
pub fn check_option_mentions(file: &str, rule: &RuleDetails, contents: &str) -> Vec<Issue> {
    if !schema::has_options(&rule.schema) {
        return Vec::new();
    }
    schema::named_options(&rule.schema)
        .into_iter()
        .filter(|opt| !contents.contains(opt.as_str()))
        .map(|opt| Issue {
            file: file.to_string(),
            rule: rule.name.clone(),
            kind: IssueKind::OptionMention,
            message: format!("`{}` rule doc should have included rule option: {}", rule.name, opt),
        })
        .collect()
}

/// Required and forbidden section headings from configuration.
pub fn check_sections(
    file: &str,
    rule: &RuleDetails,
    contents: &str,
    include: &[String],
    exclude: &[String],
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for section in include {
        if !has_section_header(contents, &[section.as_str()]) {
            issues.push(Issue {
                file: file.to_string(),
                rule: rule.name.clone(),
                kind: IssueKind::RequiredSection,
                message: format!(
                    "`{}` rule doc should have included the header: {}",
                    rule.name, section
                ),
            });
        }
    }
    for section in exclude {
        if has_section_header(contents, &[section.as_str()]) {
            issues.push(Issue {
                file: file.to_string(),
                rule: rule.name.clone(),
                kind: IssueKind::ForbiddenSection,
                message: format!(
                    "`{}` rule doc should not have included the header: {}",
                    rule.name, section
                ),
            });
        }
    }
    issues
}

/// All checks for one rule doc, in a stable order.
pub fn check_rule_doc(
    file: &str,
    rule: &RuleDetails,
    contents: &str,
    include: &[String],
    exclude: &[String],
) -> Vec<Issue> {
    let mut issues: Vec<Issue> = check_options_section(file, rule, contents).into_iter().collect();
    issues.extend(check_option_mentions(file, rule, contents));
    issues.extend(check_sections(file, rule, contents, include, exclude));
    issues
}
