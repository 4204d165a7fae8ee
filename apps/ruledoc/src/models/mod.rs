//! Shared data models: normalized rule details, validation issues and the
//! per-file actions produced by a generate run.

pub mod plugin;
pub mod tags;

use serde::Serialize;
use serde_json::Value as Json;
use tags::RuleType;

#[derive(Debug, Clone, PartialEq)]
/// Canonical, display-ready facts about one rule.
pub struct RuleDetails {
    pub name: String,
    pub description: Option<String>,
    pub fixable: bool,
    pub has_suggestions: bool,
    pub requires_type_checking: bool,
    pub deprecated: bool,
    pub replaced_by: Vec<String>,
    pub schema: Json,
    pub rule_type: Option<RuleType>,
}

impl RuleDetails {
    /// Details with every flag off, mainly for building fixtures.
    pub fn new(name: impl Into<String>) -> Self {
        RuleDetails {
            name: name.into(),
            description: None,
            fixable: false,
            has_suggestions: false,
            requires_type_checking: false,
            deprecated: false,
            replaced_by: Vec::new(),
            schema: Json::Array(Vec::new()),
            rule_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// What a validation issue is about.
pub enum IssueKind {
    OptionsSection,
    OptionMention,
    RequiredSection,
    ForbiddenSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single validation failure in a rule doc.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocKind {
    RuleDoc,
    RuleList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome for one target file.
pub struct DocAction {
    pub file: String,
    pub kind: DocKind,
    /// Freshly rendered content differs from what is on disk.
    pub changed: bool,
    pub wrote: bool,
    /// The file did not exist and was (or would be) created.
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub files: usize,
    pub changed: usize,
    pub wrote: usize,
    pub issues: usize,
}

#[derive(Debug, Default, Serialize)]
/// Everything a generate run produced.
pub struct Report {
    pub actions: Vec<DocAction>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn summary(&self) -> Summary {
        Summary {
            files: self.actions.len(),
            changed: self.actions.iter().filter(|a| a.changed).count(),
            wrote: self.actions.iter().filter(|a| a.wrote).count(),
            issues: self.issues.len(),
        }
    }

    /// Files whose rendered content drifted from disk.
    pub fn drifted(&self) -> impl Iterator<Item = &DocAction> {
        self.actions.iter().filter(|a| a.changed)
    }

    /// Whether the run should exit non-zero: any validation issue, or any
    /// drift when nothing was allowed to be written.
    pub fn failed(&self, check: bool) -> bool {
        !self.issues.is_empty() || (check && self.drifted().next().is_some())
    }
}
