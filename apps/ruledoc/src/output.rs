//! Output rendering for generate runs.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file results, validation issues and a top-level summary.

use crate::models::{DocAction, Report};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, color: bool, f: impl Fn(&str) -> String) -> String {
    if color {
        f(text)
    } else {
        text.to_string()
    }
}

/// Print a generate report in the requested format.
pub fn print_report(report: &Report, output: &str, check: bool) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_report_json(report, check)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("failed to encode report: {}", e),
        },
        _ => {
            let color = use_colors(output);
            for a in &report.actions {
                if let Some(line) = action_line(a, check, color) {
                    println!("{}", line);
                }
            }
            for is in &report.issues {
                let sev = paint("⟦error⟧", color, |s| s.red().bold().to_string());
                let file = paint(&is.file, color, |s| s.bold().to_string());
                println!("✖ {} {} ❲{}❳ — {}", sev, file, is.rule, is.message);
            }
            let s = report.summary();
            let summary = format!(
                "— Summary — files={} changed={} wrote={} issues={}",
                s.files, s.changed, s.wrote, s.issues
            );
            println!("{}", paint(&summary, color, |s| s.bold().to_string()));
        }
    }
}

fn action_line(a: &DocAction, check: bool, color: bool) -> Option<String> {
    if check {
        if !a.changed {
            return None;
        }
        let label = if a.created { "missing:" } else { "out of date:" };
        return Some(format!(
            "{} {}",
            paint(label, color, |s| s.yellow().bold().to_string()),
            a.file
        ));
    }
    if a.wrote {
        let label = if a.created { "📄 created:" } else { "✏️  updated:" };
        Some(format!(
            "{} {}",
            paint(label, color, |s| s.green().bold().to_string()),
            paint(&a.file, color, |s| s.bold().to_string())
        ))
    } else {
        Some(format!(
            "{} {}",
            paint("no changes:", color, |s| s.bright_black().to_string()),
            a.file
        ))
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report, check: bool) -> JsonVal {
    let s = report.summary();
    json!({
        "results": report.actions,
        "issues": report.issues,
        "summary": {
            "files": s.files,
            "changed": s.changed,
            "wrote": s.wrote,
            "issues": s.issues,
            "check": check,
        },
    })
}
