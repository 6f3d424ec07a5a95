use super::{RunReport, ToolOutcome};
use crate::process::{ProbeOutcome, ToolSpec};
use owo_colors::OwoColorize;
use std::io::Write;

/// Width of the `=` rules framing headings.
pub const RULE_WIDTH: usize = 60;

/// Width of the tool column in the summary table.
const TOOL_COLUMN_WIDTH: usize = 22;

/// Width of the status column in the summary table.
const STATUS_COLUMN_WIDTH: usize = 10;

pub fn write_rule<W: Write>(out: &mut W) {
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

/// Write a title followed by a rule, used at the top of a run.
pub fn write_header<W: Write>(out: &mut W, title: &str, use_colors: bool) {
    if use_colors {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{title}");
    }
    write_rule(out);
}

/// Write the framed heading that opens each tool's section.
pub fn write_banner<W: Write>(out: &mut W, heading: &str, use_colors: bool) {
    let _ = writeln!(out);
    write_rule(out);
    if use_colors {
        let _ = writeln!(out, "{}", heading.bold());
    } else {
        let _ = writeln!(out, "{heading}");
    }
    write_rule(out);
}

/// Report whether a tool was found, with its install hint when it was not.
pub fn write_probe<W: Write>(out: &mut W, spec: &ToolSpec, outcome: &ProbeOutcome, use_colors: bool) {
    if outcome.is_available() {
        if use_colors {
            let _ = writeln!(out, "{} Found {}", "✓".green().bold(), spec.name());
        } else {
            let _ = writeln!(out, "✓ Found {}", spec.name());
        }
        return;
    }

    if use_colors {
        let _ = writeln!(out, "{} {} not found", "✗".red().bold(), spec.name());
    } else {
        let _ = writeln!(out, "✗ {} not found", spec.name());
    }

    for (index, line) in spec.install_hint().lines().enumerate() {
        if index == 0 {
            let _ = writeln!(out, "  Install: {line}");
        } else {
            let _ = writeln!(out, "           {line}");
        }
    }
}

/// Write the per-tool summary table and the closing banner.
pub fn write_summary<W: Write>(out: &mut W, report: &RunReport, use_colors: bool) {
    if report.outcomes().next().is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary:");
        for (tool, outcome) in report.outcomes() {
            let status = format!("{:<STATUS_COLUMN_WIDTH$}", status_label(outcome));
            let status = if use_colors {
                match status_color(outcome) {
                    StatusColor::Good => status.green().to_string(),
                    StatusColor::Notice => status.yellow().to_string(),
                    StatusColor::Bad => status.red().to_string(),
                }
            } else {
                status
            };

            let name: &str = tool.into();
            let _ = writeln!(out, "  {name:<TOOL_COLUMN_WIDTH$}{status}{}", details(outcome));
        }
    }

    write_banner(out, "Static analysis completed!", use_colors);
}

enum StatusColor {
    Good,
    Notice,
    Bad,
}

const fn status_color(outcome: &ToolOutcome) -> StatusColor {
    match outcome {
        ToolOutcome::Unavailable { required: false } => StatusColor::Notice,
        ToolOutcome::Unavailable { required: true } | ToolOutcome::PreconditionMissing { .. } => StatusColor::Bad,
        ToolOutcome::Finished(summary) => {
            if summary.exit_code != 0 {
                StatusColor::Bad
            } else if summary.flagged > 0 {
                StatusColor::Notice
            } else {
                StatusColor::Good
            }
        }
    }
}

const fn status_label(outcome: &ToolOutcome) -> &'static str {
    match outcome {
        ToolOutcome::Unavailable { .. } => "skipped",
        ToolOutcome::PreconditionMissing { .. } => "error",
        ToolOutcome::Finished(summary) => {
            if summary.exit_code != 0 {
                "failed"
            } else if summary.flagged > 0 {
                "issues"
            } else {
                "ok"
            }
        }
    }
}

fn details(outcome: &ToolOutcome) -> String {
    match outcome {
        ToolOutcome::Unavailable { .. } => "not installed".to_string(),
        ToolOutcome::PreconditionMissing { reason } => reason.clone(),
        ToolOutcome::Finished(summary) => {
            if summary.failures > 0 {
                format!(
                    "{} checked, {} flagged, {} could not be run",
                    summary.items, summary.flagged, summary.failures
                )
            } else {
                format!("{} checked, {} flagged", summary.items, summary.flagged)
            }
        }
    }
}
