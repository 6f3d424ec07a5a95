use super::{RunContext, per_file};
use crate::commands::Host;
use crate::config::ClangFormatConfig;
use crate::reports::ToolSummary;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

const LOG_TARGET: &str = "    format";

/// Whether files are only checked or rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Report files that need formatting without touching them
    Check,

    /// Format files in place
    Apply,
}

/// Build the clang-format command line for one file.
#[must_use]
pub fn command(config: &ClangFormatConfig, mode: FormatMode, file: &Utf8Path) -> Vec<String> {
    let mut command = vec![config.program.clone()];
    match mode {
        FormatMode::Check => command.extend(["--dry-run".to_string(), "--Werror".to_string()]),
        FormatMode::Apply => command.push("-i".to_string()),
    }
    command.push(file.to_string());
    command
}

/// Check or format every file and print a line per file followed by a summary.
///
/// In check mode `flagged` counts files needing formatting; in apply mode it counts files
/// that were formatted. The exit code is 1 when any file needs formatting (check mode) or
/// could not be handled.
pub async fn run<H: Host>(host: &mut H, ctx: &RunContext, config: &ClangFormatConfig, files: &[Utf8PathBuf], mode: FormatMode) -> ToolSummary {
    let mut summary = ToolSummary {
        items: files.len(),
        ..ToolSummary::default()
    };

    let phase = match mode {
        FormatMode::Check => {
            let _ = writeln!(host.output(), "Checking formatting...");
            "Checking"
        }
        FormatMode::Apply => {
            let _ = writeln!(host.output(), "Formatting files...");
            "Formatting"
        }
    };

    per_file::dispatch_each(
        ctx,
        phase,
        files,
        |file| command(config, mode, file),
        |file, result| match (mode, result) {
            (FormatMode::Check, Ok(result)) if result.success() => {
                let _ = writeln!(host.output(), "  OK: {file}");
            }
            (FormatMode::Check, Ok(_)) => {
                summary.flagged += 1;
                let _ = writeln!(host.output(), "  NEEDS FORMATTING: {file}");
            }
            (FormatMode::Apply, Ok(result)) if result.success() => {
                summary.flagged += 1;
                let _ = writeln!(host.output(), "  FORMATTED: {file}");
            }
            (FormatMode::Apply, Ok(result)) => {
                log::error!(
                    target: LOG_TARGET,
                    "'{}' exited with code {}: {}",
                    result.command_line(),
                    result.exit_code,
                    result.stderr.trim()
                );
                summary.failures += 1;
                let _ = writeln!(host.output(), "  ERROR: {file}");
            }
            (_, Err(e)) => {
                log::error!(target: LOG_TARGET, "Could not run clang-format on '{file}': {e:#}");
                summary.failures += 1;
                let _ = writeln!(host.output(), "  ERROR: {file}");
                let _ = writeln!(host.error(), "Error formatting {file}: {e}");
            }
        },
    )
    .await;

    match mode {
        FormatMode::Check => {
            if summary.flagged > 0 {
                let _ = writeln!(host.output(), "\n{} files need formatting.", summary.flagged);
                let _ = writeln!(host.output(), "Run without --check to format them.");
            } else if summary.failures == 0 {
                let _ = writeln!(host.output(), "\nAll files are properly formatted.");
            }

            if summary.failures > 0 {
                let _ = writeln!(host.output(), "\nCould not check {} files.", summary.failures);
            }
        }
        FormatMode::Apply => {
            let _ = writeln!(host.output(), "\nFormatted {}/{} files.", summary.flagged, summary.items);
        }
    }

    if summary.failures > 0 || (mode == FormatMode::Check && summary.flagged > 0) {
        summary.exit_code = 1;
    }

    summary
}
