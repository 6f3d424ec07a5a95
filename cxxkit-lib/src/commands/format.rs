use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::files::FileSelection;
use crate::process::{ProbeOutcome, probe};
use crate::reports::{RunReport, ToolOutcome, ToolSummary};
use crate::tools::Tool;
use crate::tools::clang_format::{self, FormatMode};
use camino::Utf8PathBuf;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Check if files need formatting without changing them
    #[arg(long)]
    pub check: bool,

    /// Directory to format
    #[arg(long, short = 'd', value_name = "PATH", default_value = ".")]
    pub directory: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Check or apply clang-format over every source file below the target directory.
///
/// The host is asked to exit with status 1 when clang-format is not installed, when files
/// need formatting in check mode, or when any file could not be handled.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded
pub async fn format<H: Host>(host: &mut H, args: &FormatArgs) -> Result<()> {
    let session = Session::new(host, &args.common, &args.directory)?;
    let config = &session.config;
    let mut report = RunReport::new();

    let spec = Tool::ClangFormat.spec(config);
    match probe(&spec).await {
        ProbeOutcome::Found { version } => {
            let _ = writeln!(host.output(), "Found {}: {version}", spec.name());
            let outcome = format_files(host, &session, args.check).await;
            report.record(Tool::ClangFormat, outcome);
        }
        _ => {
            let _ = writeln!(host.error(), "ERROR: {} not found!", spec.name());
            let _ = writeln!(host.error(), "Please install {}:", spec.name());
            for line in spec.install_hint().lines() {
                let _ = writeln!(host.error(), "  {line}");
            }
            report.record(Tool::ClangFormat, ToolOutcome::Unavailable { required: true });
        }
    }

    let exit_code = report.overall_exit_code();
    if exit_code != 0 {
        host.exit(exit_code);
    }

    Ok(())
}

async fn format_files<H: Host>(host: &mut H, session: &Session, check: bool) -> ToolOutcome {
    let root = &session.root;
    let shown_root = std::path::absolute(root).map_or_else(|_| root.to_string(), |path| path.display().to_string());
    let _ = writeln!(host.output(), "Searching for source files in: {shown_root}");

    let files = FileSelection::new(root, &session.config.exclude_dirs, &session.config.clang_format.extensions).enumerate();
    if files.is_empty() {
        let _ = writeln!(host.output(), "No source files found.");
        return ToolOutcome::Finished(ToolSummary::default());
    }

    let _ = writeln!(host.output(), "Found {} source files.", files.len());

    let mode = if check { FormatMode::Check } else { FormatMode::Apply };
    let summary = clang_format::run(host, &session.ctx, &session.config.clang_format, &files, mode).await;
    ToolOutcome::Finished(summary)
}
