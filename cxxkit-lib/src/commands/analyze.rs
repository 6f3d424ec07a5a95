use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::process::probe;
use crate::reports::{RunReport, ToolOutcome, console};
use crate::tools::{Tool, clang_tidy, cppcheck, iwyu};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};

const LOG_TARGET: &str = "   analyze";

/// Which analyzers to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToolSelection {
    /// Run cppcheck over the configured source directories
    Cppcheck,

    /// Run clang-tidy over every source file
    ClangTidy,

    /// Show how to set up include-what-you-use
    Iwyu,

    /// Run every analyzer
    All,
}

impl ToolSelection {
    /// The selected analyzers, in the order they run
    #[must_use]
    pub fn analyzers(self) -> Vec<Analyzer> {
        match self {
            Self::Cppcheck => vec![Analyzer::Cppcheck],
            Self::ClangTidy => vec![Analyzer::ClangTidy],
            Self::Iwyu => vec![Analyzer::Iwyu],
            Self::All => vec![Analyzer::Cppcheck, Analyzer::ClangTidy, Analyzer::Iwyu],
        }
    }
}

/// The tools `cxx-analyze` can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    Cppcheck,
    ClangTidy,
    Iwyu,
}

impl Analyzer {
    #[must_use]
    pub const fn tool(self) -> Tool {
        match self {
            Self::Cppcheck => Tool::Cppcheck,
            Self::ClangTidy => Tool::ClangTidy,
            Self::Iwyu => Tool::Iwyu,
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Which tool to run
    #[arg(long, value_name = "TOOL", default_value = "all")]
    pub tool: ToolSelection,

    /// Build directory holding the compiled-command database (for clang-tidy)
    #[arg(long, value_name = "PATH", default_value = "build")]
    pub build_dir: Utf8PathBuf,

    /// Directory to analyze
    #[arg(long, short = 'd', value_name = "PATH", default_value = ".")]
    pub directory: Utf8PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// What to do with a tool once its prerequisites have been checked.
enum Plan {
    Run,
    NotInstalled,
    MissingCompileCommands(Utf8PathBuf),
}

/// Run the selected analyzers and report their combined result.
///
/// Every selected tool is checked before any of them runs. Tools that are not installed are
/// skipped, and one tool failing never stops the others. The host is asked to exit with the
/// bitwise OR of the tools' exit codes when that is non-zero.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded
pub async fn analyze<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    let session = Session::new(host, &args.common, &args.directory)?;
    let ctx = session.ctx;
    let config = &session.config;
    let root = session.root.as_path();
    let build_dir = clang_tidy::resolve_build_dir(root, &args.build_dir);

    console::write_header(&mut host.output(), "C++ Static Analysis", ctx.use_colors);

    let mut plans = Vec::new();
    for analyzer in args.tool.analyzers() {
        let plan = plan_analyzer(host, analyzer, &session, &build_dir).await;
        plans.push((analyzer, plan));
    }

    let mut report = RunReport::new();
    for (analyzer, plan) in plans {
        let outcome = match plan {
            Plan::NotInstalled => ToolOutcome::Unavailable { required: false },
            Plan::MissingCompileCommands(path) => clang_tidy::report_missing_compile_commands(host, &path, ctx.use_colors),
            Plan::Run => match analyzer {
                Analyzer::Cppcheck => cppcheck::run(host, &ctx, config, root).await,
                Analyzer::ClangTidy => clang_tidy::run(host, &ctx, config, root, &build_dir).await,
                Analyzer::Iwyu => iwyu::run(host, ctx.use_colors),
            },
        };

        let tool = analyzer.tool();
        log::info!(target: LOG_TARGET, "{tool}: {outcome:?}");
        report.record(tool, outcome);
    }

    console::write_summary(&mut host.output(), &report, ctx.use_colors);

    let exit_code = report.overall_exit_code();
    if exit_code != 0 {
        host.exit(exit_code);
    }

    Ok(())
}

/// Probe an analyzer and check its prerequisites, reporting what was found.
///
/// Prerequisites are only checked for installed analyzers, so an absent clang-tidy is skipped
/// whether or not a compiled-command database exists.
async fn plan_analyzer<H: Host>(host: &mut H, analyzer: Analyzer, session: &Session, build_dir: &Utf8Path) -> Plan {
    let spec = analyzer.tool().spec(&session.config);
    let outcome = probe(&spec).await;
    console::write_probe(&mut host.output(), &spec, &outcome, session.ctx.use_colors);

    if !outcome.is_available() {
        return Plan::NotInstalled;
    }

    match analyzer {
        Analyzer::ClangTidy => clang_tidy::missing_compile_commands(&session.config.clang_tidy, build_dir)
            .map_or(Plan::Run, Plan::MissingCompileCommands),
        Analyzer::Cppcheck | Analyzer::Iwyu => Plan::Run,
    }
}
