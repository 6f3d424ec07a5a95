use super::{RunContext, Tool, per_file};
use crate::commands::Host;
use crate::config::{ClangTidyConfig, Config};
use crate::files::FileSelection;
use crate::reports::{ToolOutcome, ToolSummary, console};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

const LOG_TARGET: &str = "clang-tidy";

/// Marker clang-tidy prints in front of every diagnostic worth reporting.
const WARNING_MARKER: &str = "warning:";

/// Resolve the build directory against the run root unless it is already absolute.
#[must_use]
pub fn resolve_build_dir(root: &Utf8Path, build_dir: &Utf8Path) -> Utf8PathBuf {
    if build_dir.is_absolute() {
        build_dir.to_path_buf()
    } else {
        root.join(build_dir)
    }
}

/// Path of the compiled-command database clang-tidy reads from `build_dir`.
#[must_use]
pub fn compile_commands_path(config: &ClangTidyConfig, build_dir: &Utf8Path) -> Utf8PathBuf {
    build_dir.join(&config.compile_commands)
}

/// The compiled-command database path, if it is missing.
#[must_use]
pub fn missing_compile_commands(config: &ClangTidyConfig, build_dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let path = compile_commands_path(config, build_dir);
    if path.is_file() {
        None
    } else {
        log::debug!(target: LOG_TARGET, "No compiled-command database at '{path}'");
        Some(path)
    }
}

/// Explain how to produce the missing compiled-command database.
pub fn report_missing_compile_commands<H: Host>(host: &mut H, path: &Utf8Path, use_colors: bool) -> ToolOutcome {
    console::write_banner(&mut host.output(), &format!("Running {}...", Tool::ClangTidy), use_colors);
    let _ = writeln!(host.output(), "ERROR: {path} not found!");
    let _ = writeln!(host.output(), "Please build the project with CMAKE_EXPORT_COMPILE_COMMANDS=ON");

    ToolOutcome::PreconditionMissing {
        reason: format!("{path} not found"),
    }
}

/// Build the clang-tidy command line for one source file.
#[must_use]
pub fn command(config: &ClangTidyConfig, file: &Utf8Path, build_dir: &Utf8Path) -> Vec<String> {
    let mut command = vec![
        config.program.clone(),
        file.to_string(),
        format!("-p={build_dir}"),
        "--quiet".to_string(),
    ];
    command.extend(config.extra_args.iter().cloned());
    command
}

/// Whether clang-tidy's output holds at least one warning.
#[must_use]
pub fn has_warnings(stdout: &str) -> bool {
    stdout.contains(WARNING_MARKER)
}

/// Run clang-tidy on every source file below `root`.
///
/// The compiled-command database is expected to exist already; see [`missing_compile_commands`].
pub async fn run<H: Host>(host: &mut H, ctx: &RunContext, config: &Config, root: &Utf8Path, build_dir: &Utf8Path) -> ToolOutcome {
    console::write_banner(&mut host.output(), &format!("Running {}...", Tool::ClangTidy), ctx.use_colors);

    let files = FileSelection::new(root, &config.exclude_dirs, &config.clang_tidy.extensions).enumerate();
    if files.is_empty() {
        let _ = writeln!(host.output(), "No source files found!");
        return ToolOutcome::Finished(ToolSummary::default());
    }

    let _ = writeln!(host.output(), "Analyzing {} source files...", files.len());

    let mut summary = ToolSummary {
        items: files.len(),
        ..ToolSummary::default()
    };

    per_file::dispatch_each(
        ctx,
        "Analyzing",
        &files,
        |file| command(&config.clang_tidy, file, build_dir),
        |file, result| match result {
            Ok(result) => {
                if has_warnings(&result.stdout) {
                    summary.flagged += 1;
                    let _ = writeln!(host.output(), "\nIssues in {file}:");
                    let _ = writeln!(host.output(), "{}", result.stdout.trim_end());
                }
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not analyze '{file}': {e:#}");
                let _ = writeln!(host.error(), "Error analyzing {file}: {e}");
                summary.failures += 1;
            }
        },
    )
    .await;

    if summary.flagged == 0 {
        let _ = writeln!(host.output(), "No issues found by clang-tidy!");
    } else {
        let _ = writeln!(host.output(), "\nclang-tidy found issues in {} files.", summary.flagged);
    }

    if summary.failures > 0 || (config.clang_tidy.fail_on_warnings && summary.flagged > 0) {
        summary.exit_code = 1;
    }

    ToolOutcome::Finished(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_relative_build_dir_is_resolved_against_root() {
        assert_eq!(resolve_build_dir(Utf8Path::new("proj"), Utf8Path::new("out")), Utf8PathBuf::from("proj/out"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_build_dir_is_kept() {
        assert_eq!(resolve_build_dir(Utf8Path::new("proj"), Utf8Path::new("/tmp/out")), Utf8PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_missing_compile_commands_is_detected() {
        let temp = tempfile::tempdir().unwrap();
        let build_dir = Utf8Path::from_path(temp.path()).unwrap();
        let config = ClangTidyConfig::default();

        assert_eq!(
            missing_compile_commands(&config, build_dir),
            Some(build_dir.join("compile_commands.json"))
        );

        fs::write(build_dir.join("compile_commands.json"), "[]").unwrap();
        assert_eq!(missing_compile_commands(&config, build_dir), None);
    }

    #[test]
    fn test_custom_compile_commands_name() {
        let config = ClangTidyConfig {
            compile_commands: "db.json".to_string(),
            ..ClangTidyConfig::default()
        };

        assert_eq!(compile_commands_path(&config, Utf8Path::new("out")), Utf8PathBuf::from("out/db.json"));
    }

    #[test]
    fn test_command_shape() {
        let config = ClangTidyConfig {
            extra_args: vec!["--checks=-*,modernize-*".to_string()],
            ..ClangTidyConfig::default()
        };

        let command = command(&config, Utf8Path::new("./src/a.cpp"), Utf8Path::new("./build"));

        assert_eq!(command, vec!["clang-tidy", "./src/a.cpp", "-p=./build", "--quiet", "--checks=-*,modernize-*"]);
    }

    #[test]
    fn test_has_warnings() {
        assert!(has_warnings("a.cpp:3:5: warning: use nullptr [modernize-use-nullptr]\n"));
        assert!(!has_warnings(""));
        assert!(!has_warnings("3 warnings generated.\n"));
    }
}
