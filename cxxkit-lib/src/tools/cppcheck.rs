use super::{RunContext, Tool};
use crate::commands::Host;
use crate::config::{Config, CppcheckConfig};
use crate::reports::{ToolOutcome, ToolSummary, console};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

const LOG_TARGET: &str = "  cppcheck";

/// Build the cppcheck command line for one source directory.
#[must_use]
pub fn command(config: &CppcheckConfig, dir: &Utf8Path) -> Vec<String> {
    let mut command = vec![config.program.clone(), format!("--enable={}", config.enable)];
    if config.inconclusive {
        command.push("--inconclusive".to_string());
    }
    command.push(format!("--std={}", config.std));
    command.extend(config.suppressions.iter().map(|id| format!("--suppress={id}")));
    command.push("--quiet".to_string());
    command.push(format!("--template={}", config.template));
    command.push(dir.to_string());
    command
}

/// The configured source directories that exist below `root`, in configuration order.
#[must_use]
pub fn existing_source_dirs(root: &Utf8Path, source_dirs: &[String]) -> Vec<Utf8PathBuf> {
    source_dirs
        .iter()
        .map(|dir| root.join(dir))
        .filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                log::debug!(target: LOG_TARGET, "Skipping missing source directory '{dir}'");
            }
            exists
        })
        .collect()
}

/// Run cppcheck once per existing source directory and relay its diagnostics.
pub async fn run<H: Host>(host: &mut H, ctx: &RunContext, config: &Config, root: &Utf8Path) -> ToolOutcome {
    console::write_banner(&mut host.output(), &format!("Running {}...", Tool::Cppcheck), ctx.use_colors);

    let dirs = existing_source_dirs(root, &config.source_dirs);
    if dirs.is_empty() {
        let _ = writeln!(
            host.output(),
            "No source directories found (looked for: {}).",
            config.source_dirs.join(", ")
        );
        return ToolOutcome::Finished(ToolSummary::default());
    }

    let mut summary = ToolSummary {
        items: dirs.len(),
        ..ToolSummary::default()
    };
    let mut issues = String::new();
    let mut notes = String::new();

    for dir in &dirs {
        match ctx.dispatcher.dispatch(command(&config.cppcheck, dir)).await {
            Ok(result) => {
                if !result.stdout.trim().is_empty() {
                    summary.flagged += 1;
                    issues.push_str(&result.stdout);
                }
                notes.push_str(&result.stderr);
                summary.exit_code |= result.exit_code;
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not run cppcheck on '{dir}': {e:#}");
                let _ = writeln!(host.error(), "Error running cppcheck on {dir}: {e}");
                summary.failures += 1;
                summary.exit_code |= 1;
            }
        }
    }

    if issues.is_empty() {
        let _ = writeln!(host.output(), "No issues found by cppcheck!");
    } else {
        let _ = writeln!(host.output(), "Issues found:");
        let _ = writeln!(host.output(), "{}", issues.trim_end());
    }

    if !notes.trim().is_empty() {
        let _ = writeln!(host.output(), "Warnings/Info:");
        let _ = writeln!(host.output(), "{}", notes.trim_end());
    }

    ToolOutcome::Finished(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_command() {
        let config = CppcheckConfig::default();

        let command = command(&config, Utf8Path::new("./src"));

        assert_eq!(
            command,
            vec![
                "cppcheck",
                "--enable=all",
                "--inconclusive",
                "--std=c++17",
                "--suppress=missingIncludeSystem",
                "--suppress=unusedFunction",
                "--quiet",
                "--template={file}:{line}: {severity}: {message} [{id}]",
                "./src",
            ]
        );
    }

    #[test]
    fn test_command_follows_configuration() {
        let config = CppcheckConfig {
            program: "cppcheck-2.13".to_string(),
            enable: "warning,style".to_string(),
            inconclusive: false,
            std: "c++20".to_string(),
            suppressions: Vec::new(),
            template: "gcc".to_string(),
        };

        let command = command(&config, Utf8Path::new("lib"));

        assert_eq!(
            command,
            vec!["cppcheck-2.13", "--enable=warning,style", "--std=c++20", "--quiet", "--template=gcc", "lib"]
        );
    }

    #[test]
    fn test_missing_source_dirs_are_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap();
        fs::create_dir(root.join("include")).unwrap();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("lib"), "not a directory").unwrap();

        let dirs = existing_source_dirs(root, &["src".to_string(), "missing".to_string(), "lib".to_string(), "include".to_string()]);

        assert_eq!(dirs, vec![root.join("src"), root.join("include")]);
    }
}
