use super::{LOG_TARGET, ToolSpec};
use std::io;
use std::process::Stdio;
use tokio::process::Command;

/// Result of checking whether a tool can be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The tool answered its version query; `version` is the first line it printed
    Found { version: String },

    /// The OS could not locate the executable
    NotFound,

    /// The executable ran but the version query failed
    Failed { exit_code: i32 },

    /// The executable could not be started for a reason other than not being found
    Unrunnable { reason: String },
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Run the tool's version query to find out whether it is installed.
///
/// Never fails: a missing executable is the expected way for a tool to be absent, and any
/// other problem starting it is reported as the tool being unavailable.
pub async fn probe(spec: &ToolSpec) -> ProbeOutcome {
    let result = Command::new(spec.program())
        .args(spec.probe_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = stdout.lines().map(str::trim).find(|line| !line.is_empty()).unwrap_or_default().to_string();
            log::debug!(target: LOG_TARGET, "Found {} ('{}'): {version}", spec.name(), spec.program());
            ProbeOutcome::Found { version }
        }
        Ok(output) => {
            let exit_code = output.status.code().unwrap_or(1);
            log::warn!(
                target: LOG_TARGET,
                "'{} {}' exited with code {exit_code}: {}",
                spec.program(),
                spec.probe_args().join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            ProbeOutcome::Failed { exit_code }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(target: LOG_TARGET, "'{}' was not found", spec.program());
            ProbeOutcome::NotFound
        }
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not run '{}': {e}", spec.program());
            ProbeOutcome::Unrunnable { reason: e.to_string() }
        }
    }
}
