use std::process::Output;

/// Exit code recorded for a child that was terminated by a signal and so has none of its own.
const SIGNALLED_EXIT_CODE: i32 = 1;

/// Outcome of one child-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub command: Vec<String>,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    #[must_use]
    pub fn from_output(command: Vec<String>, output: &Output) -> Self {
        Self {
            command,
            exit_code: output.status.code().unwrap_or(SIGNALLED_EXIT_CODE),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The command joined with spaces, for display
    #[must_use]
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
