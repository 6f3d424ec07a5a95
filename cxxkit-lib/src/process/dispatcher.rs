use super::{InvocationResult, LOG_TARGET};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::process::Stdio;
use tokio::process::Command;

/// Runs external commands as child processes and captures their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher; with `timeout` set, children running longer are killed
    #[must_use]
    pub const fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run `command` (executable first, then its arguments) to completion.
    ///
    /// A non-zero exit code is returned as part of the [`InvocationResult`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `command` is empty, the process cannot be spawned (for example
    /// because the executable does not exist), waiting on it fails, or it exceeds the timeout
    pub async fn dispatch(&self, command: Vec<String>) -> Result<InvocationResult> {
        let Some((program, args)) = command.split_first() else {
            bail!("cannot run an empty command");
        };

        log::debug!(target: LOG_TARGET, "Running '{}'", command.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .into_app_err_with(|| format!("could not spawn '{program}'"))?;

        let output = match self.timeout {
            None => child
                .wait_with_output()
                .await
                .into_app_err_with(|| format!("'{}' failed to run", command.join(" ")))?,
            Some(timeout) => match tokio::time::timeout(timeout, child.wait_with_output()).await {
                Ok(Ok(output)) => output,
                Ok(Err(e)) => return Err(e).into_app_err_with(|| format!("'{}' failed to run", command.join(" "))),
                Err(_) => {
                    bail!("'{}' timed out after {timeout:?}", command.join(" "));
                }
            },
        };

        let result = InvocationResult::from_output(command, &output);
        log::debug!(target: LOG_TARGET, "'{}' exited with code {}", result.command_line(), result.exit_code);
        Ok(result)
    }
}
