//! Tool probing and child-process dispatch
//!
//! # Implementation Model
//!
//! Everything cxxkit does to the codebase is done by external executables. This module owns
//! the two ways they are started:
//!
//! - [`probe`] runs a tool with its version flag to find out whether it is installed. A tool
//!   the OS cannot locate is reported as absent, never as an error.
//! - [`Dispatcher`] runs a full command line and captures its output. A non-zero exit code is
//!   an ordinary result that callers interpret; only failing to start the process (or running
//!   past the configured timeout) is an error.

mod dispatcher;
mod invocation_result;
mod probe;
mod tool_spec;

pub(crate) const LOG_TARGET: &str = "   process";

pub use dispatcher::Dispatcher;
pub use invocation_result::InvocationResult;
pub use probe::{ProbeOutcome, probe};
pub use tool_spec::ToolSpec;
