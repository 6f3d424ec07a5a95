//! Command-line interface and orchestration for cxxkit
//!
//! This module implements the two cxxkit commands and coordinates the other modules to run
//! external tools over a source tree and report on the results.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **analyze** (`cxx-analyze`): Checks which of cppcheck, clang-tidy and
//!   include-what-you-use are installed, runs the selected ones, prints each tool's findings
//!   and finishes with a per-tool summary
//! - **format** (`cxx-format`): Runs clang-format over every source file, either checking
//!   which files need formatting or formatting them in place
//!
//! ## Execution Flow
//!
//! The `run_analyze` and `run_format` functions parse command-line arguments with clap and
//! hand them to the command. Both commands follow the same pattern:
//!
//! 1. Initialize logging and load configuration
//! 2. Probe the tools they need
//! 3. Enumerate files and dispatch tool invocations
//! 4. Fold each tool's outcome into a `RunReport`
//! 5. Print the results and ask the host to exit with the combined exit code
//!
//! The `common` module holds the argument and logging setup both commands share. Tool
//! failures never surface as errors; only an unusable configuration makes a command fail.

mod analyze;
mod common;
mod format;
mod host;
mod run;

pub use analyze::{AnalyzeArgs, Analyzer, ToolSelection, analyze};
pub use common::{ColorMode, CommonArgs, LogLevel, Session};
pub use format::{FormatArgs, format};
pub use host::Host;
pub use run::{run_analyze, run_format};
