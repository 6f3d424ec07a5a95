//! Per-tool command construction and result interpretation
//!
//! # Implementation Model
//!
//! Each supported tool has a module that knows how to build its command line from the
//! configuration and how to turn the captured output into a [`ToolOutcome`]:
//!
//! - **cppcheck** runs once per existing source directory and its diagnostics are passed
//!   through verbatim.
//! - **clang-tidy** needs a compiled-command database; when it is present, clang-tidy runs once
//!   per enumerated source file and files whose output holds warnings are reported.
//! - **include-what-you-use** cannot be driven without build-system integration, so only setup
//!   guidance is printed.
//! - **clang-format** runs once per enumerated file, either as a dry run that flags files
//!   needing formatting or rewriting them in place.
//!
//! Per-file tools share [`per_file::dispatch_each`], which keeps up to `jobs` invocations in
//! flight and hands results back in enumeration order.
//!
//! [`ToolOutcome`]: crate::reports::ToolOutcome

pub mod clang_format;
pub mod clang_tidy;
pub mod cppcheck;
pub mod iwyu;
mod per_file;

use crate::config::Config;
use crate::process::{Dispatcher, ToolSpec};
use core::num::NonZeroUsize;

/// Flag every supported tool answers with its version.
const VERSION_FLAG: &str = "--version";

/// The external tools cxxkit knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter)]
pub enum Tool {
    #[strum(serialize = "cppcheck")]
    Cppcheck,

    #[strum(serialize = "clang-tidy")]
    ClangTidy,

    #[strum(serialize = "include-what-you-use")]
    Iwyu,

    #[strum(serialize = "clang-format")]
    ClangFormat,
}

impl Tool {
    #[must_use]
    pub const fn install_hint(self) -> &'static str {
        match self {
            Self::Cppcheck => "apt install cppcheck / brew install cppcheck / choco install cppcheck",
            Self::ClangTidy => "apt install clang-tidy / brew install llvm / install LLVM",
            Self::Iwyu => "Complex setup - see https://include-what-you-use.org/",
            Self::ClangFormat => {
                "Windows: Install LLVM from https://llvm.org/builds/\n\
                 Linux: sudo apt install clang-format (or equivalent)\n\
                 macOS: brew install clang-format"
            }
        }
    }

    /// The executable configured for this tool
    #[must_use]
    pub fn program(self, config: &Config) -> &str {
        match self {
            Self::Cppcheck => &config.cppcheck.program,
            Self::ClangTidy => &config.clang_tidy.program,
            Self::Iwyu => &config.iwyu.program,
            Self::ClangFormat => &config.clang_format.program,
        }
    }

    #[must_use]
    pub fn spec(self, config: &Config) -> ToolSpec {
        ToolSpec::new(self.into(), self.program(config), [VERSION_FLAG], self.install_hint())
    }
}

/// Settings shared by every tool run in one invocation of cxxkit.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub dispatcher: Dispatcher,

    /// Maximum number of per-file invocations in flight
    pub jobs: NonZeroUsize,

    pub use_colors: bool,

    /// Whether per-file runs draw a progress bar on stderr
    pub show_progress: bool,
}
