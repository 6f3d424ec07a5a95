//! Setup shared by the analyze and format commands.

use super::Host;
use crate::Result;
use crate::config::Config;
use crate::process::Dispatcher;
use crate::tools::RunContext;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::num::NonZeroUsize;
use std::io::{IsTerminal, Write, stderr, stdout};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    fn resolve(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the analyze and format commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `cxxkit.toml` in the target directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Maximum number of tool invocations to run at once (default is the number of CPUs)
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Everything a command needs once its arguments have been processed.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub ctx: RunContext,
    pub root: Utf8PathBuf,
}

impl Session {
    /// Initialize logging and load the configuration for a run over `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or is invalid. The error is
    /// also reported to the host, which is asked to exit with status 1.
    pub fn new<H: Host>(host: &mut H, args: &CommonArgs, root: &Utf8Path) -> Result<Self> {
        init_logging(args.log_level);

        let config = match Config::load(root, args.config.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                let _ = writeln!(host.error(), "❌ Could not load configuration: {e}");
                host.exit(1);
                return Err(e);
            }
        };

        let jobs = args
            .jobs
            .unwrap_or_else(|| std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN));

        let ctx = RunContext {
            dispatcher: Dispatcher::new(config.dispatch_timeout),
            jobs,
            use_colors: args.color.resolve(|| stdout().is_terminal()),
            show_progress: args.log_level == LogLevel::None && stderr().is_terminal(),
        };

        Ok(Self {
            config,
            ctx,
            root: root.to_path_buf(),
        })
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when running several commands in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
