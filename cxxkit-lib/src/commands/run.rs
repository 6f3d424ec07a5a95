//! Entry points for the cxxkit binaries

use super::{AnalyzeArgs, FormatArgs, analyze, format};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cxx-analyze", author, version, long_about = None)]
#[command(about = "Run static analysis tools on C++ code")]
#[command(styles = CLAP_STYLES)]
struct AnalyzeCli {
    #[command(flatten)]
    args: AnalyzeArgs,
}

#[derive(Parser, Debug)]
#[command(name = "cxx-format", author, version, long_about = None)]
#[command(about = "Format C++ source code with clang-format")]
#[command(styles = CLAP_STYLES)]
struct FormatCli {
    #[command(flatten)]
    args: FormatArgs,
}

/// Parse analyzer arguments and run the selected analyzers
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded
pub async fn run_analyze<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = AnalyzeCli::parse_from(args);
    analyze(host, &cli.args).await
}

/// Parse formatter arguments and check or format the source files
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded
pub async fn run_format<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = FormatCli::parse_from(args);
    format(host, &cli.args).await
}
