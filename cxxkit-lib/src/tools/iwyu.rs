use super::Tool;
use crate::commands::Host;
use crate::reports::{ToolOutcome, ToolSummary, console};
use std::io::Write;

/// Where to learn how to wire include-what-you-use into a build.
pub const PROJECT_URL: &str = "https://include-what-you-use.org/";

/// Print setup guidance for include-what-you-use.
///
/// The tool has to be run as part of a compilation with special flags, so it is not driven
/// directly and never affects the exit code.
pub fn run<H: Host>(host: &mut H, use_colors: bool) -> ToolOutcome {
    console::write_banner(&mut host.output(), &format!("Running {}...", Tool::Iwyu), use_colors);
    let _ = writeln!(host.output(), "include-what-you-use requires compilation with special flags.");
    let _ = writeln!(host.output(), "This is complex to set up automatically. Please refer to:");
    let _ = writeln!(host.output(), "{PROJECT_URL}");

    ToolOutcome::Finished(ToolSummary::default())
}
