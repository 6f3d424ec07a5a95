//! Run aggregation and console output
//!
//! A [`RunReport`] collects one [`ToolOutcome`] per tool as a run progresses and folds their
//! exit indicators into the process exit code. The [`console`] functions render banners,
//! probe results and the final summary, and [`ProgressReporter`] draws a progress bar while
//! per-file tools work through the file list.

pub mod console;
mod progress_reporter;
mod run_report;

pub use progress_reporter::ProgressReporter;
pub use run_report::{RunReport, ToolOutcome, ToolSummary};
