//! Source file enumeration
//!
//! Per-file tools (the formatter and clang-tidy) operate on the set of files produced by
//! [`FileSelection::enumerate`]. Directories are pruned by exact name at any depth before
//! the walk descends into them, and files are kept when their name ends with one of the
//! configured extensions.

mod file_selection;

pub use file_selection::FileSelection;
