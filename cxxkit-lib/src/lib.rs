#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cxxkit
//!
//! This library holds all functionality behind the `cxx-analyze` and `cxx-format` tools,
//! which drive external C++ formatters and static analyzers over a source tree.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Configuration file loading and validation
//! - [`files`]: Source file enumeration
//! - [`process`]: Tool probing and child-process dispatch
//! - [`tools`]: Per-tool command construction and result interpretation
//! - [`reports`]: Run aggregation and console output

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod files;

#[doc(hidden)]
pub mod process;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod tools;

pub use crate::commands::{Host, run_analyze, run_format};
