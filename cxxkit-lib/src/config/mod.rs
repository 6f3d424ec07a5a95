//! Configuration for cxxkit
//!
//! Settings come from a TOML file (`cxxkit.toml` in the run root, or the path given with
//! `--config`). Every field is optional and falls back to the values in the embedded
//! `default_config.toml`.

#[expect(clippy::module_inception, reason = "config type lives in its own file")]
mod config;

pub use config::{CONFIG_FILE_NAME, ClangFormatConfig, ClangTidyConfig, Config, CppcheckConfig, DEFAULT_CONFIG_TOML, IwyuConfig};
