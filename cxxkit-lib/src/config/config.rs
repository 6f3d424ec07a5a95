use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the run root when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "cxxkit.toml";

const LOG_TARGET: &str = "    config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directories handed to cppcheck, relative to the run root
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<String>,

    /// Directory names pruned from file enumeration at any depth
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Upper bound on a single tool invocation; unset means no limit
    #[serde(default, with = "humantime_serde")]
    pub dispatch_timeout: Option<Duration>,

    #[serde(default)]
    pub cppcheck: CppcheckConfig,

    #[serde(default)]
    pub clang_tidy: ClangTidyConfig,

    #[serde(default)]
    pub iwyu: IwyuConfig,

    #[serde(default)]
    pub clang_format: ClangFormatConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CppcheckConfig {
    #[serde(default = "default_cppcheck_program")]
    pub program: String,

    /// Value passed to `--enable=`
    #[serde(default = "default_cppcheck_enable")]
    pub enable: String,

    /// Whether to pass `--inconclusive`
    #[serde(default = "default_true")]
    pub inconclusive: bool,

    /// Language standard passed to `--std=`
    #[serde(default = "default_cppcheck_std")]
    pub std: String,

    /// Check identifiers passed as `--suppress=<id>`
    #[serde(default = "default_cppcheck_suppressions")]
    pub suppressions: Vec<String>,

    /// Output template passed to `--template=`
    #[serde(default = "default_cppcheck_template")]
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClangTidyConfig {
    #[serde(default = "default_clang_tidy_program")]
    pub program: String,

    /// File name suffixes analyzed by clang-tidy
    #[serde(default = "default_clang_tidy_extensions")]
    pub extensions: Vec<String>,

    /// File name of the compiled-command database inside the build directory
    #[serde(default = "default_compile_commands")]
    pub compile_commands: String,

    /// Whether files with warnings make the run fail
    #[serde(default)]
    pub fail_on_warnings: bool,

    /// Additional arguments appended to every clang-tidy invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IwyuConfig {
    #[serde(default = "default_iwyu_program")]
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClangFormatConfig {
    #[serde(default = "default_clang_format_program")]
    pub program: String,

    /// File name suffixes handled by clang-format
    #[serde(default = "default_clang_format_extensions")]
    pub extensions: Vec<String>,
}

fn default_source_dirs() -> Vec<String> {
    strings(&["src", "include"])
}

fn default_exclude_dirs() -> Vec<String> {
    strings(&["build", "external", ".git"])
}

const fn default_true() -> bool {
    true
}

fn default_cppcheck_program() -> String {
    "cppcheck".to_string()
}

fn default_cppcheck_enable() -> String {
    "all".to_string()
}

fn default_cppcheck_std() -> String {
    "c++17".to_string()
}

fn default_cppcheck_suppressions() -> Vec<String> {
    strings(&["missingIncludeSystem", "unusedFunction"])
}

fn default_cppcheck_template() -> String {
    "{file}:{line}: {severity}: {message} [{id}]".to_string()
}

fn default_clang_tidy_program() -> String {
    "clang-tidy".to_string()
}

fn default_clang_tidy_extensions() -> Vec<String> {
    strings(&[".cpp", ".cc", ".cxx"])
}

fn default_compile_commands() -> String {
    "compile_commands.json".to_string()
}

fn default_iwyu_program() -> String {
    "include-what-you-use".to_string()
}

fn default_clang_format_program() -> String {
    "clang-format".to_string()
}

fn default_clang_format_extensions() -> Vec<String> {
    strings(&[".cpp", ".c", ".h", ".hpp", ".cc", ".cxx"])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl Default for CppcheckConfig {
    fn default() -> Self {
        Self {
            program: default_cppcheck_program(),
            enable: default_cppcheck_enable(),
            inconclusive: default_true(),
            std: default_cppcheck_std(),
            suppressions: default_cppcheck_suppressions(),
            template: default_cppcheck_template(),
        }
    }
}

impl Default for ClangTidyConfig {
    fn default() -> Self {
        Self {
            program: default_clang_tidy_program(),
            extensions: default_clang_tidy_extensions(),
            compile_commands: default_compile_commands(),
            fail_on_warnings: false,
            extra_args: Vec::new(),
        }
    }
}

impl Default for IwyuConfig {
    fn default() -> Self {
        Self {
            program: default_iwyu_program(),
        }
    }
}

impl Default for ClangFormatConfig {
    fn default() -> Self {
        Self {
            program: default_clang_format_program(),
            extensions: default_clang_format_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `cxxkit.toml` in the run root is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading cxxkit configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = root.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading cxxkit configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a program name is empty, an extension list is empty or holds an
    /// entry without a leading dot, or an excluded directory name contains a path separator
    fn validate(&self) -> Result<()> {
        for (tool, program) in [
            ("cppcheck", &self.cppcheck.program),
            ("clang_tidy", &self.clang_tidy.program),
            ("iwyu", &self.iwyu.program),
            ("clang_format", &self.clang_format.program),
        ] {
            if program.trim().is_empty() {
                return Err(app_err!("{tool}.program must not be empty"));
            }
        }

        for (tool, extensions) in [
            ("clang_tidy", &self.clang_tidy.extensions),
            ("clang_format", &self.clang_format.extensions),
        ] {
            if extensions.is_empty() {
                return Err(app_err!("{tool}.extensions must list at least one extension"));
            }

            if let Some(bad) = extensions.iter().find(|ext| !ext.starts_with('.') || ext.len() < 2) {
                return Err(app_err!("{tool}.extensions entries must look like '.cpp', got '{bad}'"));
            }
        }

        if let Some(bad) = self.exclude_dirs.iter().find(|dir| dir.is_empty() || dir.contains(['/', '\\'])) {
            return Err(app_err!(
                "exclude_dirs entries are directory names, not paths, got '{bad}'"
            ));
        }

        if self.clang_tidy.compile_commands.trim().is_empty() {
            return Err(app_err!("clang_tidy.compile_commands must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
