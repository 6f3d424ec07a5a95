/// Identifies an external tool and how to check that it is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    name: &'static str,
    program: String,
    probe_args: Vec<String>,
    install_hint: &'static str,
}

impl ToolSpec {
    #[must_use]
    pub fn new<I>(name: &'static str, program: impl Into<String>, probe_args: I, install_hint: &'static str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name,
            program: program.into(),
            probe_args: probe_args.into_iter().map(Into::into).collect(),
            install_hint,
        }
    }

    /// Display name of the tool, e.g. `clang-tidy`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Executable that is actually run, which may differ from the name (e.g. `clang-format-17`)
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn probe_args(&self) -> &[String] {
        &self.probe_args
    }

    /// Installation instructions, possibly spanning several lines
    #[must_use]
    pub const fn install_hint(&self) -> &'static str {
        self.install_hint
    }
}
