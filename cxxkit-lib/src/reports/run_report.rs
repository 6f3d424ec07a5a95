use crate::tools::Tool;

/// Counters gathered while a tool ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolSummary {
    /// Exit indicator contributed to the overall run
    pub exit_code: i32,

    /// Number of invocations attempted (files or directories)
    pub items: usize,

    /// Items the tool reported something about (issues, formatting needed)
    pub flagged: usize,

    /// Items whose invocation could not be carried out
    pub failures: usize,
}

/// What happened to one tool during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool is not installed; `required` tools fail the run, others are skipped
    Unavailable { required: bool },

    /// An input the tool needs is missing, so it was not run
    PreconditionMissing { reason: String },

    /// The tool ran
    Finished(ToolSummary),
}

impl ToolOutcome {
    /// Exit indicator this outcome contributes to the overall run
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unavailable { required } => i32::from(*required),
            Self::PreconditionMissing { .. } => 1,
            Self::Finished(summary) => summary.exit_code,
        }
    }
}

/// Outcomes of every tool in a run, in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    outcomes: Vec<(Tool, ToolOutcome)>,
    overall_exit_code: i32,
}

impl RunReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool's outcome, replacing any earlier outcome for the same tool
    pub fn record(&mut self, tool: Tool, outcome: ToolOutcome) {
        self.outcomes.retain(|(existing, _)| *existing != tool);
        self.outcomes.push((tool, outcome));
        self.overall_exit_code = self.outcomes.iter().fold(0, |code, (_, outcome)| code | outcome.exit_code());
    }

    #[cfg(test)]
    fn outcome(&self, tool: Tool) -> Option<&ToolOutcome> {
        self.outcomes.iter().find(|(t, _)| *t == tool).map(|(_, outcome)| outcome)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (Tool, &ToolOutcome)> {
        self.outcomes.iter().map(|(tool, outcome)| (*tool, outcome))
    }

    /// Bitwise OR of every recorded outcome's exit indicator
    #[must_use]
    pub const fn overall_exit_code(&self) -> i32 {
        self.overall_exit_code
    }
}
