use std::fmt;

/// Non-terminal phases of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Fetching,
    Extracting,
    Exporting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Extracting => "extracting",
            Phase::Exporting => "exporting",
        };
        f.write_str(label)
    }
}

/// Where a pipeline run currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Fetching,
    Extracting,
    Exporting,
    Done,
    Failed { phase: Phase, cause: String },
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }

    /// The phase this state represents, `None` once terminal.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            PipelineState::Idle => Some(Phase::Idle),
            PipelineState::Fetching => Some(Phase::Fetching),
            PipelineState::Extracting => Some(Phase::Extracting),
            PipelineState::Exporting => Some(Phase::Exporting),
            PipelineState::Done | PipelineState::Failed { .. } => None,
        }
    }
}
