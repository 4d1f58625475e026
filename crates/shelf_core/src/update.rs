use crate::{Msg, PipelineState};

/// Pure transition function for a pipeline run.
///
/// Messages that do not apply to the current state leave it unchanged, and
/// terminal states absorb every message.
pub fn update(state: PipelineState, msg: Msg) -> PipelineState {
    match (state, msg) {
        (PipelineState::Idle, Msg::RunRequested { extraction_enabled }) => {
            if extraction_enabled {
                PipelineState::Fetching
            } else {
                PipelineState::Done
            }
        }
        (PipelineState::Fetching, Msg::FetchSucceeded) => PipelineState::Extracting,
        (PipelineState::Extracting, Msg::ExtractionSucceeded { .. }) => PipelineState::Exporting,
        (PipelineState::Exporting, Msg::SinksAttempted) => PipelineState::Done,
        (state, Msg::Failed { cause }) => match state.phase() {
            Some(phase) => PipelineState::Failed { phase, cause },
            None => state,
        },
        (state, _) => state,
    }
}
