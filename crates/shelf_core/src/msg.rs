#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator started a run; carries the extraction toggle's value.
    RunRequested { extraction_enabled: bool },
    /// The page was downloaded with a success status.
    FetchSucceeded,
    /// Extraction produced a catalog of this many records.
    ExtractionSucceeded { records: usize },
    /// Every enabled sink has been attempted, whatever the outcome.
    SinksAttempted,
    /// A fatal error ended the current phase.
    Failed { cause: String },
}
