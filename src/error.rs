use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no search has been run yet")]
    NoSearchRun,
    #[error("search ran but evaluated no candidates")]
    NoCandidates,
    #[error("strategy expects the loss of the candidate it proposed last")]
    MissingFeedback,
}
