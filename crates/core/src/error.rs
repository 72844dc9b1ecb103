use thiserror::Error;
use usagescope_api::TypeName;

/// Contract violations raised by the extraction engine.
///
/// A well-formed simplified tree never triggers these. Batch callers treat
/// them as per-unit failures: the offending unit is skipped, the run
/// continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("id '{0}' is already registered in the current scope")]
    DuplicateId(String),
    #[error("type '{0}' is already registered in the current scope")]
    DuplicateType(TypeName),
    #[error("no binding for id '{0}' in any enclosing scope")]
    UnboundId(String),
    #[error("cannot leave the root scope")]
    RootScopeExit,
    #[error("commit failed: {0}")]
    Commit(String),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
