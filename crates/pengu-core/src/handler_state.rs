use thiserror::Error;

/// Lifecycle of a single asset request handler.
///
/// `Idle -> Processing -> (Serving | Rejected) -> Closed`. A handler serves at
/// most one request and never leaves `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    Processing,
    Serving,
    Rejected,
    Closed,
}

/// Why a request was not accepted.
///
/// Missing files, directories and files that cannot be opened collapse into
/// [`RejectReason::NotAFile`]; the host only learns that this handler cannot
/// serve the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("request URL could not be parsed")]
    UnparseableUrl,

    #[error("resolved path is not a regular file")]
    NotAFile,

    #[error("resolved path escapes the scheme root")]
    EscapesRoot,

    #[error("handler already processed a request")]
    AlreadyProcessed,
}
