use alerts_core::{LookupResponse, RequestId, SearchResult};
use thiserror::Error;

/// Completion of one engine request, tagged with the id the core issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LookupCompleted {
        request_id: RequestId,
        result: Result<LookupResponse, FetchError>,
    },
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchResult, FetchError>,
    },
}

/// A successful response body plus what was learned about it on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub requested_url: String,
    /// Differs from `requested_url` after redirects.
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("server answered {0}")]
    HttpStatus(u16),
    #[error("timed out")]
    Timeout,
    #[error("too many redirects")]
    RedirectLimitExceeded,
    #[error("body exceeds {max_bytes} bytes")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("unexpected content type {content_type}")]
    UnsupportedContentType { content_type: String },
    /// Body was not the JSON shape the endpoint promises.
    #[error("malformed response body")]
    Decode,
    #[error("connection failed")]
    Network,
}
