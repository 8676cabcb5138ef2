//! Alert viewer engine: HTTP access to the CAP functions and alert export.
mod api;
mod engine;
mod export;
mod fetch;
mod filename;
mod types;

pub use api::{ApiEndpoints, CapClient, DEFAULT_API_BASE};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use export::{ensure_export_dir, export_alert, AtomicFileWriter, ExportError, EXPORT_EXTENSION};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::deterministic_filename;
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
