use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use alerts_core::RequestId;
use alerts_logging::{alert_debug, alert_warn};
use thiserror::Error;

use crate::api::{ApiEndpoints, CapClient};
use crate::fetch::{FetchSettings, ReqwestFetcher};
use crate::{EngineEvent, FetchError};

/// Receives engine completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("http client: {0}")]
    Client(#[from] FetchError),
    #[error("engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Lookup {
        request_id: RequestId,
        alert_id: String,
    },
    Search {
        request_id: RequestId,
        query: String,
    },
}

/// Runs fetches on a background tokio runtime. Requests are never cancelled;
/// callers drop responses they no longer want by request id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: FetchSettings,
        endpoints: ApiEndpoints,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let client = CapClient::new(endpoints, Arc::new(ReqwestFetcher::new(settings)?));
        Self::with_client(client, sink)
    }

    pub fn with_client(client: CapClient, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("alerts-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(&client, command, sink.as_ref()).await;
                    });
                }
                alert_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn lookup(&self, request_id: RequestId, alert_id: impl Into<String>) {
        self.send(EngineCommand::Lookup {
            request_id,
            alert_id: alert_id.into(),
        });
    }

    pub fn search(&self, request_id: RequestId, query: impl Into<String>) {
        self.send(EngineCommand::Search {
            request_id,
            query: query.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            alert_warn!("engine thread is gone; request dropped");
        }
    }
}

async fn handle_command(client: &CapClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Lookup {
            request_id,
            alert_id,
        } => {
            let result = client.lookup(&alert_id).await;
            if let Err(err) = &result {
                alert_warn!("lookup #{} for {} failed: {}", request_id, alert_id, err);
            }
            sink.emit(EngineEvent::LookupCompleted { request_id, result });
        }
        EngineCommand::Search { request_id, query } => {
            let result = client.search(&query).await;
            if let Err(err) = &result {
                alert_warn!("search #{} ({:?}) failed: {}", request_id, query, err);
            }
            sink.emit(EngineEvent::SearchCompleted { request_id, result });
        }
    }
}
