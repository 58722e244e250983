//! Fire-and-forget audit trail. Events are pushed onto a bounded channel and
//! persisted as `Log` rows by a background task, so a slow or failing audit
//! write can never affect the latency or outcome of the request that caused
//! it.

use sqlx::PgPool;
use std::sync::OnceLock;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config;
use crate::domain::Log;
use crate::services::{EntityService, LogService};
use crate::store::PgCollection;

#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub action: String,
    pub message: String,
}

pub struct AuditSink {
    tx: mpsc::Sender<AuditEvent>,
}

impl AuditSink {
    fn new(tx: mpsc::Sender<AuditEvent>) -> Self {
        Self { tx }
    }

    /// Non-blocking. When the queue is full the event is dropped with a
    /// warning; primary operations never wait on the audit trail.
    pub fn emit(&self, action: impl Into<String>, message: impl Into<String>) {
        let event = AuditEvent {
            action: action.into(),
            message: message.into(),
        };
        if let Err(err) = self.tx.try_send(event) {
            warn!("Audit event dropped: {}", err);
        }
    }
}

static SINK: OnceLock<AuditSink> = OnceLock::new();

/// Start the audit writer task and install the process-wide sink.
pub fn init(pool: PgPool) {
    let capacity = config::config().audit.queue_capacity;
    let (tx, rx) = mpsc::channel(capacity);
    tokio::spawn(writer(rx, EntityService::new(PgCollection::new(pool))));
    let _ = SINK.set(AuditSink::new(tx));
}

/// Emit through the process-wide sink. A no-op before `init` runs so code
/// paths exercised in tests stay silent instead of failing.
pub fn emit(action: impl Into<String>, message: impl Into<String>) {
    if let Some(sink) = SINK.get() {
        sink.emit(action, message);
    }
}

async fn writer(mut rx: mpsc::Receiver<AuditEvent>, service: LogService) {
    while let Some(event) = rx.recv().await {
        let resp = service.create(Log::record(event.action, event.message)).await;
        if !resp.success {
            warn!("Audit log write failed: {}", resp.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let (tx, mut rx) = mpsc::channel(2);
        let sink = AuditSink::new(tx);

        sink.emit("A", "first");
        sink.emit("B", "second");
        sink.emit("C", "dropped");

        assert_eq!(rx.recv().await.unwrap().action, "A");
        assert_eq!(rx.recv().await.unwrap().action, "B");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn emit_without_init_is_a_no_op() {
        emit("Anything", "goes nowhere");
    }
}
