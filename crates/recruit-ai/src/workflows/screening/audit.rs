use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How the adapter arrived at the verdict it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// Oracle boolean agreed with its reason text.
    Oracle,
    /// Oracle boolean contradicted its reason text and was overridden.
    Corrected,
    /// Reason text had no recognisable leading clause.
    UnrecognizedReason,
    /// No usable oracle answer (fault or missing criteria).
    FailClosed,
}

/// Audit record emitted for every adjudication decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub job_title: String,
    pub position: u32,
    pub candidate: String,
    pub is_qualified: bool,
    pub reason: String,
    pub source: VerdictSource,
    pub recorded_at: DateTime<Utc>,
}

/// Subscriber for adjudication decisions, kept apart from generic logging.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Forwards audit events to `tracing` under the `audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        info!(
            target: "audit",
            job_title = %event.job_title,
            position = event.position,
            candidate = %event.candidate,
            is_qualified = event.is_qualified,
            source = ?event.source,
            "{}",
            event.reason
        );
    }
}

/// Keeps every event in memory; useful for reports and tests.
#[derive(Debug, Default, Clone)]
pub struct CollectingAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl CollectingAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for CollectingAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
