//! The append-only event stream the presentation layer renders.
//!
//! Events are the product's user-facing output and separate from `tracing`
//! diagnostics. The wire shape (`type` / `message` / `timestamp`) matches
//! what the surrounding UI layers historically consumed as NDJSON.

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Producer handle for the event stream. Cheap to clone; every component
/// that reports progress holds one. Emission never blocks and never fails —
/// if the consumer is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<LogEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, UnboundedReceiver<LogEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, severity: Severity, message: impl Into<String>) {
        let event = LogEvent {
            severity,
            message: message.into(),
            timestamp: Local::now(),
        };
        trace!(target = "buddybot", severity = ?event.severity, message = %event.message, "event");
        let _ = self.tx.send(event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Severity::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(Severity::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Severity::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_the_historical_keys() {
        let (sink, mut rx) = EventSink::channel();
        sink.warning("rate limited");
        let event = rx.try_recv().unwrap();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["message"], "rate limited");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn emission_without_consumer_is_silent() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.info("nobody listening");
    }

    #[test]
    fn events_arrive_in_emission_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.info("first");
        sink.error("second");
        assert_eq!(rx.try_recv().unwrap().message, "first");
        assert_eq!(rx.try_recv().unwrap().message, "second");
    }
}
