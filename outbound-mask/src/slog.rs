//! Structured log values for the response path.
//!
//! [`PayloadSummary`] is the key-value set the interceptor attaches to each
//! record it emits: the envelope shape and, for a recognized payload, its
//! kind and record count. [`MaskedRecords`] carries the records behind a
//! [`PayloadKind`] as nested JSON. Capture it only after the kind has been
//! redacted; it serializes whatever the records hold at that moment.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, KV};

use crate::classify::PayloadKind;

/// Shape of one outbound response, as logged by the interceptor.
///
/// Serializes as `envelope`, plus `kind` and `records` when the payload was
/// recognized. Never carries field values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadSummary {
    envelope: &'static str,
    matched: Option<(&'static str, usize)>,
}

impl PayloadSummary {
    /// A response whose payload was not recognized.
    pub fn passed_through(envelope: &'static str) -> Self {
        Self {
            envelope,
            matched: None,
        }
    }

    /// A response carrying `kind`.
    pub fn matched(envelope: &'static str, kind: &PayloadKind<'_>) -> Self {
        Self {
            envelope,
            matched: Some((kind.label(), kind.record_count())),
        }
    }

    pub fn envelope(&self) -> &'static str {
        self.envelope
    }

    /// Kind label, or `None` on pass-through.
    pub fn kind(&self) -> Option<&'static str> {
        self.matched.map(|(kind, _)| kind)
    }

    /// Records visited by the redactor; zero on pass-through.
    pub fn records(&self) -> usize {
        self.matched.map_or(0, |(_, records)| records)
    }
}

impl KV for PayloadSummary {
    fn serialize(&self, _record: &Record<'_>, serializer: &mut dyn Serializer) -> SlogResult {
        serializer.emit_str("envelope", self.envelope)?;
        if let Some((kind, records)) = self.matched {
            serializer.emit_str("kind", kind)?;
            serializer.emit_usize("records", records)?;
        }
        Ok(())
    }
}

/// The records of a [`PayloadKind`], frozen as JSON for logging.
///
/// Single records serialize as an object, lists as an array, in the order
/// the redactor visited them.
#[derive(Clone, Debug)]
pub struct MaskedRecords {
    kind: &'static str,
    records: Option<JsonValue>,
}

impl MaskedRecords {
    /// Captures the records `kind` borrows.
    ///
    /// Call after [`crate::redact`]; the records are read as they are now.
    pub fn capture(kind: &PayloadKind<'_>) -> Self {
        let records = match kind {
            PayloadKind::ExplainBatch(batch) => serde_json::to_value(&**batch),
            PayloadKind::ExplainList(entries) => serde_json::to_value(&**entries),
            PayloadKind::HistoryRecord(history) => serde_json::to_value(&**history),
            PayloadKind::HistoryList(histories) => serde_json::to_value(&**histories),
            PayloadKind::JobDetail(detail) => serde_json::to_value(&**detail),
            PayloadKind::DatabaseConfig(database) => serde_json::to_value(&**database),
            PayloadKind::DatabaseConfigList(databases) => serde_json::to_value(&**databases),
        };
        Self {
            kind: kind.label(),
            records: records.ok(),
        }
    }

    /// The captured JSON, or `None` if the records could not be serialized.
    pub fn as_json(&self) -> Option<&JsonValue> {
        self.records.as_ref()
    }
}

impl slog::Value for MaskedRecords {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match &self.records {
            Some(records) => serializer.emit_serde(key, &slog::Serde(records.clone())),
            None => serializer.emit_arguments(key, &format_args!("<unserializable {}>", self.kind)),
        }
    }
}
