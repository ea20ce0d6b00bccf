//! Payload redaction: one branch per [`PayloadKind`].
//!
//! Field selection lives on the records themselves (`#[mask(...)]`); this
//! module only decides which record or list a kind exposes.

use crate::{classify::PayloadKind, masking::MaskTarget, Masker};

/// Masks the sensitive fields of `kind` in place.
///
/// - explain entries: `sql` gets full masking
/// - history records (standalone, listed, or nested in a job detail):
///   `statement` gets full masking
/// - data sources: `password` gets partial masking, `flink_config` full masking
///
/// Lists are visited element by element, in order, each exactly once. The
/// kind stays borrowed so the masked records can be inspected afterwards.
pub fn redact(kind: &mut PayloadKind<'_>, masker: &Masker) {
    match kind {
        PayloadKind::ExplainBatch(batch) => batch.mask_with(masker),
        PayloadKind::ExplainList(entries) => entries.mask_with(masker),
        PayloadKind::HistoryRecord(history) => history.mask_with(masker),
        PayloadKind::HistoryList(histories) => histories.mask_with(masker),
        PayloadKind::JobDetail(detail) => detail.mask_with(masker),
        PayloadKind::DatabaseConfig(database) => database.mask_with(masker),
        PayloadKind::DatabaseConfigList(databases) => databases.mask_with(masker),
    }
}
