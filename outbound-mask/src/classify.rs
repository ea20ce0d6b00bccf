//! Result classification: which known payload, if any, a response carries.
//!
//! The type-erased payload of an envelope is inspected against a closed set
//! of shapes in a fixed priority order. The first match is returned as a
//! [`PayloadKind`] holding a mutable borrow of the payload, so the redactor can
//! dispatch with an exhaustive `match` instead of further downcasts.

use std::any::Any;

use crate::{
    envelope::{Payload, ResponseEnvelope},
    model::{DataBase, ExplainResult, History, JobInfoDetail, SqlExplainResult},
};

/// A recognized payload, borrowed mutably from its envelope.
#[derive(Debug)]
pub enum PayloadKind<'a> {
    /// An `ExplainResult` wrapping explain entries.
    ExplainBatch(&'a mut ExplainResult),
    /// Explain entries delivered as a bare list.
    ExplainList(&'a mut [SqlExplainResult]),
    /// A single history record.
    HistoryRecord(&'a mut History),
    /// A list of history records.
    HistoryList(&'a mut [History]),
    /// A job detail with an optional nested history record.
    JobDetail(&'a mut JobInfoDetail),
    /// A single data source.
    DatabaseConfig(&'a mut DataBase),
    /// A list of data sources.
    DatabaseConfigList(&'a mut [DataBase]),
}

impl PayloadKind<'_> {
    /// Stable name of the variant, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            PayloadKind::ExplainBatch(_) => "explain_batch",
            PayloadKind::ExplainList(_) => "explain_list",
            PayloadKind::HistoryRecord(_) => "history_record",
            PayloadKind::HistoryList(_) => "history_list",
            PayloadKind::JobDetail(_) => "job_detail",
            PayloadKind::DatabaseConfig(_) => "database_config",
            PayloadKind::DatabaseConfigList(_) => "database_config_list",
        }
    }

    /// Number of records the redactor will visit.
    pub fn record_count(&self) -> usize {
        match self {
            PayloadKind::ExplainBatch(batch) => batch.sql_explain_results.len(),
            PayloadKind::ExplainList(entries) => entries.len(),
            PayloadKind::HistoryList(entries) => entries.len(),
            PayloadKind::DatabaseConfigList(entries) => entries.len(),
            PayloadKind::JobDetail(detail) => usize::from(detail.history.is_some()),
            PayloadKind::HistoryRecord(_) | PayloadKind::DatabaseConfig(_) => 1,
        }
    }
}

/// Classifies the payload of `envelope`.
///
/// Priority order, first match wins:
///
/// 1. `Api` holding an `ExplainResult` with entries -> `ExplainBatch`
/// 2. `Api` holding a non-empty `Vec<SqlExplainResult>` -> `ExplainList`
/// 3. any envelope holding a non-empty `Vec<History>` -> `HistoryList`
/// 4. any envelope holding a non-empty `Vec<DataBase>` -> `DatabaseConfigList`
/// 5. `Api` holding a `History` -> `HistoryRecord`
/// 6. `Api` holding a `JobInfoDetail` -> `JobDetail`
/// 7. `Api` holding a `DataBase` -> `DatabaseConfig`
///
/// Absent payloads, empty collections, `Raw` responses and unknown types
/// yield `None`.
pub fn classify(envelope: &mut ResponseEnvelope) -> Option<PayloadKind<'_>> {
    match envelope {
        ResponseEnvelope::Api(result) => classify_api(result.datas.as_mut()?),
        ResponseEnvelope::Table(result) => classify_rows(result.data.as_mut()?),
        ResponseEnvelope::Raw(_) => None,
    }
}

fn classify_api(datas: &mut Payload) -> Option<PayloadKind<'_>> {
    let datas: &mut (dyn Any + Send) = datas.as_mut();

    if datas
        .downcast_ref::<ExplainResult>()
        .is_some_and(|batch| !batch.sql_explain_results.is_empty())
    {
        return datas
            .downcast_mut::<ExplainResult>()
            .map(PayloadKind::ExplainBatch);
    }
    if is_non_empty_list::<SqlExplainResult>(datas) {
        return datas
            .downcast_mut::<Vec<SqlExplainResult>>()
            .map(|entries| PayloadKind::ExplainList(entries.as_mut_slice()));
    }
    if is_non_empty_list::<History>(datas) || is_non_empty_list::<DataBase>(datas) {
        return classify_list(datas);
    }
    if datas.is::<History>() {
        return datas.downcast_mut::<History>().map(PayloadKind::HistoryRecord);
    }
    if datas.is::<JobInfoDetail>() {
        return datas.downcast_mut::<JobInfoDetail>().map(PayloadKind::JobDetail);
    }
    if datas.is::<DataBase>() {
        return datas.downcast_mut::<DataBase>().map(PayloadKind::DatabaseConfig);
    }
    None
}

fn classify_rows(data: &mut Payload) -> Option<PayloadKind<'_>> {
    classify_list(data.as_mut())
}

fn classify_list(data: &mut (dyn Any + Send)) -> Option<PayloadKind<'_>> {
    if is_non_empty_list::<History>(data) {
        return data
            .downcast_mut::<Vec<History>>()
            .map(|entries| PayloadKind::HistoryList(entries.as_mut_slice()));
    }
    if is_non_empty_list::<DataBase>(data) {
        return data
            .downcast_mut::<Vec<DataBase>>()
            .map(|entries| PayloadKind::DatabaseConfigList(entries.as_mut_slice()));
    }
    None
}

fn is_non_empty_list<T: Any>(data: &(dyn Any + Send)) -> bool {
    data.downcast_ref::<Vec<T>>()
        .is_some_and(|entries| !entries.is_empty())
}
