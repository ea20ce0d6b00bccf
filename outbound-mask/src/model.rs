//! Payload records that can carry credentials out of the service.
//!
//! Each record derives [`Masked`]; its `#[mask(...)]` attributes are the single
//! place that says which field is masked and how. Everything else (ids,
//! names, timestamps, status) is carried through untouched.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Masked;

/// One statement of an explain run.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Masked)]
#[serde(rename_all = "camelCase")]
pub struct SqlExplainResult {
    pub index: u32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Statement text as submitted; may embed connector options with passwords.
    #[mask(pattern)]
    pub sql: Option<String>,
    pub parse: Option<String>,
    pub explain: Option<String>,
    pub error: Option<String>,
    pub parse_true: bool,
    pub explain_true: bool,
    pub explain_time: Option<NaiveDateTime>,
}

/// Aggregate result of explaining a script.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Masked)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResult {
    pub correct: bool,
    pub total: u32,
    #[mask]
    pub sql_explain_results: Vec<SqlExplainResult>,
}

/// A past job submission.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Masked)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub cluster_id: Option<i64>,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub job_manager_address: Option<String>,
    pub status: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Submitted statement; may embed literal SQL with credentials.
    #[mask(pattern)]
    pub statement: Option<String>,
    pub error: Option<String>,
    pub task_id: Option<i64>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

/// Detail view of a running or finished job.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Masked)]
#[serde(rename_all = "camelCase")]
pub struct JobInfoDetail {
    pub id: Option<i64>,
    pub instance_name: Option<String>,
    pub cluster_name: Option<String>,
    #[mask]
    pub history: Option<History>,
    pub job_history: Option<String>,
    pub refreshed: bool,
}

/// A registered data source.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize, Masked)]
#[serde(rename_all = "camelCase")]
pub struct DataBase {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub group_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    /// Partially masked so operators can still tell credentials apart.
    #[mask(partial)]
    pub password: Option<String>,
    pub note: Option<String>,
    /// Connector option text; may contain `'password'='...'` anywhere.
    #[mask(pattern)]
    pub flink_config: Option<String>,
    pub flink_template: Option<String>,
    pub db_version: Option<String>,
    pub status: bool,
    pub health_time: Option<NaiveDateTime>,
    pub heartbeat_time: Option<NaiveDateTime>,
    pub enabled: bool,
    pub create_time: Option<NaiveDateTime>,
    pub update_time: Option<NaiveDateTime>,
}
