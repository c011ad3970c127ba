//! Request and response bodies of the JSON API.

use std::collections::BTreeMap;

use namedex_index::{Letter, LetterStat};
use serde::{Deserialize, Serialize};

/// Query of `GET /api/users`. Numeric parameters are kept as strings so that
/// unparsable values fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub letter: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub letter: Letter,
    pub offset: i64,
    pub limit: i64,
    pub users: Vec<String>,
    pub total: u64,
    pub has_more: bool,
    pub returned: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: u64,
    pub letter_stats: Vec<LetterStat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterInfoResponse {
    pub letter: Letter,
    pub start_offset: u64,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct LettersResponse {
    pub letters: Vec<Letter>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexHealth {
    pub ready: bool,
    pub total_records: u64,
    pub available_letters: Vec<Letter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
    pub uptime_secs: f64,
    pub index: IndexHealth,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteNotFoundResponse {
    pub error: String,
    pub code: String,
    pub path: String,
    pub method: String,
}
