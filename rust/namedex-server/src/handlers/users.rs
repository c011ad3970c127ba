//! Letter page and index introspection endpoints.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use namedex_common::{CancellationToken, async_runtime::spawn_blocking};
use namedex_index::Letter;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    models::{LetterInfoResponse, LettersResponse, StatsResponse, UsersQuery, UsersResponse},
};

/// Parses an optional integer parameter; absent or unparsable values yield `None`.
fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

fn parse_letter(raw: &str) -> Result<Letter, ApiError> {
    Letter::parse(&raw.trim().to_uppercase()).map_err(|_| {
        ApiError::bad_request("INVALID_LETTER", "letter must be a single character A-Z")
    })
}

/// `GET /api/users?letter=&offset=&limit=`
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let started = Instant::now();
    let config = &state.config;

    let raw_letter = query.letter.as_deref().map(str::trim).unwrap_or_default();
    if raw_letter.is_empty() {
        return Err(ApiError::bad_request(
            "MISSING_LETTER",
            "letter parameter is required",
        ));
    }
    let letter = parse_letter(raw_letter)?;

    let offset = parse_int(query.offset.as_deref()).unwrap_or(0);
    let limit = parse_int(query.limit.as_deref())
        .unwrap_or(config.default_page_limit)
        .min(config.public_page_limit);
    if offset < 0 {
        return Err(ApiError::bad_request(
            "INVALID_OFFSET",
            "offset must be non-negative",
        ));
    }
    if limit < 1 {
        return Err(ApiError::bad_request(
            "INVALID_LIMIT",
            format!("limit must be between 1 and {}", config.public_page_limit),
        ));
    }

    // Dropping the request future cancels the scan running on the blocking pool.
    let token = CancellationToken::new();
    let guard = token.drop_guard();
    let directory = state.directory.clone();
    let key = letter.to_string();
    let page = spawn_blocking(move || directory.get_page_cancellable(&key, offset, limit, &token))
        .await
        .map_err(|e| ApiError::internal(e.to_string(), config.is_development()))?;
    guard.disarm();
    let page = page.map_err(|e| ApiError::from_directory(e, config.is_development()))?;

    info!(
        %letter,
        offset,
        limit,
        returned = page.records.len(),
        total = page.total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "served page"
    );

    Ok(Json(UsersResponse {
        letter,
        offset,
        limit,
        returned: page.records.len(),
        users: page.records,
        total: page.total,
        has_more: page.has_more,
    }))
}

/// `GET /api/stats`
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let expose = state.config.is_development();
    let index = state
        .directory
        .snapshot()
        .map_err(|e| ApiError::from_directory(e, expose))?;
    Ok(Json(StatsResponse {
        total_users: index.total_records(),
        letter_stats: index.list_buckets(),
    }))
}

/// `GET /api/letter/:letter`
pub async fn get_letter(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<LetterInfoResponse>, ApiError> {
    let letter = parse_letter(&raw)?;
    let bucket = state
        .directory
        .bucket_info(letter)
        .map_err(|e| ApiError::from_directory(e, state.config.is_development()))?
        .ok_or_else(|| {
            ApiError::not_found("LETTER_NOT_FOUND", format!("no records for letter {letter}"))
        })?;
    Ok(Json(LetterInfoResponse {
        letter,
        start_offset: bucket.start_offset,
        count: bucket.count,
    }))
}

/// `GET /api/letters`
pub async fn list_letters(
    State(state): State<AppState>,
) -> Result<Json<LettersResponse>, ApiError> {
    let letters = state
        .directory
        .available_letters()
        .map_err(|e| ApiError::from_directory(e, state.config.is_development()))?;
    Ok(Json(LettersResponse {
        count: letters.len(),
        letters,
    }))
}

#[cfg(test)]
mod tests {
    use super::parse_int;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(Some("25")), Some(25));
        assert_eq!(parse_int(Some(" -3 ")), Some(-3));
        assert_eq!(parse_int(Some("abc")), None);
        assert_eq!(parse_int(Some("")), None);
        assert_eq!(parse_int(None), None);
    }
}
