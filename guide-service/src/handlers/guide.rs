use crate::dtos::CountQuery;
use crate::error::GuideError;
use crate::models::TouristInfo;
use crate::services::metrics;
use crate::services::validation::{
    parse_count, validate_parsed, GuideRequest, ValidationError, DEFAULT_COUNT,
};
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};

const CACHE_DISABLED: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// `GET /api/guide/test`
pub async fn guide_self_test() -> &'static str {
    "API Guide Touristique fonctionne ! ✓"
}

/// `GET /api/guide/lieu/:place/:count`
pub async fn tourist_info_with_count(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let request = path
        .map_err(malformed_path)
        .and_then(|Path((place, count))| validate_parsed(&place, parse_count(&count)));

    process_request(&state, request).await
}

/// `GET /api/guide/lieu/:place?nb=N`, `nb` defaulting to 2.
pub async fn tourist_info_with_query(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<CountQuery>, QueryRejection>,
) -> Response {
    let request = match (path, query) {
        (Err(rejection), _) => Err(malformed_path(rejection)),
        (_, Err(rejection)) => Err(malformed_query(rejection)),
        (Ok(Path(place)), Ok(Query(query))) => {
            let count = match query.nb.as_deref() {
                Some(raw) => parse_count(raw),
                None => Ok(DEFAULT_COUNT),
            };
            validate_parsed(&place, count)
        }
    };

    process_request(&state, request).await
}

fn malformed_path(rejection: PathRejection) -> ValidationError {
    tracing::warn!(rejection = %rejection.body_text(), "Unreadable path parameters");
    ValidationError::malformed()
}

fn malformed_query(rejection: QueryRejection) -> ValidationError {
    tracing::warn!(rejection = %rejection.body_text(), "Unreadable query string");
    ValidationError::malformed()
}

async fn process_request(
    state: &AppState,
    request: Result<GuideRequest, ValidationError>,
) -> Response {
    let result = match request {
        Ok(request) => {
            tracing::info!(place = %request.place, count = request.count, "Guide request");
            state.guide.generate_info(&request).await
        }
        Err(e) => Err(GuideError::Validation(e)),
    };

    match result {
        Ok(info) => {
            metrics::record_guide_outcome("success");
            tracing::info!(
                place = %info.place,
                attractions = info.attractions.len(),
                "Guide request succeeded"
            );
            success_response(info)
        }
        Err(err) => {
            metrics::record_guide_outcome(err.outcome());
            match &err {
                GuideError::Validation(e) => tracing::warn!(reason = %e, "Guide request rejected"),
                other => tracing::error!(error = %other, "Guide request failed"),
            }
            err.into_response()
        }
    }
}

fn success_response(info: TouristInfo) -> Response {
    (
        [
            (header::CACHE_CONTROL, CACHE_DISABLED),
            (header::PRAGMA, "no-cache"),
        ],
        Json(info),
    )
        .into_response()
}
