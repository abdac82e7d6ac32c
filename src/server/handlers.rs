use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::location::gazetteer;
use crate::location::{
    normalize, normalize_or_default, normalize_result, CanonicalState, Coordinates, NormalizedLocation,
    PickerFailure, ReverseOutcome,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionView {
    pub display_name: String,
    pub location: NormalizedLocation,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub results: Vec<SuggestionView>,
}

/// Forward search. Short queries and provider failures both give an empty list.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default().trim().to_string();

    let results: Vec<SuggestionView> = state
        .router
        .forward_search(&query)
        .await
        .into_iter()
        .filter_map(|raw| {
            normalize_result(&raw, None, state.policy)
                .ok()
                .map(|location| SuggestionView {
                    display_name: raw.display_name.clone(),
                    location,
                })
        })
        .collect();

    info!(query = %query, results = results.len(), ms = elapsed_ms(start), "GET /api/suggest");
    Json(SuggestResponse { query, results })
}

// ─── GET /api/reverse ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReverseQuery {
    pub lat: Option<f64>,
    #[serde(alias = "lon")]
    pub lng: Option<f64>,
}

pub async fn reverse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQuery>,
) -> Result<Json<NormalizedLocation>, ApiError> {
    let start = Instant::now();

    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Provide 'lat' and 'lng' parameters"));
    };
    let point = Coordinates::new(lat, lng)
        .filter(Coordinates::in_range)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid coordinates. Lat: -90..90, Lng: -180..180"))?;

    let raw = match state.router.reverse_lookup(point.lat, point.lng).await {
        ReverseOutcome::Found(raw) => raw,
        ReverseOutcome::NotFound => {
            info!(%point, ms = elapsed_ms(start), "GET /api/reverse -> not found");
            return Err(api_error(StatusCode::NOT_FOUND, PickerFailure::NotFound.to_string()));
        }
    };

    let location = normalize_result(&raw, Some(point), state.policy)
        .map_err(|failure| api_error(StatusCode::UNPROCESSABLE_ENTITY, failure.to_string()))?;

    info!(%point, suburb = %location.suburb, state = %location.state, ms = elapsed_ms(start), "GET /api/reverse");
    Ok(Json(location))
}

// ─── GET /api/states ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StateInfo {
    pub name: CanonicalState,
    pub areas: usize,
}

pub async fn state_list() -> Json<Vec<StateInfo>> {
    Json(
        gazetteer::summary()
            .into_iter()
            .map(|(name, areas)| StateInfo { name, areas })
            .collect(),
    )
}

// ─── GET /api/states/normalize ───────────────────────────────────

#[derive(Deserialize)]
pub struct NormalizeQuery {
    pub raw: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub input: String,
    /// `null` when the input matched nothing.
    pub state: Option<CanonicalState>,
    /// What a default-to-first caller would use.
    pub fallback: CanonicalState,
}

pub async fn normalize_state(Query(params): Query<NormalizeQuery>) -> Json<NormalizeResponse> {
    let input = params.raw.unwrap_or_default();
    Json(NormalizeResponse {
        state: normalize(&input),
        fallback: normalize_or_default(&input),
        input,
    })
}

// ─── GET /api/areas ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AreasQuery {
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub state: CanonicalState,
    pub areas: &'static [&'static str],
}

pub async fn areas(Query(params): Query<AreasQuery>) -> Result<Json<AreasResponse>, ApiError> {
    let raw = params.state.unwrap_or_default();
    let state = normalize(&raw)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, format!("Unknown state '{}'", raw)))?;
    Ok(Json(AreasResponse {
        state,
        areas: gazetteer::areas(state),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuggestionConfig;
    use crate::location::test_util::{hit, FakeGeocoder};
    use crate::location::{GeocodeQueryRouter, UnknownStatePolicy};

    fn app(fake: FakeGeocoder) -> Arc<AppState> {
        Arc::new(AppState {
            router: GeocodeQueryRouter::new(Arc::new(fake), &SuggestionConfig::default()),
            policy: UnknownStatePolicy::DefaultToFirst,
        })
    }

    #[tokio::test]
    async fn test_suggest_normalizes_results() {
        let fake = FakeGeocoder::new().with_forward(
            "Lekki",
            0,
            vec![hit("Plot 5, Lekki Phase 1, Lagos, Nigeria", "Lagos", "Lagos State")],
        );
        let Json(resp) = suggest(
            State(app(fake)),
            Query(SuggestQuery { q: Some(" Lekki ".into()) }),
        )
        .await;

        assert_eq!(resp.query, "Lekki");
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].location.suburb, "Lekki Phase 1");
        assert_eq!(resp.results[0].location.state, CanonicalState::Lagos);
    }

    #[tokio::test]
    async fn test_suggest_short_query_is_empty() {
        let Json(resp) = suggest(
            State(app(FakeGeocoder::new())),
            Query(SuggestQuery { q: Some("La".into()) }),
        )
        .await;
        assert!(resp.results.is_empty());
    }

    #[tokio::test]
    async fn test_reverse_ok() {
        let mut garki = hit("Unnamed Road, Garki, Abuja, Nigeria", "Abuja", "Federal Capital Territory");
        garki.lat = 9.03;
        garki.lng = 7.49;
        let Json(loc) = reverse(
            State(app(FakeGeocoder::new().with_reverse(garki))),
            Query(ReverseQuery { lat: Some(9.03), lng: Some(7.49) }),
        )
        .await
        .unwrap();
        assert_eq!(loc.suburb, "Garki");
        assert_eq!(loc.state, CanonicalState::Fct);
    }

    #[tokio::test]
    async fn test_reverse_not_found_is_404() {
        let err = reverse(
            State(app(FakeGeocoder::new())),
            Query(ReverseQuery { lat: Some(4.0), lng: Some(3.0) }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reverse_bad_input_is_400() {
        let missing = reverse(
            State(app(FakeGeocoder::new())),
            Query(ReverseQuery { lat: Some(4.0), lng: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(missing.0, StatusCode::BAD_REQUEST);

        let out_of_range = reverse(
            State(app(FakeGeocoder::new())),
            Query(ReverseQuery { lat: Some(91.0), lng: Some(3.0) }),
        )
        .await
        .unwrap_err();
        assert_eq!(out_of_range.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_state_list() {
        let Json(list) = state_list().await;
        assert_eq!(list.len(), 37);
        assert_eq!(list[0].name, CanonicalState::Abia);
    }

    #[tokio::test]
    async fn test_normalize_state_endpoint() {
        let Json(fct) = normalize_state(Query(NormalizeQuery {
            raw: Some("federal capital territory".into()),
        }))
        .await;
        assert_eq!(fct.state, Some(CanonicalState::Fct));

        let Json(unknown) = normalize_state(Query(NormalizeQuery { raw: Some("Narnia".into()) })).await;
        assert_eq!(unknown.state, None);
        assert_eq!(unknown.fallback, CanonicalState::ALL[0]);
    }

    #[tokio::test]
    async fn test_areas_endpoint() {
        let Json(resp) = areas(Query(AreasQuery { state: Some("fct".into()) })).await.unwrap();
        assert!(resp.areas.contains(&"Garki"));

        let err = areas(Query(AreasQuery { state: Some("Narnia".into()) })).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_router_builds() {
        let _ = crate::server::build_router(app(FakeGeocoder::new()));
    }
}
