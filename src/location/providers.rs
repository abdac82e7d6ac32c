//! Location providers: the HTTP geocoder, position sources, and the
//! query router that turns provider failures into explicit outcomes.

use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

use super::types::{Coordinates, GeoQuery, LocationError, RawGeocodeResult, ReverseOutcome};
use crate::config::{GeocoderConfig, SuggestionConfig};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LocationError>> + Send + 'a>>;

/// A geocoding backend. Implementations do I/O only; validation and
/// soft-failure live in [`GeocodeQueryRouter`].
pub trait Geocoder: Send + Sync + 'static {
    /// Forward geocode free text into candidates, in provider order.
    fn search(&self, text: String) -> ProviderFuture<'_, Vec<RawGeocodeResult>>;

    /// Reverse geocode a point. `Ok(None)` means the provider answered
    /// but had no address for it.
    fn reverse(&self, lat: f64, lng: f64) -> ProviderFuture<'_, Option<RawGeocodeResult>>;
}

/// Where the device is. Stands in for the platform's GPS API.
pub trait PositionSource: Send + Sync + 'static {
    fn current_position(&self) -> ProviderFuture<'_, Coordinates>;
}

// ─── HTTP geocoder ──────────────────────────────────────────────

/// Talks to the geocoding proxy: `GET /geocode?q=` and `GET /geocode?lat=&lon=`.
#[derive(Clone)]
pub struct HttpGeocoder {
    agent: ureq::Agent,
    endpoint: String,
    user_agent: String,
}

impl HttpGeocoder {
    pub fn new(config: &GeocoderConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Self {
            agent,
            endpoint: format!("{}/geocode", config.base_url.trim_end_matches('/')),
            user_agent: config.user_agent.clone(),
        }
    }

    fn fetch(&self, params: &[(&str, String)]) -> Result<Value, LocationError> {
        let mut request = self.agent.get(&self.endpoint).set("User-Agent", &self.user_agent);
        for (key, value) in params {
            request = request.query(key, value);
        }

        let response = request
            .call()
            .map_err(|e| LocationError::Network(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }

    /// Run a blocking fetch on tokio's blocking pool.
    async fn fetch_async(&self, params: Vec<(&'static str, String)>) -> Result<Value, LocationError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.fetch(&params))
            .await
            .map_err(|e| LocationError::Network(format!("lookup task failed: {}", e)))?
    }
}

impl Geocoder for HttpGeocoder {
    fn search(&self, text: String) -> ProviderFuture<'_, Vec<RawGeocodeResult>> {
        Box::pin(async move {
            let body = self.fetch_async(vec![("q", text)]).await?;
            parse_forward(body)
        })
    }

    fn reverse(&self, lat: f64, lng: f64) -> ProviderFuture<'_, Option<RawGeocodeResult>> {
        Box::pin(async move {
            let body = self
                .fetch_async(vec![("lat", lat.to_string()), ("lon", lng.to_string())])
                .await?;
            parse_reverse(body, lat, lng)
        })
    }
}

#[derive(Deserialize)]
struct ForwardPayload {
    #[serde(default)]
    results: Vec<Value>,
}

/// `{ results: [...] }`. Individual malformed entries are skipped.
fn parse_forward(body: Value) -> Result<Vec<RawGeocodeResult>, LocationError> {
    let payload: ForwardPayload =
        serde_json::from_value(body).map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    Ok(payload
        .results
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawGeocodeResult>(item) {
            Ok(r) => Some(r),
            Err(e) => {
                debug!(error = %e, "skipping malformed geocoder result");
                None
            }
        })
        .collect())
}

/// A payload without a non-empty `address` means "not found". Missing
/// coordinates or display name are filled from the query.
fn parse_reverse(mut body: Value, lat: f64, lng: f64) -> Result<Option<RawGeocodeResult>, LocationError> {
    let obj = body
        .as_object_mut()
        .ok_or_else(|| LocationError::InvalidResponse("expected a JSON object".into()))?;

    let address = match obj.get("address").and_then(Value::as_str).map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => return Ok(None),
    };

    obj.entry("displayName").or_insert_with(|| Value::String(address));
    obj.entry("lat").or_insert_with(|| lat.into());
    if !obj.contains_key("lng") && !obj.contains_key("lon") {
        obj.insert("lng".into(), lng.into());
    }

    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))
}

// ─── Position sources ───────────────────────────────────────────

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Coarse "use my location" via IP geolocation, for hosts without GPS.
#[derive(Clone)]
pub struct IpPositionSource {
    agent: ureq::Agent,
    url: String,
    user_agent: String,
}

impl IpPositionSource {
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(config.timeout()).build(),
            url: config.ip_lookup_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .agent
            .get(&self.url)
            .set("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| LocationError::Network(e.to_string()))?;

        let r: IpApiResult = response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

        let lat = r.latitude.ok_or_else(|| LocationError::InvalidResponse("no latitude".into()))?;
        let lng = r.longitude.ok_or_else(|| LocationError::InvalidResponse("no longitude".into()))?;
        Coordinates::new(lat, lng).ok_or_else(|| LocationError::InvalidResponse("non-finite position".into()))
    }
}

impl PositionSource for IpPositionSource {
    fn current_position(&self) -> ProviderFuture<'_, Coordinates> {
        let this = self.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || this.locate())
                .await
                .map_err(|e| LocationError::Network(format!("position task failed: {}", e)))?
        })
    }
}

/// A fixed answer: either a position or a permission refusal.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(Option<Coordinates>);

impl FixedPosition {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self(Coordinates::new(lat, lng))
    }

    pub fn denied() -> Self {
        Self(None)
    }
}

impl PositionSource for FixedPosition {
    fn current_position(&self) -> ProviderFuture<'_, Coordinates> {
        let fix = self.0;
        Box::pin(async move { fix.ok_or(LocationError::PermissionDenied) })
    }
}

// ─── Query router ───────────────────────────────────────────────

/// Issues forward/reverse queries and absorbs every provider failure.
pub struct GeocodeQueryRouter {
    geocoder: Arc<dyn Geocoder>,
    min_query_chars: usize,
    max_results: usize,
}

impl GeocodeQueryRouter {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: &SuggestionConfig) -> Self {
        Self {
            geocoder,
            min_query_chars: config.min_query_chars,
            max_results: config.max_suggestions.max(1),
        }
    }

    pub fn min_query_chars(&self) -> usize {
        self.min_query_chars
    }

    /// Candidates for `query`, possibly empty. Short queries never reach
    /// the provider; provider errors yield an empty list.
    pub async fn forward_search(&self, query: &str) -> Vec<RawGeocodeResult> {
        let text = query.trim();
        if !GeoQuery::Text(text.to_string()).is_dispatchable(self.min_query_chars) {
            return Vec::new();
        }

        match self.geocoder.search(text.to_string()).await {
            Ok(results) => {
                let total = results.len();
                let kept: Vec<RawGeocodeResult> = results
                    .into_iter()
                    .filter(|r| r.coordinates().is_some())
                    .take(self.max_results)
                    .collect();
                debug!(query = text, total, kept = kept.len(), "forward search");
                kept
            }
            Err(e) => {
                warn!(query = text, error = %e, "forward search failed, returning no suggestions");
                Vec::new()
            }
        }
    }

    /// Address at a point, or `NotFound` for any failure or empty answer.
    pub async fn reverse_lookup(&self, lat: f64, lng: f64) -> ReverseOutcome {
        let point = match Coordinates::new(lat, lng) {
            Some(p) if GeoQuery::Point(p).is_dispatchable(self.min_query_chars) => p,
            _ => {
                debug!(lat, lng, "reverse lookup skipped: coordinates out of range");
                return ReverseOutcome::NotFound;
            }
        };

        match self.geocoder.reverse(point.lat, point.lng).await {
            Ok(Some(raw)) if raw.address().is_some() && raw.coordinates().is_some() => {
                ReverseOutcome::Found(raw)
            }
            Ok(_) => {
                debug!(%point, "reverse lookup returned no address");
                ReverseOutcome::NotFound
            }
            Err(e) => {
                warn!(%point, error = %e, "reverse lookup failed");
                ReverseOutcome::NotFound
            }
        }
    }
}
