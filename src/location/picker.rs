//! Location picker coordinator: drives one resolution cycle from text
//! suggestions, a GPS fix, or a map tap, into the hosting form's fields.
//!
//! Idle → Suggesting → Selected
//! Idle → GpsPending | MapPending → Selected | Failed → Idle
//!
//! A failed cycle never touches the form's fields.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::debounce::{SuggestionDebouncer, Suggestions};
use super::providers::{GeocodeQueryRouter, PositionSource};
use super::states::{self, CanonicalState, UnknownStatePolicy};
use super::suburb::resolve_suburb;
use super::types::{Coordinates, InputMode, LocationError, NormalizedLocation, RawGeocodeResult, ReverseOutcome};
use crate::config::SuggestionConfig;

/// Observable picker state.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerState {
    Idle,
    Suggesting,
    GpsPending,
    MapPending,
    Selected(NormalizedLocation),
    Failed(PickerFailure),
}

/// Why a cycle failed. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerFailure {
    #[error("Location permission denied. Allow location access to use your current position.")]
    PermissionDenied,
    #[error("Could not get your current position: {0}")]
    PositionUnavailable(String),
    #[error("Could not resolve an address for this location.")]
    NotFound,
    #[error("Could not work out which state this address is in.")]
    UnresolvedState,
}

/// The hosting form's field setters.
///
/// The five setters run synchronously, once each, per successful
/// resolution. The hooks are optional.
pub trait FieldSink {
    fn set_address(&mut self, address: &str);
    fn set_city(&mut self, city: &str);
    fn set_state(&mut self, state: CanonicalState);
    fn set_suburb(&mut self, suburb: &str);
    fn set_coordinates(&mut self, coordinates: Option<Coordinates>);

    /// Dedicated callback, fired only when coordinates are known.
    fn on_coordinates(&mut self, _lat: f64, _lng: f64) {}

    fn on_failure(&mut self, _failure: &PickerFailure) {}

    fn on_state_change(&mut self, _state: &PickerState) {}
}

/// Turn one raw geocoder hit into the canonical record.
///
/// `point` overrides the hit's own coordinates (GPS fix / map tap).
pub fn normalize_result(
    raw: &RawGeocodeResult,
    point: Option<Coordinates>,
    policy: UnknownStatePolicy,
) -> Result<NormalizedLocation, PickerFailure> {
    let state = states::normalize_with_policy(raw.state().unwrap_or_default(), policy)
        .ok_or(PickerFailure::UnresolvedState)?;
    let city = raw.city().unwrap_or_default().to_string();
    let suburb = resolve_suburb(raw, &city, state);
    let address = raw
        .address()
        .unwrap_or_else(|| raw.display_name.trim())
        .to_string();

    Ok(NormalizedLocation {
        address,
        city,
        state,
        suburb,
        coordinates: point.or_else(|| raw.coordinates()),
    })
}

pub struct LocationPickerCoordinator<S: FieldSink> {
    router: Arc<GeocodeQueryRouter>,
    debouncer: SuggestionDebouncer,
    position: Arc<dyn PositionSource>,
    policy: UnknownStatePolicy,
    sink: S,
    state: PickerState,
}

impl<S: FieldSink> LocationPickerCoordinator<S> {
    pub fn new(
        router: Arc<GeocodeQueryRouter>,
        position: Arc<dyn PositionSource>,
        sink: S,
        config: &SuggestionConfig,
    ) -> Self {
        let debouncer = SuggestionDebouncer::new(Arc::clone(&router), config);
        Self {
            router,
            debouncer,
            position,
            policy: UnknownStatePolicy::default(),
            sink,
            state: PickerState::Idle,
        }
    }

    pub fn with_policy(mut self, policy: UnknownStatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The visible suggestion list.
    pub fn suggestions(&self) -> watch::Receiver<Suggestions> {
        self.debouncer.subscribe()
    }

    /// A keystroke in the address box.
    pub fn on_text_input(&mut self, text: &str) {
        if self.debouncer.on_input(text) {
            if self.state != PickerState::Suggesting {
                self.transition(PickerState::Suggesting);
            }
        } else if self.state == PickerState::Suggesting {
            self.transition(PickerState::Idle);
        }
    }

    pub fn cancel_suggestions(&mut self) {
        self.debouncer.cancel();
        if self.state == PickerState::Suggesting {
            self.transition(PickerState::Idle);
        }
    }

    /// The user picked one of the visible suggestions.
    pub fn select_suggestion(&mut self, raw: &RawGeocodeResult) -> Result<NormalizedLocation, PickerFailure> {
        self.debouncer.cancel();
        self.complete(InputMode::Text, raw, None)
    }

    /// "Use my location".
    pub async fn use_gps(&mut self) -> Result<NormalizedLocation, PickerFailure> {
        self.debouncer.cancel();
        self.transition(PickerState::GpsPending);

        let fix = match self.position.current_position().await {
            Ok(fix) => fix,
            Err(LocationError::PermissionDenied) => return self.fail(PickerFailure::PermissionDenied),
            Err(e) => return self.fail(PickerFailure::PositionUnavailable(e.to_string())),
        };
        self.resolve_point(InputMode::Gps, fix).await
    }

    /// A tap on the map at (`lat`, `lng`).
    pub async fn tap_map(&mut self, lat: f64, lng: f64) -> Result<NormalizedLocation, PickerFailure> {
        self.debouncer.cancel();
        self.transition(PickerState::MapPending);

        match Coordinates::new(lat, lng) {
            Some(point) => self.resolve_point(InputMode::Map, point).await,
            None => self.fail(PickerFailure::NotFound),
        }
    }

    async fn resolve_point(
        &mut self,
        mode: InputMode,
        point: Coordinates,
    ) -> Result<NormalizedLocation, PickerFailure> {
        match self.router.reverse_lookup(point.lat, point.lng).await {
            ReverseOutcome::Found(raw) => self.complete(mode, &raw, Some(point)),
            ReverseOutcome::NotFound => self.fail(PickerFailure::NotFound),
        }
    }

    fn complete(
        &mut self,
        mode: InputMode,
        raw: &RawGeocodeResult,
        point: Option<Coordinates>,
    ) -> Result<NormalizedLocation, PickerFailure> {
        let location = match normalize_result(raw, point, self.policy) {
            Ok(location) => location,
            Err(failure) => return self.fail(failure),
        };

        info!(
            mode = %mode,
            state = %location.state,
            city = %location.city,
            suburb = %location.suburb,
            "location resolved"
        );
        self.write_fields(&location);
        self.transition(PickerState::Selected(location.clone()));
        Ok(location)
    }

    fn write_fields(&mut self, location: &NormalizedLocation) {
        self.sink.set_address(&location.address);
        self.sink.set_city(&location.city);
        self.sink.set_state(location.state);
        self.sink.set_suburb(&location.suburb);
        self.sink.set_coordinates(location.coordinates);
        if let Some(c) = location.coordinates {
            self.sink.on_coordinates(c.lat, c.lng);
        }
    }

    fn fail(&mut self, failure: PickerFailure) -> Result<NormalizedLocation, PickerFailure> {
        warn!(reason = %failure, "location resolution failed");
        self.transition(PickerState::Failed(failure.clone()));
        self.sink.on_failure(&failure);
        self.transition(PickerState::Idle);
        Err(failure)
    }

    fn transition(&mut self, next: PickerState) {
        debug!(from = ?self.state, to = ?next, "picker transition");
        self.state = next;
        self.sink.on_state_change(&self.state);
    }
}
