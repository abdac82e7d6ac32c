//! Address resolution subsystem.
//!
//! Turns address keystrokes, a device position, or a tapped map point into
//! one [`NormalizedLocation`] for a listing form. The gazetteer, state
//! normalizer and suburb resolver are pure; I/O sits behind [`Geocoder`]
//! and [`PositionSource`].

pub mod debounce;
pub mod gazetteer;
pub mod picker;
pub mod providers;
pub mod states;
pub mod suburb;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use debounce::{SuggestionBoard, SuggestionDebouncer, Suggestions};
pub use picker::{normalize_result, FieldSink, LocationPickerCoordinator, PickerFailure, PickerState};
pub use providers::{
    FixedPosition, GeocodeQueryRouter, Geocoder, HttpGeocoder, IpPositionSource, PositionSource,
};
pub use states::{normalize, normalize_or_default, CanonicalState, UnknownStatePolicy};
pub use suburb::resolve_suburb;
pub use types::{
    Coordinates, GeoQuery, InputMode, LocationError, NormalizedLocation, RawGeocodeResult, ReverseOutcome,
};
