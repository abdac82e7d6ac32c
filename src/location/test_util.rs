//! Shared fakes for location unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::providers::{Geocoder, ProviderFuture};
use super::types::{LocationError, RawGeocodeResult};

/// A geocoder hit with an address, city and state, somewhere in Lagos.
pub fn hit(display_name: &str, city: &str, state: &str) -> RawGeocodeResult {
    RawGeocodeResult {
        display_name: display_name.into(),
        address: Some(display_name.into()),
        city: Some(city.into()),
        state: Some(state.into()),
        suburb: None,
        neighbourhood: None,
        lat: 6.4541,
        lng: 3.3947,
    }
}

/// In-memory geocoder with per-query latency and call recording.
#[derive(Default)]
pub struct FakeGeocoder {
    forward: HashMap<String, (Duration, Vec<RawGeocodeResult>)>,
    reverse: Option<RawGeocodeResult>,
    fail: AtomicBool,
    calls: Mutex<Vec<String>>,
    reverse_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forward(mut self, query: &str, delay_ms: u64, results: Vec<RawGeocodeResult>) -> Self {
        self.forward
            .insert(query.to_string(), (Duration::from_millis(delay_ms), results));
        self
    }

    pub fn with_reverse(mut self, result: RawGeocodeResult) -> Self {
        self.reverse = Some(result);
        self
    }

    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Forward queries received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    fn search(&self, text: String) -> ProviderFuture<'_, Vec<RawGeocodeResult>> {
        self.calls.lock().unwrap().push(text.clone());
        let fail = self.fail.load(Ordering::SeqCst);
        let (delay, results) = self.forward.get(&text).cloned().unwrap_or_default();
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(LocationError::Network("connection refused".into()));
            }
            Ok(results)
        })
    }

    fn reverse(&self, _lat: f64, _lng: f64) -> ProviderFuture<'_, Option<RawGeocodeResult>> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail.load(Ordering::SeqCst);
        let result = self.reverse.clone();
        Box::pin(async move {
            if fail {
                return Err(LocationError::Network("connection refused".into()));
            }
            Ok(result)
        })
    }
}
