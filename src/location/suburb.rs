//! Suburb extraction from a geocoder's free-text result.
//!
//! Chain, first success wins:
//!   provider suburb → gazetteer match on displayName segments → shape heuristic → ""
//!
//! Never returns the city, a state name, or the country.

use regex::Regex;
use std::sync::LazyLock;

use super::gazetteer;
use super::states::{self, CanonicalState};
use super::types::RawGeocodeResult;

/// Word characters, spaces, hyphens, apostrophes, slashes, periods.
static AREA_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-'/.]{2,50}$").expect("area shape regex"));

const COUNTRY_TOKENS: &[&str] = &["nigeria", "ng"];

/// Shortest segment allowed to match by being part of a longer gazetteer entry.
const MIN_PARTIAL_LEN: usize = 3;

/// Best-effort suburb for `raw`, given the already-resolved city and state.
/// Returns an empty string when nothing qualifies.
pub fn resolve_suburb(raw: &RawGeocodeResult, city: &str, state: CanonicalState) -> String {
    let raw_state = raw.state();

    if let Some(suburb) = raw.suburb() {
        if !is_excluded(suburb, city, raw_state) {
            return suburb.to_string();
        }
    }

    let segments: Vec<&str> = raw
        .display_name
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| !is_excluded(s, city, raw_state))
        .collect();

    if let Some(found) = segments.iter().find_map(|seg| gazetteer_match(seg, state)) {
        return found;
    }

    segments
        .into_iter()
        .find(|seg| has_area_shape(seg))
        .map(str::to_string)
        .unwrap_or_default()
}

fn is_excluded(segment: &str, city: &str, raw_state: Option<&str>) -> bool {
    let city = city.trim();
    if !city.is_empty() && segment.eq_ignore_ascii_case(city) {
        return true;
    }
    if raw_state.is_some_and(|s| segment.eq_ignore_ascii_case(s.trim())) {
        return true;
    }
    if COUNTRY_TOKENS.iter().any(|c| segment.eq_ignore_ascii_case(c)) {
        return true;
    }
    states::is_state_name(segment)
}

/// Exact hits return the gazetteer's spelling; partial hits return the
/// segment as the geocoder wrote it.
fn gazetteer_match(segment: &str, state: CanonicalState) -> Option<String> {
    if let Some(area) = gazetteer::lookup(state, segment) {
        return Some(area.to_string());
    }

    let seg = segment.to_lowercase();
    let long_enough = seg.chars().count() >= MIN_PARTIAL_LEN;
    let partial = gazetteer::areas(state).iter().any(|a| {
        let area = a.to_lowercase();
        seg.contains(&area) || (long_enough && area.contains(&seg))
    });
    partial.then(|| segment.to_string())
}

fn has_area_shape(segment: &str) -> bool {
    AREA_SHAPE.is_match(segment) && !segment.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}
