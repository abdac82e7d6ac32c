//! The closed set of canonical states and the normalizer that maps
//! arbitrary provider vocabulary onto it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 36 Nigerian states or the Federal Capital Territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalState {
    Abia,
    Adamawa,
    #[serde(rename = "Akwa Ibom")]
    AkwaIbom,
    Anambra,
    Bauchi,
    Bayelsa,
    Benue,
    Borno,
    #[serde(rename = "Cross River")]
    CrossRiver,
    Delta,
    Ebonyi,
    Edo,
    Ekiti,
    Enugu,
    #[serde(rename = "FCT")]
    Fct,
    Gombe,
    Imo,
    Jigawa,
    Kaduna,
    Kano,
    Katsina,
    Kebbi,
    Kogi,
    Kwara,
    Lagos,
    Nasarawa,
    Niger,
    Ogun,
    Ondo,
    Osun,
    Oyo,
    Plateau,
    Rivers,
    Sokoto,
    Taraba,
    Yobe,
    Zamfara,
}

impl CanonicalState {
    /// The canonical enumeration, in its fixed order.
    pub const ALL: [CanonicalState; 37] = [
        Self::Abia,
        Self::Adamawa,
        Self::AkwaIbom,
        Self::Anambra,
        Self::Bauchi,
        Self::Bayelsa,
        Self::Benue,
        Self::Borno,
        Self::CrossRiver,
        Self::Delta,
        Self::Ebonyi,
        Self::Edo,
        Self::Ekiti,
        Self::Enugu,
        Self::Fct,
        Self::Gombe,
        Self::Imo,
        Self::Jigawa,
        Self::Kaduna,
        Self::Kano,
        Self::Katsina,
        Self::Kebbi,
        Self::Kogi,
        Self::Kwara,
        Self::Lagos,
        Self::Nasarawa,
        Self::Niger,
        Self::Ogun,
        Self::Ondo,
        Self::Osun,
        Self::Oyo,
        Self::Plateau,
        Self::Rivers,
        Self::Sokoto,
        Self::Taraba,
        Self::Yobe,
        Self::Zamfara,
    ];

    /// Fallback used when a state string cannot be recognized.
    pub const DEFAULT: CanonicalState = Self::ALL[0];

    pub fn name(self) -> &'static str {
        match self {
            Self::Abia => "Abia",
            Self::Adamawa => "Adamawa",
            Self::AkwaIbom => "Akwa Ibom",
            Self::Anambra => "Anambra",
            Self::Bauchi => "Bauchi",
            Self::Bayelsa => "Bayelsa",
            Self::Benue => "Benue",
            Self::Borno => "Borno",
            Self::CrossRiver => "Cross River",
            Self::Delta => "Delta",
            Self::Ebonyi => "Ebonyi",
            Self::Edo => "Edo",
            Self::Ekiti => "Ekiti",
            Self::Enugu => "Enugu",
            Self::Fct => "FCT",
            Self::Gombe => "Gombe",
            Self::Imo => "Imo",
            Self::Jigawa => "Jigawa",
            Self::Kaduna => "Kaduna",
            Self::Kano => "Kano",
            Self::Katsina => "Katsina",
            Self::Kebbi => "Kebbi",
            Self::Kogi => "Kogi",
            Self::Kwara => "Kwara",
            Self::Lagos => "Lagos",
            Self::Nasarawa => "Nasarawa",
            Self::Niger => "Niger",
            Self::Ogun => "Ogun",
            Self::Ondo => "Ondo",
            Self::Osun => "Osun",
            Self::Oyo => "Oyo",
            Self::Plateau => "Plateau",
            Self::Rivers => "Rivers",
            Self::Sokoto => "Sokoto",
            Self::Taraba => "Taraba",
            Self::Yobe => "Yobe",
            Self::Zamfara => "Zamfara",
        }
    }
}

impl fmt::Display for CanonicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provider spellings that do not match a canonical name directly.
/// Keys are already case-folded.
const STATE_ALIASES: &[(&str, CanonicalState)] = &[
    ("federal capital territory", CanonicalState::Fct),
    ("abuja", CanonicalState::Fct),
    ("abuja fct", CanonicalState::Fct),
    ("fct abuja", CanonicalState::Fct),
    ("akwa-ibom", CanonicalState::AkwaIbom),
    ("cross-river", CanonicalState::CrossRiver),
    ("nassarawa", CanonicalState::Nasarawa),
];

/// What the caller wants done with a state string that matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatePolicy {
    /// Silently use the first canonical state.
    #[default]
    DefaultToFirst,
    /// Treat the resolution as failed.
    Reject,
}

fn fold(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Map a raw state string to a canonical state, or `None` if unrecognized.
///
/// "Lagos State", "  lagos " and "LAGOS" all resolve to Lagos;
/// "Federal Capital Territory" resolves to FCT.
pub fn normalize(raw: &str) -> Option<CanonicalState> {
    let folded = fold(raw);
    if folded.is_empty() {
        return None;
    }

    let candidates = [
        folded.as_str(),
        folded.strip_suffix(" state").unwrap_or(&folded),
    ];

    for key in candidates {
        if let Some((_, state)) = STATE_ALIASES.iter().find(|(alias, _)| *alias == key) {
            return Some(*state);
        }
        if let Some(state) = CanonicalState::ALL
            .iter()
            .find(|s| s.name().to_lowercase() == key)
        {
            return Some(*state);
        }
    }
    None
}

/// Like [`normalize`], but unrecognized input falls back to the first
/// canonical state.
pub fn normalize_or_default(raw: &str) -> CanonicalState {
    normalize(raw).unwrap_or(CanonicalState::DEFAULT)
}

/// Apply a policy: `None` only when the policy rejects unknown input.
pub fn normalize_with_policy(raw: &str, policy: UnknownStatePolicy) -> Option<CanonicalState> {
    match (normalize(raw), policy) {
        (Some(state), _) => Some(state),
        (None, UnknownStatePolicy::DefaultToFirst) => {
            tracing::warn!(raw, fallback = %CanonicalState::DEFAULT, "unrecognized state, using default");
            Some(CanonicalState::DEFAULT)
        }
        (None, UnknownStatePolicy::Reject) => None,
    }
}

/// Whether `name` is a canonical state name or a known alias of one.
pub fn is_state_name(name: &str) -> bool {
    normalize(name).is_some()
}
