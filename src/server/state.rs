use crate::location::{GeocodeQueryRouter, UnknownStatePolicy};

pub struct AppState {
    pub router: GeocodeQueryRouter,
    pub policy: UnknownStatePolicy,
}
