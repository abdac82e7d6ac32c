//! Listing Locator: address resolution for listing forms.

pub mod config;
pub mod location;
pub mod logging;
pub mod server;
