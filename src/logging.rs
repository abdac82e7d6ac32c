//! Tracing subscriber setup for the `locator` binary.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the filter.

use tracing_subscriber::EnvFilter;

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "listing_locator=info",
        1 => "listing_locator=debug,tower_http=info",
        _ => "listing_locator=trace,tower_http=debug",
    }
}

/// Install the global subscriber. Writes to stderr so stdout stays JSON-only.
/// Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_filter(0), "listing_locator=info");
        assert!(default_filter(1).contains("debug"));
        assert!(default_filter(7).contains("trace"));
    }

    #[test]
    fn test_init_twice() {
        init(0);
        init(2);
    }
}
