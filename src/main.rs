use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use listing_locator::config::LocatorConfig;
use listing_locator::location::{
    CanonicalState, Coordinates, FieldSink, FixedPosition, GeocodeQueryRouter, HttpGeocoder,
    IpPositionSource, LocationPickerCoordinator, NormalizedLocation, PickerFailure, PositionSource,
    UnknownStatePolicy,
};
use listing_locator::{logging, server};

/// Listing Locator: resolve an address, a position, or a map point into
/// the address/city/state/suburb fields of a listing.
///
/// Examples:
///   locator "Plot 5, Lekki Phase 1"
///   locator --lat 9.0333 --lng 7.4891
///   locator --gps
///   locator --state "federal capital territory"
///   locator --serve --port 3000
#[derive(Parser)]
#[command(name = "locator", version, about, long_about = None)]
struct Cli {
    /// Free-text address to search for (positional).
    #[arg(index = 1)]
    query: Option<String>,

    /// Latitude of a map tap (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a map tap (-180 to 180).
    #[arg(long, alias = "lon", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Use the current position (approximated from the public IP).
    #[arg(long)]
    gps: bool,

    /// Only normalize a state name and print the result.
    #[arg(long)]
    state: Option<String>,

    /// Fail instead of defaulting when the state is unrecognized.
    #[arg(long)]
    strict_state: bool,

    /// Run the HTTP API.
    #[arg(long)]
    serve: bool,

    /// Host to bind with --serve.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind with --serve.
    #[arg(long)]
    port: Option<u16>,

    /// Config file (TOML). Defaults to <config dir>/listing-locator/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Collects the fields the picker writes, like a listing form would.
#[derive(Default)]
struct CliForm {
    location: Option<NormalizedLocation>,
}

impl CliForm {
    fn entry(&mut self) -> &mut NormalizedLocation {
        self.location.get_or_insert_with(|| NormalizedLocation {
            address: String::new(),
            city: String::new(),
            state: CanonicalState::DEFAULT,
            suburb: String::new(),
            coordinates: None,
        })
    }
}

impl FieldSink for CliForm {
    fn set_address(&mut self, address: &str) {
        self.entry().address = address.to_string();
    }

    fn set_city(&mut self, city: &str) {
        self.entry().city = city.to_string();
    }

    fn set_state(&mut self, state: CanonicalState) {
        self.entry().state = state;
    }

    fn set_suburb(&mut self, suburb: &str) {
        self.entry().suburb = suburb.to_string();
    }

    fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.entry().coordinates = coordinates;
    }

    fn on_failure(&mut self, failure: &PickerFailure) {
        eprintln!("  \u{26A0}\u{FE0F}  {}", failure);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = LocatorConfig::load(cli.config.as_deref())?;
    if cli.strict_state {
        config.unknown_state = UnknownStatePolicy::Reject;
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // 1. State normalization only
    if let Some(raw) = &cli.state {
        return print_state(raw);
    }

    // 2. HTTP API
    if cli.serve {
        server::start(&config).await?;
        return Ok(());
    }

    // 3. One resolution cycle
    let router = Arc::new(GeocodeQueryRouter::new(
        Arc::new(HttpGeocoder::new(&config.geocoder)),
        &config.suggestions,
    ));
    let position: Arc<dyn PositionSource> = if cli.gps {
        Arc::new(IpPositionSource::new(&config.geocoder))
    } else {
        Arc::new(FixedPosition::denied())
    };
    let mut picker = LocationPickerCoordinator::new(
        Arc::clone(&router),
        position,
        CliForm::default(),
        &config.suggestions,
    )
    .with_policy(config.unknown_state);

    let outcome = if let Some(query) = &cli.query {
        let candidates = router.forward_search(query).await;
        if candidates.is_empty() {
            anyhow::bail!("No suggestions for '{}'", query);
        }
        eprintln!("  Suggestions for '{}':", query);
        for (i, c) in candidates.iter().enumerate() {
            eprintln!("    {}. {}", i + 1, c.display_name);
        }
        picker.select_suggestion(&candidates[0])
    } else if cli.gps {
        picker.use_gps().await
    } else if let (Some(lat), Some(lng)) = (cli.lat, cli.lng) {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            anyhow::bail!("Invalid coordinates. Lat: -90..90, Lng: -180..180");
        }
        picker.tap_map(lat, lng).await
    } else {
        eprintln!("Error: No location specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  locator \"Plot 5, Lekki Phase 1\"");
        eprintln!("  locator --lat 9.0333 --lng 7.4891");
        eprintln!("  locator --gps");
        eprintln!("  locator --state Lagos");
        eprintln!("  locator --serve");
        std::process::exit(2);
    };

    match outcome {
        Ok(_) => {
            let form = picker.sink();
            if let Some(location) = &form.location {
                eprintln!("  {}", location.display_line());
                println!("{}", serde_json::to_string_pretty(location)?);
            }
            Ok(())
        }
        Err(failure) => Err(failure.into()),
    }
}

fn print_state(raw: &str) -> anyhow::Result<()> {
    let resolved = listing_locator::location::normalize(raw);
    let value = serde_json::json!({
        "input": raw,
        "state": resolved,
        "fallback": listing_locator::location::normalize_or_default(raw),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
