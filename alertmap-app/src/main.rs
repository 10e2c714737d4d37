use alertmap::{
    alert::{AccidentDetails, AlertReview, EmergencyService},
    location::{
        CachedLocationProvider, FixedLocationProvider, LocationProvider, LocationSession,
        UnavailableLocationProvider,
    },
    rendering::svg::save_svg,
    AccidentAlert, AccidentMap, AlertAction, AlertMapOptions, Decision, LatLng, MapQuery,
    MapScene, Point, RenderContext,
};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

const USER_LOCATION_ENV: &str = "ALERTMAP_USER_LOCATION";

#[derive(Parser, Debug)]
#[command(
    name = "alertmap-app",
    about = "Review a detected accident and export its schematic map as SVG",
    long_about = "Prints the accident alert, applies an optional proceed/deny decision,\n\
                  resolves the user location and writes the accident map.\n\
                  Set ALERTMAP_USER_LOCATION=\"lat,lng\" to simulate a location fix."
)]
struct Cli {
    /// Review decision: proceed or deny
    decision: Option<Decision>,
    /// Map page query string, e.g. "id=ACC-1&lat=30.27&lng=77.98"
    #[arg(long)]
    query: Option<String>,
    /// JSON options file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Drawing surface size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    size: Option<Point>,
    /// Output SVG path
    #[arg(long, default_value = "accident-map.svg")]
    out: PathBuf,
}

impl Cli {
    fn surface(&self) -> Point {
        let (width, height) = alertmap::constants::DEFAULT_SURFACE_SIZE;
        self.size.unwrap_or(Point::new(width, height))
    }
}

fn parse_size(raw: &str) -> Result<Point, String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("size must look like 800x500, got {raw:?}"))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
    let size = Point::new(parse(w)?, parse(h)?);
    if !(size.x > 0.0 && size.y > 0.0) {
        return Err(format!("size must be positive, got {raw:?}"));
    }
    Ok(size)
}

/// Provider from `ALERTMAP_USER_LOCATION="lat,lng"`, or none at all
fn location_provider() -> anyhow::Result<Arc<dyn LocationProvider>> {
    match std::env::var(USER_LOCATION_ENV) {
        Ok(raw) => {
            let (lat, lng) = raw
                .split_once(',')
                .with_context(|| format!("{USER_LOCATION_ENV} must be \"lat,lng\", got {raw:?}"))?;
            let coords = LatLng::new(lat.trim().parse()?, lng.trim().parse()?);
            Ok(Arc::new(CachedLocationProvider::new(FixedLocationProvider::new(coords))))
        }
        Err(_) => Ok(Arc::new(UnavailableLocationProvider)),
    }
}

/// Headless accident review: print the alert, apply a decision, export the map
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let size = args.surface();
    let options = match &args.config {
        Some(path) => AlertMapOptions::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AlertMapOptions::default(),
    };

    let review = AlertReview::new(AccidentAlert::sample());
    let alert = review.alert();
    println!("Accident ID: {}", alert.id);
    println!("Detected:    {}", alert.timestamp);
    println!("Severity:    {}", alert.severity);
    for frame in &alert.frames {
        println!("  frame {} at {}", frame.id, frame.time);
    }

    if let Some(decision) = args.decision {
        match review.decide(decision) {
            AlertAction::OpenDirections(url) => println!("Open directions: {url}"),
            AlertAction::Notify(message) => println!("{message}"),
        }
    }

    let query = match &args.query {
        Some(raw) => MapQuery::parse(raw)?,
        None => alert.map_query(),
    };
    let accident = query.location();

    let mut session = LocationSession::start(location_provider()?, accident, &options);
    log::debug!("initial user location: {:?}", session.current());
    let user = session.resolved().await;

    let map = AccidentMap::new(accident, user, size, &options);
    let mut ctx = RenderContext::new(size.x, size.y)?;
    MapScene::new(&map, &options.style).render(&mut ctx)?;
    save_svg(&ctx, &args.out).with_context(|| format!("writing {}", args.out.display()))?;

    println!();
    println!("Accident ID: {}", query.id);
    println!("{}", query.coordinates_label());
    if map.show_fallback_notice() {
        println!("Using simulated location.");
    }
    println!("{}", map.estimate());
    println!();
    println!("Emergency Services");
    for service in EmergencyService::nearby_sample() {
        println!("  {service}");
    }
    let details = AccidentDetails::sample();
    println!("Accident Details");
    println!("  Type: {}", details.collision_type);
    println!("  Vehicles: {}", details.vehicles);
    println!("  Severity: {}", details.severity);
    println!();
    println!("Map written to {}", args.out.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["alertmap-app"]).unwrap();
        assert!(cli.decision.is_none());
        assert_eq!(cli.out, PathBuf::from("accident-map.svg"));
        assert_eq!(cli.surface(), Point::new(896.0, 500.0));
    }

    #[test]
    fn test_decision_and_flags() {
        let cli = Cli::try_parse_from([
            "alertmap-app",
            "deny",
            "--size",
            "800x600",
            "--query",
            "id=A&lat=1&lng=2",
            "--out",
            "map.svg",
        ])
        .unwrap();

        assert_eq!(cli.decision, Some(Decision::Deny));
        assert_eq!(cli.surface(), Point::new(800.0, 600.0));
        assert_eq!(cli.query.as_deref(), Some("id=A&lat=1&lng=2"));
        assert_eq!(cli.out, PathBuf::from("map.svg"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["alertmap-app", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["alertmap-app", "maybe"]).is_err());
        assert!(Cli::try_parse_from(["alertmap-app", "--size", "0x500"]).is_err());
        assert!(Cli::try_parse_from(["alertmap-app", "--size", "800"]).is_err());
    }
}
