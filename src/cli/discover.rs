//! Discover command handler
//!
//! Validates search flags, resolves the location and prints recommendations.

use crate::api::FitnessGoal;
use crate::cli::connect;
use crate::config::Config;
use crate::constants::timing::GEOLOCATION_TIMEOUT_SECS;
use crate::discovery::location::lookup;
use crate::discovery::{
    validate_discovery_with, DiscoveryForm, GeoState, LocationMode, LocationResolver,
    RecommendationWorkflow,
};
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, SearchOutcome};
use crate::geo::{require_device_locator, IpLocator};
use clap::Args;
use std::time::Duration;

/// Discover command arguments
#[derive(Args)]
pub struct DiscoverArgs {
    /// Fitness goal (e.g. WeightLoss)
    #[arg(long, short = 'g')]
    pub goal: Option<String>,

    /// Minimum budget
    #[arg(long)]
    pub budget_min: Option<String>,

    /// Maximum budget
    #[arg(long)]
    pub budget_max: Option<String>,

    /// Maximum distance in km (1-150)
    #[arg(long, short = 'd')]
    pub distance: Option<String>,

    /// Number of results (1-20)
    #[arg(long, short = 'n')]
    pub take: Option<String>,

    /// Use --lat/--lng instead of automatic location
    #[arg(long)]
    pub manual: bool,

    /// Latitude for manual location
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude for manual location
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,

    /// Automatic locator: ip or none
    #[arg(long)]
    pub locator: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// List available goals
    #[arg(short = 'G', long = "list-goals")]
    pub list_goals: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl DiscoverArgs {
    /// Flags as a raw form; coordinates imply manual mode
    fn to_form(&self) -> DiscoveryForm {
        let manual = self.manual || self.lat.is_some() || self.lng.is_some();
        DiscoveryForm {
            goal: self.goal.clone(),
            budget_min: self.budget_min.clone(),
            budget_max: self.budget_max.clone(),
            max_distance_km: self.distance.clone(),
            take: self.take.clone(),
            location_mode: manual.then(|| LocationMode::Manual.to_string()),
            latitude: self.lat.clone(),
            longitude: self.lng.clone(),
        }
    }
}

/// Run the discover command
pub async fn run(args: DiscoverArgs) -> Result<()> {
    if args.list_goals {
        list_goals();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let format_name = args.format.clone().unwrap_or_else(|| config.discovery.format.clone());
    let formatter = get_formatter(&format_name)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format_name)))?;

    let filter = validate_discovery_with(&args.to_form(), &config.discovery_defaults())
        .map_err(Error::Validation)?;

    let locator_name = args.locator.clone().unwrap_or_else(|| config.discovery.locator.clone());
    let locator = require_device_locator(&locator_name)?;

    let mut resolver = LocationResolver::new();
    let state = resolver.activate_and_locate(filter.location_mode, &locator).await;
    if filter.location_mode == LocationMode::Auto {
        eprintln!("{}", state.message);
    }

    let client = connect(&config)?;
    let results = RecommendationWorkflow::new(&client)
        .execute(&filter, resolver.coordinate_for(&filter))
        .await?;

    let outcome = SearchOutcome::from_results(results);
    print!("{}", formatter.format(&outcome)?);

    Ok(())
}

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Automatic locator: ip or none
    #[arg(long)]
    pub locator: Option<String>,

    /// Ignore the cached IP location
    #[arg(long)]
    pub refresh: bool,
}

/// Run the locate command
pub async fn locate(args: LocateArgs) -> Result<()> {
    let config = Config::load()?;

    if args.refresh {
        IpLocator::new().clear_cache();
    }

    let locator_name = args.locator.unwrap_or(config.discovery.locator);
    let locator = require_device_locator(&locator_name)?;

    let timeout = Duration::from_secs(GEOLOCATION_TIMEOUT_SECS);
    let coordinate = lookup(&locator, timeout).await.map_err(|failure| {
        eprintln!("{}", GeoState::failed(&failure).message);
        Error::from(failure)
    })?;

    println!("{}", GeoState::located(coordinate).message);
    println!("{:.6}, {:.6}", coordinate.lat, coordinate.lng);

    Ok(())
}

fn list_goals() {
    println!("Available goals:");
    for goal in FitnessGoal::ALL {
        println!("  {:<16} {}", goal.as_str(), goal.label());
    }
}

fn list_formats() {
    println!("Available formats:");
    for info in available_formats() {
        println!("  {:<8} {}", info.name, info.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: DiscoverArgs,
    }

    #[test]
    fn test_coordinates_imply_manual_mode() {
        let cli = TestCli::parse_from(["fitspace", "--lat", "24.7", "--lng", "-46.7"]);
        let form = cli.args.to_form();

        assert_eq!(form.location_mode.as_deref(), Some("manual"));
        assert_eq!(form.longitude.as_deref(), Some("-46.7"));
    }

    #[test]
    fn test_auto_mode_left_to_defaults() {
        let cli = TestCli::parse_from(["fitspace", "-g", "Endurance", "-n", "3"]);
        let form = cli.args.to_form();

        assert!(form.location_mode.is_none());
        assert_eq!(form.take.as_deref(), Some("3"));
        assert_eq!(form.goal.as_deref(), Some("Endurance"));
    }

    #[test]
    fn test_flags_validate_like_the_form() {
        let cli = TestCli::parse_from(["fitspace", "--manual", "--lat", "100", "--lng", "10"]);
        let errors =
            validate_discovery_with(&cli.args.to_form(), &Default::default()).unwrap_err();

        assert_eq!(errors.get("latitude"), Some("Latitude must be between -90 and 90"));
    }
}
