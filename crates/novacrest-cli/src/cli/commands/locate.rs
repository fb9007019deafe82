//! Nearest-branch lookup from the command line.

use console::style;

use novacrest::config::Settings;
use novacrest::geo::{BranchLocator, Coordinate};
use novacrest::services::geocode::geocoder_from_settings;

/// What to locate.
pub enum Query {
    Point(f64, f64),
    Address(String),
}

pub async fn cmd_locate(settings: &Settings, query: Query, json: bool) -> anyhow::Result<()> {
    let coordinate = match query {
        Query::Point(lat, lon) => {
            let c = Coordinate::new(lat, lon);
            c.validate()?;
            c
        }
        Query::Address(address) => {
            let geocoder = geocoder_from_settings(&settings.geocoder)?;
            if !json {
                println!(
                    "{} Geocoding '{}' via {}...",
                    style("→").cyan(),
                    address,
                    geocoder.name()
                );
            }
            geocoder
                .geocode(&address)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to geocode address: {}", e))?
        }
    };

    let locator = BranchLocator::new(settings.branches.clone());
    let result = locator.nearest(&coordinate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} Nearest branch: {} (#{})",
        style("✓").green(),
        style(&result.branch.name).bold(),
        result.branch.id
    );
    println!(
        "  Query ({:.4}, {:.4}), distance {:.2} km",
        coordinate.latitude, coordinate.longitude, result.distance_km
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn offline_settings() -> Settings {
        let mut settings = Settings::with_data_dir(PathBuf::from("/tmp/novacrest-locate"));
        settings.geocoder.base_url = "offline".to_string();
        settings
            .geocoder
            .static_addresses
            .insert("Allen Avenue".to_string(), Coordinate::new(6.6018, 3.3512));
        settings
    }

    #[tokio::test]
    async fn locates_point_and_static_address() {
        let settings = offline_settings();
        cmd_locate(&settings, Query::Point(6.5, 3.37), true)
            .await
            .unwrap();
        cmd_locate(&settings, Query::Address("allen avenue".to_string()), false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejects_out_of_range_point() {
        let settings = offline_settings();
        let err = cmd_locate(&settings, Query::Point(91.0, 0.0), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[tokio::test]
    async fn unknown_address_fails_offline() {
        let settings = offline_settings();
        let err = cmd_locate(&settings, Query::Address("Atlantis".to_string()), false)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to geocode address"));
    }
}
