use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use compute::{ForecastDashboard, ForecastSettings};
use config::{Config, Environment, File};
use model::BusinessType;
use moka::future::Cache;
use std::{sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tracing::{debug, info, trace};

use crate::schemas::AppState;

/// Prefix of environment overrides, e.g. `DEMANDCAST__WEEKEND_MULTIPLIER=1.5`.
pub const ENV_PREFIX: &str = "DEMANDCAST";

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "demandcast";

/// Load forecast settings: defaults, then the settings file, then the environment.
///
/// An explicit `path` must exist; the default file is optional. Profiles the
/// sources leave out keep their default values. The result is validated.
pub fn load_settings(path: Option<&str>) -> Result<ForecastSettings> {
    trace!("Loading settings from {:?}", path);
    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
    };

    let mut settings: ForecastSettings = Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Failed to parse settings")?;

    for (business_type, profile) in ForecastSettings::default().profiles {
        settings.profiles.entry(business_type).or_insert(profile);
    }

    settings.validate().context("Invalid settings")?;
    debug!("Settings loaded: seed {}, catalog size {}", settings.seed, settings.catalog_size);
    Ok(settings)
}

/// Initialize application state around a fresh dashboard session
pub fn initialize_app_state(
    settings: ForecastSettings,
    business_type: BusinessType,
    today: Option<NaiveDate>,
) -> Result<AppState> {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    info!("Starting {} dashboard with today = {}", business_type, today);

    let dashboard = ForecastDashboard::new(settings, business_type, today)?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        dashboard: Arc::new(RwLock::new(dashboard)),
        cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.seed, ForecastSettings::default().seed);
        assert_eq!(settings.profiles.len(), BusinessType::ALL.len());
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("demandcast-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("override.yaml");
        std::fs::write(
            &path,
            "seed: 7\nweekend_multiplier: 1.5\nprofiles:\n  grocery:\n    base_revenue: 9000.0\n    base_units: 2000.0\n    promo_boost_pct: 5.0\n    weather_impact_pct: 1.0\n    today_vs_typical_pct: 0.5\n    data_health_score: 90\n",
        )
        .unwrap();

        let settings = load_settings(path.to_str()).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.weekend_multiplier, 1.5);
        assert_eq!(settings.profile(BusinessType::Grocery).unwrap().base_revenue, 9000.0);
        assert_eq!(settings.profile(BusinessType::Convenience).unwrap().base_revenue, 3500.0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(load_settings(Some("/nonexistent/demandcast-settings")).is_err());
    }

    #[test]
    fn test_app_state_uses_given_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let state = initialize_app_state(ForecastSettings::default(), BusinessType::Grocery, Some(today)).unwrap();
        let dashboard = state.dashboard.try_read().unwrap();
        assert_eq!(dashboard.today(), today);
        assert_eq!(dashboard.business_type(), BusinessType::Grocery);
    }
}
