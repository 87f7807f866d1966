//! Configuration constants consumed by the generators.
//!
//! Nothing in the algorithms hardcodes business numbers: baselines, weights,
//! jitter bands and annotation rules all come from [`ForecastSettings`]. The
//! defaults reproduce the demo dashboard; the binary layers a settings file and
//! environment overrides on top of them.

use chrono::Weekday;
use model::{BusinessType, Department, Metric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ComputeError, Result};
use crate::rng::SeededSequence;

/// Largest accepted store or department weight.
pub const MAX_FILTER_WEIGHT: f64 = 100.0;

/// Uniform multiplicative noise band `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterBand {
    pub low: f64,
    pub high: f64,
}

impl JitterBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Draws one factor from the band.
    pub fn sample(&self, rng: &mut SeededSequence) -> f64 {
        rng.uniform(self.low, self.high)
    }
}

/// How forecast values are reported for days that already have actuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityPolicy {
    /// Past days carry only `actual`, future days only `forecast`.
    #[default]
    Exclusive,
    /// Past days also carry `forecast = actual` so the forecast line is unbroken.
    CarryThrough,
}

/// Baseline magnitudes and KPI constants of one business type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Typical weekday revenue, before weekend scaling and filter weights.
    pub base_revenue: f64,
    /// Typical weekday units, before weekend scaling and filter weights.
    pub base_units: f64,
    pub promo_boost_pct: f64,
    pub weather_impact_pct: f64,
    pub today_vs_typical_pct: f64,
    pub data_health_score: u8,
}

/// Attaches `label` to points of `metric` falling on `weekday`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRule {
    pub metric: Metric,
    pub weekday: Weekday,
    pub label: String,
    /// Only annotate days after "today".
    #[serde(default = "default_future_only")]
    pub future_only: bool,
}

fn default_future_only() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Seed of the application-wide sequence generator.
    pub seed: u64,
    /// Number of items generated into the session catalog.
    pub catalog_size: usize,
    /// Magnitude multiplier for Saturdays and Sundays.
    pub weekend_multiplier: f64,
    pub actual_band: JitterBand,
    pub forecast_band: JitterBand,
    pub continuity: ContinuityPolicy,
    /// KPI totals are scaled by this factor while a search term is applied.
    pub search_kpi_factor: f64,
    /// Percentage points added to the promo boost KPI in "explain changes" mode.
    pub explain_promo_bonus_pct: f64,
    /// Longest accepted date range, in days.
    pub max_range_days: i64,
    pub store_weights: BTreeMap<String, f64>,
    pub department_weights: BTreeMap<String, f64>,
    pub profiles: BTreeMap<BusinessType, BusinessProfile>,
    pub annotations: Vec<AnnotationRule>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        let store_weights = [
            ("Downtown Market", 1.0),
            ("Airport Express", 1.2),
            ("University Plaza", 0.85),
            ("Westside Mall", 1.1),
        ]
        .into_iter()
        .map(|(store, weight)| (store.to_string(), weight))
        .collect();

        let department_weights = [
            (Department::Grocery, 1.0),
            (Department::Snacks, 0.9),
            (Department::Beverages, 1.15),
            (Department::Household, 0.7),
            (Department::PersonalCare, 0.6),
        ]
        .into_iter()
        .map(|(department, weight)| (department.label().to_string(), weight))
        .collect();

        let profiles = [
            (BusinessType::Convenience, profile(3500.0, 850.0, 8.4, 2.1, 1.2, 98)),
            (BusinessType::Grocery, profile(12000.0, 2600.0, 6.2, 1.4, 0.8, 97)),
            (BusinessType::Liquor, profile(5200.0, 610.0, 11.5, 3.2, 2.4, 95)),
            (BusinessType::Restaurant, profile(4100.0, 320.0, 4.8, 4.5, -1.1, 96)),
        ]
        .into_iter()
        .collect();

        Self {
            seed: 12345,
            catalog_size: 100,
            weekend_multiplier: 1.3,
            actual_band: JitterBand::new(0.90, 1.10),
            forecast_band: JitterBand::new(0.97, 1.12),
            continuity: ContinuityPolicy::Exclusive,
            search_kpi_factor: 0.4,
            explain_promo_bonus_pct: 0.5,
            max_range_days: 366,
            store_weights,
            department_weights,
            profiles,
            annotations: vec![
                AnnotationRule {
                    metric: Metric::Revenue,
                    weekday: Weekday::Fri,
                    label: "Heat wave".to_string(),
                    future_only: true,
                },
                AnnotationRule {
                    metric: Metric::Units,
                    weekday: Weekday::Sat,
                    label: "Sport Event".to_string(),
                    future_only: true,
                },
            ],
        }
    }
}

fn profile(
    base_revenue: f64,
    base_units: f64,
    promo_boost_pct: f64,
    weather_impact_pct: f64,
    today_vs_typical_pct: f64,
    data_health_score: u8,
) -> BusinessProfile {
    BusinessProfile {
        base_revenue,
        base_units,
        promo_boost_pct,
        weather_impact_pct,
        today_vs_typical_pct,
        data_health_score,
    }
}

impl ForecastSettings {
    /// Profile of `business_type`.
    pub fn profile(&self, business_type: BusinessType) -> Result<&BusinessProfile> {
        self.profiles.get(&business_type).ok_or_else(|| {
            ComputeError::InvalidSettings(format!("no profile configured for {}", business_type))
        })
    }

    /// Rejects settings the generators cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(ComputeError::InvalidSettings(message));

        if self.catalog_size == 0 {
            return invalid("catalog_size must be at least 1".to_string());
        }
        if !(self.weekend_multiplier.is_finite() && self.weekend_multiplier > 0.0) {
            return invalid(format!("weekend_multiplier must be positive, got {}", self.weekend_multiplier));
        }
        for (name, band) in [("actual_band", &self.actual_band), ("forecast_band", &self.forecast_band)] {
            if !(band.low.is_finite() && band.high.is_finite() && band.low <= band.high) {
                return invalid(format!("{} must satisfy low <= high, got [{}, {})", name, band.low, band.high));
            }
        }
        if !(self.search_kpi_factor > 0.0 && self.search_kpi_factor <= 1.0) {
            return invalid(format!("search_kpi_factor must be in (0, 1], got {}", self.search_kpi_factor));
        }
        if !self.explain_promo_bonus_pct.is_finite() {
            return invalid(format!("explain_promo_bonus_pct must be finite, got {}", self.explain_promo_bonus_pct));
        }
        if self.max_range_days < 1 {
            return invalid("max_range_days must be at least 1".to_string());
        }
        for (table, weights) in [("store_weights", &self.store_weights), ("department_weights", &self.department_weights)] {
            if let Some((label, weight)) = weights
                .iter()
                .find(|(_, w)| !(w.is_finite() && **w > 0.0 && **w <= MAX_FILTER_WEIGHT))
            {
                return invalid(format!(
                    "{} entry {:?} must be in (0, {}], got {}",
                    table, label, MAX_FILTER_WEIGHT, weight
                ));
            }
        }
        for business_type in BusinessType::ALL {
            let profile = self.profile(business_type)?;
            if !(profile.base_revenue >= 0.0 && profile.base_units >= 0.0) {
                return invalid(format!("profile {} has a negative baseline", business_type));
            }
            if profile.data_health_score > 100 {
                return invalid(format!("profile {} has data_health_score above 100", business_type));
            }
        }
        Ok(())
    }
}
