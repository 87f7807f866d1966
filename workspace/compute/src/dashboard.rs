use chrono::NaiveDate;
use model::{BusinessType, FilterSelection, Item, Metric};
use tracing::{debug, info, instrument, warn};

use crate::calendar::enumerate;
use crate::error::{ComputeError, Result};
use crate::items::{self, ItemPage, ItemSort};
use crate::kpi::{self, KpiFactors, KpiSnapshot};
use crate::profile::{BusinessWidgets, InsightEvent, MetricCard, widgets_for};
use crate::rng::SeededSequence;
use crate::scenario::{self, ScenarioPreview};
use crate::series::{DailyPoint, SeriesPoint, SynthesisOptions, synthesize};
use crate::settings::{BusinessProfile, ForecastSettings};
use crate::weights;

/// Fork streams far above any day number, so catalog draws never collide with
/// the per-day series forks.
const CATALOG_STREAM_BASE: u64 = u64::MAX - 16;

fn catalog_stream(business_type: BusinessType) -> u64 {
    let offset = match business_type {
        BusinessType::Convenience => 0,
        BusinessType::Grocery => 1,
        BusinessType::Liquor => 2,
        BusinessType::Restaurant => 3,
    };
    CATALOG_STREAM_BASE + offset
}

/// Session service behind every dashboard operation.
///
/// Owns the settings, the application-wide sequence generator and the item
/// catalog of the active business type. Series and KPIs are recomputed on
/// every call; only promo flags are session state.
#[derive(Debug, Clone)]
pub struct ForecastDashboard {
    settings: ForecastSettings,
    today: NaiveDate,
    sequence: SeededSequence,
    business_type: BusinessType,
    widgets: &'static dyn BusinessWidgets,
    catalog: Vec<Item>,
}

impl ForecastDashboard {
    /// Validates `settings` and generates the catalog of `business_type`.
    #[instrument(skip(settings))]
    pub fn new(settings: ForecastSettings, business_type: BusinessType, today: NaiveDate) -> Result<Self> {
        settings.validate()?;
        let sequence = SeededSequence::new(settings.seed);
        let widgets = widgets_for(business_type);
        let catalog = Self::build_catalog(&settings, &sequence, widgets)?;

        info!(
            "Dashboard ready for {} with {} items, today is {}",
            business_type,
            catalog.len(),
            today
        );
        Ok(Self {
            settings,
            today,
            sequence,
            business_type,
            widgets,
            catalog,
        })
    }

    fn build_catalog(
        settings: &ForecastSettings,
        sequence: &SeededSequence,
        widgets: &dyn BusinessWidgets,
    ) -> Result<Vec<Item>> {
        let seed = sequence.fork(catalog_stream(widgets.business_type())).seed();
        items::generate_catalog(seed, settings.catalog_size, &widgets.vocabulary())
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn business_type(&self) -> BusinessType {
        self.business_type
    }

    pub fn widgets(&self) -> &'static dyn BusinessWidgets {
        self.widgets
    }

    pub fn catalog(&self) -> &[Item] {
        &self.catalog
    }

    /// Profile constants of the active business type.
    pub fn profile(&self) -> Result<&BusinessProfile> {
        self.settings.profile(self.business_type)
    }

    /// Switches the business type, regenerating the catalog (promo toggles are lost).
    #[instrument(skip(self), fields(current = %self.business_type))]
    pub fn set_business_type(&mut self, business_type: BusinessType) -> Result<()> {
        if business_type == self.business_type {
            debug!("Business type already {}", business_type);
            return Ok(());
        }
        let widgets = widgets_for(business_type);
        self.catalog = Self::build_catalog(&self.settings, &self.sequence, widgets)?;
        self.widgets = widgets;
        self.business_type = business_type;
        info!("Switched business type to {}", business_type);
        Ok(())
    }

    /// Combined store x department multiplier of `filters`.
    pub fn filter_multiplier(&self, filters: &FilterSelection) -> f64 {
        weights::resolve(
            &filters.stores,
            &filters.departments,
            &self.settings.store_weights,
            &self.settings.department_weights,
        )
    }

    fn daily_points(&self, filters: &FilterSelection) -> Result<Vec<DailyPoint>> {
        let range = &filters.date_range;
        if range.num_days() > self.settings.max_range_days {
            warn!("Rejected range of {} days", range.num_days());
            return Err(ComputeError::InvalidInput(format!(
                "date range spans {} days, at most {} are allowed",
                range.num_days(),
                self.settings.max_range_days
            )));
        }

        let days = enumerate(&range.from(), &range.to())?;
        let profile = self.profile()?;
        let options = SynthesisOptions::from_settings(&self.settings, filters.explain);
        Ok(synthesize(
            &days,
            profile.base_revenue,
            profile.base_units,
            self.today,
            &options,
            &self.sequence,
        ))
    }

    fn weighted(&self, points: Vec<DailyPoint>, metric: Metric, multiplier: f64) -> Vec<SeriesPoint> {
        let mut series: Vec<SeriesPoint> = points.into_iter().map(|point| point.into_metric(metric)).collect();
        weights::apply_multiplier(&mut series, multiplier);
        series
    }

    /// Daily series of `metric` over the filter range, weighted by the filters.
    #[instrument(skip(self, filters), fields(from = %filters.date_range.from(), to = %filters.date_range.to()))]
    pub fn series(&self, metric: Metric, filters: &FilterSelection) -> Result<Vec<SeriesPoint>> {
        let points = self.daily_points(filters)?;
        let series = self.weighted(points, metric, self.filter_multiplier(filters));
        debug!("Built {} series with {} points", metric, series.len());
        Ok(series)
    }

    pub fn revenue_series(&self, filters: &FilterSelection) -> Result<Vec<SeriesPoint>> {
        self.series(Metric::Revenue, filters)
    }

    pub fn units_series(&self, filters: &FilterSelection) -> Result<Vec<SeriesPoint>> {
        self.series(Metric::Units, filters)
    }

    /// KPI snapshot over the filter range.
    #[instrument(skip(self, filters))]
    pub fn kpis(&self, filters: &FilterSelection) -> Result<KpiSnapshot> {
        let points = self.daily_points(filters)?;
        let multiplier = self.filter_multiplier(filters);
        let revenue = self.weighted(points.clone(), Metric::Revenue, multiplier);
        let units = self.weighted(points, Metric::Units, multiplier);
        Ok(kpi::aggregate(
            &revenue,
            &units,
            filters,
            self.profile()?,
            KpiFactors::from_settings(&self.settings),
        ))
    }

    /// One page of the item table. Item values are not weighted by store filters.
    pub fn top_items(&self, page: usize, per_page: usize, sort: ItemSort, filters: &FilterSelection) -> ItemPage {
        items::query_sorted(
            &self.catalog,
            &filters.search_term,
            &filters.departments,
            sort,
            page,
            per_page,
        )
    }

    /// Flips the promo flag of `item_id`; the change lasts for the session.
    pub fn toggle_promo(&mut self, item_id: &str) -> Result<bool> {
        items::toggle_promo(&mut self.catalog, item_id)
    }

    /// Insight events of the active business type.
    pub fn insights(&self) -> Vec<InsightEvent> {
        self.widgets.insights(self.today)
    }

    /// Metric cards for `kpis`, the revenue card describing a `window_days` forecast.
    pub fn metric_cards(&self, kpis: &KpiSnapshot, window_days: u32) -> Vec<MetricCard> {
        self.widgets.metric_cards(kpis, window_days, self.today)
    }

    pub fn scenario_preview(&self, item_id: &str, lift_percent: u32) -> Result<ScenarioPreview> {
        let item = self
            .catalog
            .iter()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| ComputeError::NotFound(format!("item {}", item_id)))?;
        scenario::preview(item, lift_percent)
    }
}
