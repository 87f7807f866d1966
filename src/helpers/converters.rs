use common::{
    DateRange, InsightDto, ItemDto, KpiDto, MetricCardDto, ProfileDto, PromoToggleDto, ScenarioPreviewDto,
    SeriesDto, SeriesPointDto, format_compact_count, format_compact_usd, format_signed_percent,
};
use compute::items::page_count;
use compute::{
    ForecastDashboard, InsightEvent, InsightKind, ItemPage, KpiSnapshot, MetricCard, MetricValue, ScenarioPreview,
    SeriesPoint,
};
use model::{Department, FilterSelection, Item, Metric};

pub fn series_to_dto(metric: Metric, filters: &FilterSelection, multiplier: f64, points: Vec<SeriesPoint>) -> SeriesDto {
    SeriesDto {
        metric: metric.to_string(),
        range: DateRange::new(filters.date_range.from(), filters.date_range.to()),
        multiplier,
        points: points
            .into_iter()
            .map(|point| SeriesPointDto {
                date: point.date,
                is_future: point.is_future,
                actual: point.actual,
                forecast: point.forecast,
                annotation: point.annotation,
            })
            .collect(),
    }
}

pub fn kpis_to_dto(kpis: &KpiSnapshot) -> KpiDto {
    KpiDto {
        revenue_forecast: kpis.revenue_forecast,
        promo_boost: kpis.promo_boost,
        units_forecast: kpis.units_forecast,
        weather_impact: kpis.weather_impact,
        today_vs_typical: kpis.today_vs_typical,
        data_health_score: kpis.data_health_score,
    }
}

/// Formats a card value the way the dashboard shows it.
pub fn card_to_dto(card: MetricCard) -> MetricCardDto {
    let value = match card.value {
        MetricValue::Money(amount) => format_compact_usd(amount),
        MetricValue::Percent(percent) => format_signed_percent(percent),
        MetricValue::Count(count) => format_compact_count(count),
        MetricValue::Score(score) => format!("{}%", score),
    };
    MetricCardDto {
        title: card.title,
        value,
        subtitle: card.subtitle,
    }
}

pub fn item_to_dto(item: &Item) -> ItemDto {
    ItemDto {
        id: item.id().to_string(),
        name: item.name().to_string(),
        department: item.department().label().to_string(),
        forecast_revenue: item.forecast_revenue(),
        forecast_units: item.forecast_units(),
        price: item.price(),
        is_promo_active: item.is_promo_active(),
    }
}

pub fn page_to_dto(page: ItemPage, page_number: usize, per_page: usize) -> common::TopItemsPage {
    common::TopItemsPage {
        items: page.items.iter().map(item_to_dto).collect(),
        total: page.total,
        page: page_number,
        per_page,
        total_pages: page_count(page.total, per_page),
    }
}

pub fn promo_to_dto(item_id: &str, is_promo_active: bool) -> PromoToggleDto {
    PromoToggleDto {
        item_id: item_id.to_string(),
        is_promo_active,
    }
}

pub fn scenario_to_dto(preview: ScenarioPreview) -> ScenarioPreviewDto {
    ScenarioPreviewDto {
        item_id: preview.item_id,
        lift_percent: preview.lift_percent,
        baseline_units: preview.baseline_units,
        baseline_revenue: preview.baseline_revenue,
        projected_units: preview.projected_units,
        projected_revenue: preview.projected_revenue,
    }
}

pub fn insight_to_dto(event: InsightEvent) -> InsightDto {
    let kind = match event.kind {
        InsightKind::Weather => "weather",
        InsightKind::Promo => "promo",
        InsightKind::Seasonality => "seasonality",
    };
    InsightDto {
        id: event.id,
        from: event.from,
        to: event.to,
        label: event.label,
        kind: kind.to_string(),
        impact: event.impact,
    }
}

pub fn profile_to_dto(dashboard: &ForecastDashboard) -> ProfileDto {
    let business_type = dashboard.business_type();
    ProfileDto {
        business_type: business_type.key().to_string(),
        display_name: business_type.display_name().to_string(),
        locations: dashboard
            .widgets()
            .locations()
            .iter()
            .map(|location| location.to_string())
            .collect(),
        departments: Department::ALL.iter().map(|department| department.label().to_string()).collect(),
        today: dashboard.today(),
        catalog_size: dashboard.catalog().len(),
    }
}
