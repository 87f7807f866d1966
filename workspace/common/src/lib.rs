//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' response payloads
//! so a frontend can deserialize API responses without duplicating shapes.

mod money;
mod timeseries;

pub use money::{format_compact_count, format_compact_usd, format_signed_percent, format_usd};
pub use timeseries::{DateRange, SeriesDto, SeriesPointDto};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

// ===================== KPIs =====================

/// Headline numbers of the KPI row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct KpiDto {
    #[schema(value_type = String, example = "48210.00")]
    pub revenue_forecast: Decimal,
    pub promo_boost: f64,
    pub units_forecast: u64,
    pub weather_impact: f64,
    pub today_vs_typical: f64,
    pub data_health_score: u8,
}

/// A metric card with its value already formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MetricCardDto {
    pub title: String,
    /// Display value such as `$48.2K` or `+8.4%`
    pub value: String,
    pub subtitle: String,
}

/// KPI snapshot together with the cards rendered from it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct KpiOverviewDto {
    pub kpis: KpiDto,
    pub cards: Vec<MetricCardDto>,
    pub range: DateRange,
}

// ===================== Items =====================

/// Item row of the top items table (mirrors the compute item).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub department: String,
    #[schema(value_type = String, example = "829.17")]
    pub forecast_revenue: Decimal,
    pub forecast_units: u32,
    #[schema(value_type = String, example = "2.49")]
    pub price: Decimal,
    pub is_promo_active: bool,
}

/// One page of the item table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TopItemsPage {
    pub items: Vec<ItemDto>,
    /// Matching items before pagination
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Result of a promo toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PromoToggleDto {
    pub item_id: String,
    pub is_promo_active: bool,
}

/// What-if projection of one item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScenarioPreviewDto {
    pub item_id: String,
    pub lift_percent: u32,
    pub baseline_units: u32,
    #[schema(value_type = String)]
    pub baseline_revenue: Decimal,
    pub projected_units: u32,
    #[schema(value_type = String)]
    pub projected_revenue: Decimal,
}

// ===================== Insights & profile =====================

/// Event shown in the insights panel and as chart bands.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InsightDto {
    pub id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub label: String,
    /// One of `weather`, `promo`, `seasonality`
    pub kind: String,
    pub impact: String,
}

/// Active business profile and what the pickers offer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProfileDto {
    pub business_type: String,
    pub display_name: String,
    pub locations: Vec<String>,
    pub departments: Vec<String>,
    pub today: NaiveDate,
    pub catalog_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_fields_serialize_as_strings() {
        let item = ItemDto {
            id: "item-0".to_string(),
            name: "Item 1 - Classic Cola 20oz".to_string(),
            department: "Beverages".to_string(),
            forecast_revenue: Decimal::new(82917, 2),
            forecast_units: 333,
            price: Decimal::new(249, 2),
            is_promo_active: true,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["forecast_revenue"], "829.17");
        assert_eq!(json["price"], "2.49");

        let back: ItemDto = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_api_response_shape() {
        let response = ApiResponse {
            data: PromoToggleDto {
                item_id: "item-3".to_string(),
                is_promo_active: true,
            },
            message: "Promo toggled".to_string(),
            success: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["is_promo_active"], true);
        assert_eq!(json["success"], true);
    }
}
