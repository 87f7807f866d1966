//! Per business type presentation: store locations, catalog vocabulary,
//! metric card copy and the insight events shown next to the charts.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use model::{BusinessType, DateRange, Department};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::items::CatalogVocabulary;
use crate::kpi::KpiSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Weather,
    Promo,
    Seasonality,
}

/// Insight pinned relative to "today" by day offsets.
#[derive(Debug, Clone, Copy)]
pub struct InsightTemplate {
    pub id: &'static str,
    pub start_offset: i64,
    pub end_offset: i64,
    pub label: &'static str,
    pub kind: InsightKind,
    pub impact: &'static str,
}

impl InsightTemplate {
    fn resolve(&self, today: NaiveDate) -> InsightEvent {
        InsightEvent {
            id: self.id.to_string(),
            from: today + Duration::days(self.start_offset),
            to: today + Duration::days(self.end_offset),
            label: self.label.to_string(),
            kind: self.kind,
            impact: self.impact.to_string(),
        }
    }
}

/// Insight with concrete dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightEvent {
    pub id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub label: String,
    pub kind: InsightKind,
    pub impact: String,
}

impl InsightEvent {
    /// True when the event shares at least one day with `range`.
    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.from <= range.to() && self.to >= range.from()
    }
}

/// Card titles and fixed subtitles. Subtitles depending on data are built
/// in [`BusinessWidgets::metric_cards`].
#[derive(Debug, Clone, Copy)]
pub struct CardCopy {
    pub revenue_title: &'static str,
    pub promo_title: &'static str,
    pub units_title: &'static str,
    pub weather_title: &'static str,
    pub weather_subtitle: &'static str,
    pub health_subtitle: &'static str,
}

const DEFAULT_COPY: CardCopy = CardCopy {
    revenue_title: "Money coming in",
    promo_title: "Promo/Pricing boost",
    units_title: "Units we'll sell",
    weather_title: "Weather & events",
    weather_subtitle: "Heat wave this weekend",
    health_subtitle: "All feeds connected",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum MetricValue {
    Money(Decimal),
    Percent(f64),
    Count(u64),
    Score(u8),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: MetricValue,
    pub subtitle: String,
}

impl MetricCard {
    fn new(title: &str, value: MetricValue, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value,
            subtitle: subtitle.into(),
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Everything about the dashboard that changes with the business type.
pub trait BusinessWidgets: Send + Sync + std::fmt::Debug {
    fn business_type(&self) -> BusinessType;

    /// Store locations offered by the location picker.
    fn locations(&self) -> &'static [&'static str] {
        &["Downtown Market", "Airport Express", "University Plaza", "Westside Mall"]
    }

    fn vocabulary(&self) -> CatalogVocabulary;

    fn insight_templates(&self) -> &'static [InsightTemplate];

    fn card_copy(&self) -> CardCopy {
        DEFAULT_COPY
    }

    /// Insight events resolved against `today`.
    fn insights(&self, today: NaiveDate) -> Vec<InsightEvent> {
        self.insight_templates()
            .iter()
            .map(|template| template.resolve(today))
            .collect()
    }

    /// The six metric cards, in display order.
    fn metric_cards(&self, kpis: &KpiSnapshot, window_days: u32, today: NaiveDate) -> Vec<MetricCard> {
        trace!("Building metric cards for {}", self.business_type());
        let copy = self.card_copy();
        let comparison = if kpis.today_vs_typical >= 0.0 { "Above" } else { "Below" };

        vec![
            MetricCard::new(
                copy.revenue_title,
                MetricValue::Money(kpis.revenue_forecast),
                format!("Next {} days forecast", window_days),
            ),
            MetricCard::new(
                copy.promo_title,
                MetricValue::Percent(kpis.promo_boost),
                "vs no-promo baseline",
            ),
            MetricCard::new(copy.units_title, MetricValue::Count(kpis.units_forecast), "Projected volume"),
            MetricCard::new(
                copy.weather_title,
                MetricValue::Percent(kpis.weather_impact),
                copy.weather_subtitle,
            ),
            MetricCard::new(
                "Today vs Typical",
                MetricValue::Percent(kpis.today_vs_typical),
                format!("{} average {}", comparison, weekday_name(today.weekday())),
            ),
            MetricCard::new(
                "Data health",
                MetricValue::Score(kpis.data_health_score),
                copy.health_subtitle,
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvenienceWidgets;

#[derive(Debug, Clone, Copy, Default)]
pub struct GroceryWidgets;

#[derive(Debug, Clone, Copy, Default)]
pub struct LiquorWidgets;

#[derive(Debug, Clone, Copy, Default)]
pub struct RestaurantWidgets;

impl BusinessWidgets for ConvenienceWidgets {
    fn business_type(&self) -> BusinessType {
        BusinessType::Convenience
    }

    fn vocabulary(&self) -> CatalogVocabulary {
        CatalogVocabulary {
            styles: &["Classic", "Zero Sugar", "Family Size", "Mini", "Spicy", "Original"],
            products: &[
                ("Cola 20oz", Department::Beverages),
                ("Potato Chips", Department::Snacks),
                ("Energy Drink", Department::Beverages),
                ("Candy Bar", Department::Snacks),
                ("Paper Towels", Department::Household),
                ("Toothpaste", Department::PersonalCare),
                ("Sandwich Bread", Department::Grocery),
            ],
        }
    }

    fn insight_templates(&self) -> &'static [InsightTemplate] {
        &[
            InsightTemplate {
                id: "heat-wave",
                start_offset: 2,
                end_offset: 4,
                label: "Heat wave incoming",
                kind: InsightKind::Weather,
                impact: "+3% cold drinks/ice",
            },
            InsightTemplate {
                id: "snacks-multi-buy",
                start_offset: 0,
                end_offset: 7,
                label: "Snacks multi-buy promo",
                kind: InsightKind::Promo,
                impact: "+8% snack category",
            },
            InsightTemplate {
                id: "big-game",
                start_offset: 10,
                end_offset: 11,
                label: "Big Game Weekend",
                kind: InsightKind::Seasonality,
                impact: "+12% overall traffic",
            },
        ]
    }
}

impl BusinessWidgets for GroceryWidgets {
    fn business_type(&self) -> BusinessType {
        BusinessType::Grocery
    }

    fn locations(&self) -> &'static [&'static str] {
        &["Downtown Market", "Westside Mall", "Riverside Center"]
    }

    fn vocabulary(&self) -> CatalogVocabulary {
        CatalogVocabulary {
            styles: &["Organic", "Store Brand", "Fresh", "Value Pack", "Whole Grain"],
            products: &[
                ("Milk 1gal", Department::Grocery),
                ("Tortilla Chips", Department::Snacks),
                ("Orange Juice", Department::Beverages),
                ("Dish Soap", Department::Household),
                ("Shampoo", Department::PersonalCare),
                ("Eggs 12ct", Department::Grocery),
            ],
        }
    }

    fn insight_templates(&self) -> &'static [InsightTemplate] {
        &[
            InsightTemplate {
                id: "cold-snap",
                start_offset: 1,
                end_offset: 3,
                label: "Cold snap",
                kind: InsightKind::Weather,
                impact: "+5% soups and baking",
            },
            InsightTemplate {
                id: "produce-weekly",
                start_offset: 0,
                end_offset: 6,
                label: "Weekly produce circular",
                kind: InsightKind::Promo,
                impact: "+6% fresh produce",
            },
            InsightTemplate {
                id: "payday-weekend",
                start_offset: 8,
                end_offset: 9,
                label: "Payday weekend",
                kind: InsightKind::Seasonality,
                impact: "+9% basket size",
            },
        ]
    }

    fn card_copy(&self) -> CardCopy {
        CardCopy {
            weather_subtitle: "Cold snap early this week",
            ..DEFAULT_COPY
        }
    }
}

impl BusinessWidgets for LiquorWidgets {
    fn business_type(&self) -> BusinessType {
        BusinessType::Liquor
    }

    fn vocabulary(&self) -> CatalogVocabulary {
        CatalogVocabulary {
            styles: &["Craft", "Imported", "Reserve", "Light", "Premium"],
            products: &[
                ("IPA 6-pack", Department::Beverages),
                ("Red Wine", Department::Beverages),
                ("Mixed Nuts", Department::Snacks),
                ("Ice Bag", Department::Grocery),
                ("Plastic Cups", Department::Household),
            ],
        }
    }

    fn insight_templates(&self) -> &'static [InsightTemplate] {
        &[
            InsightTemplate {
                id: "warm-weekend",
                start_offset: 2,
                end_offset: 4,
                label: "Warm weekend",
                kind: InsightKind::Weather,
                impact: "+4% beer and seltzer",
            },
            InsightTemplate {
                id: "wine-tasting",
                start_offset: 0,
                end_offset: 5,
                label: "Wine tasting promo",
                kind: InsightKind::Promo,
                impact: "+10% wine category",
            },
            InsightTemplate {
                id: "big-game",
                start_offset: 10,
                end_offset: 11,
                label: "Big Game Weekend",
                kind: InsightKind::Seasonality,
                impact: "+18% beer volume",
            },
        ]
    }

    fn card_copy(&self) -> CardCopy {
        CardCopy {
            units_title: "Bottles we'll sell",
            ..DEFAULT_COPY
        }
    }
}

impl BusinessWidgets for RestaurantWidgets {
    fn business_type(&self) -> BusinessType {
        BusinessType::Restaurant
    }

    fn locations(&self) -> &'static [&'static str] {
        &["Downtown Market", "University Plaza"]
    }

    fn vocabulary(&self) -> CatalogVocabulary {
        CatalogVocabulary {
            styles: &["House", "Spicy", "Vegan", "Large", "Kids"],
            products: &[
                ("Burger", Department::Grocery),
                ("Fries", Department::Snacks),
                ("Lemonade", Department::Beverages),
                ("Salad", Department::Grocery),
                ("Iced Tea", Department::Beverages),
            ],
        }
    }

    fn insight_templates(&self) -> &'static [InsightTemplate] {
        &[
            InsightTemplate {
                id: "rainy-evenings",
                start_offset: 1,
                end_offset: 2,
                label: "Rainy evenings",
                kind: InsightKind::Weather,
                impact: "+7% delivery orders",
            },
            InsightTemplate {
                id: "lunch-combo",
                start_offset: 0,
                end_offset: 7,
                label: "Lunch combo promo",
                kind: InsightKind::Promo,
                impact: "+5% weekday covers",
            },
            InsightTemplate {
                id: "campus-move-in",
                start_offset: 9,
                end_offset: 12,
                label: "Campus move-in",
                kind: InsightKind::Seasonality,
                impact: "+11% foot traffic",
            },
        ]
    }

    fn card_copy(&self) -> CardCopy {
        CardCopy {
            units_title: "Covers we'll serve",
            weather_subtitle: "Rain expected this week",
            ..DEFAULT_COPY
        }
    }
}

static CONVENIENCE: ConvenienceWidgets = ConvenienceWidgets;
static GROCERY: GroceryWidgets = GroceryWidgets;
static LIQUOR: LiquorWidgets = LiquorWidgets;
static RESTAURANT: RestaurantWidgets = RestaurantWidgets;

/// Widgets of `business_type`.
pub fn widgets_for(business_type: BusinessType) -> &'static dyn BusinessWidgets {
    match business_type {
        BusinessType::Convenience => &CONVENIENCE,
        BusinessType::Grocery => &GROCERY,
        BusinessType::Liquor => &LIQUOR,
        BusinessType::Restaurant => &RESTAURANT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 8).unwrap()
    }

    fn kpis(today_vs_typical: f64) -> KpiSnapshot {
        KpiSnapshot {
            revenue_forecast: Decimal::new(48200, 0),
            promo_boost: 8.4,
            units_forecast: 12400,
            weather_impact: 2.1,
            today_vs_typical,
            data_health_score: 98,
        }
    }

    #[test]
    fn test_widgets_match_business_type() {
        for business_type in BusinessType::ALL {
            assert_eq!(widgets_for(business_type).business_type(), business_type);
        }
    }

    #[test]
    fn test_vocabularies_are_usable() {
        for business_type in BusinessType::ALL {
            let vocabulary = widgets_for(business_type).vocabulary();
            assert!(!vocabulary.styles.is_empty());
            assert!(!vocabulary.products.is_empty());
        }
    }

    #[test]
    fn test_convenience_insights_follow_today() {
        let events = widgets_for(BusinessType::Convenience).insights(today());
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].label, "Heat wave incoming");
        assert_eq!(events[0].from, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(events[0].to, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(events[0].kind, InsightKind::Weather);

        assert_eq!(events[2].kind, InsightKind::Seasonality);
        assert_eq!(events[2].from, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    }

    #[test]
    fn test_overlap() {
        let events = widgets_for(BusinessType::Convenience).insights(today());
        let first_week = DateRange::new(today(), NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()).unwrap();
        let overlapping: Vec<&str> = events
            .iter()
            .filter(|event| event.overlaps(&first_week))
            .map(|event| event.id.as_str())
            .collect();
        assert_eq!(overlapping, vec!["heat-wave", "snacks-multi-buy"]);
    }

    #[test]
    fn test_metric_cards() {
        // 2026-01-08 is a Thursday.
        let cards = widgets_for(BusinessType::Convenience).metric_cards(&kpis(1.2), 14, today());
        let titles: Vec<&str> = cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Money coming in",
                "Promo/Pricing boost",
                "Units we'll sell",
                "Weather & events",
                "Today vs Typical",
                "Data health"
            ]
        );
        assert_eq!(cards[0].subtitle, "Next 14 days forecast");
        assert_eq!(cards[0].value, MetricValue::Money(Decimal::new(48200, 0)));
        assert_eq!(cards[4].subtitle, "Above average Thursday");
        assert_eq!(cards[5].value, MetricValue::Score(98));
    }

    #[test]
    fn test_below_typical_copy() {
        let cards = widgets_for(BusinessType::Restaurant).metric_cards(&kpis(-1.1), 7, today());
        assert_eq!(cards[2].title, "Covers we'll serve");
        assert_eq!(cards[4].subtitle, "Below average Thursday");
    }
}
