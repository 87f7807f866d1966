use model::{Department, Selection};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::series::SeriesPoint;

/// Smallest multiplier handed out; keeps the result strictly positive after rounding.
const MIN_MULTIPLIER: f64 = 0.01;

/// Decimal places the combined multiplier is rounded to.
const MULTIPLIER_PRECISION: u32 = 2;

/// Weight of one filter dimension.
///
/// The `All` sentinel weighs exactly 1. An explicit selection weighs the mean
/// of its labels' configured weights, unknown labels counting as 1.
pub fn dimension_weight(selection: &Selection<String>, weights: &BTreeMap<String, f64>) -> f64 {
    let Selection::Only(labels) = selection else {
        return 1.0;
    };

    let total: f64 = labels
        .iter()
        .map(|label| {
            weights
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(label.trim()))
                .map(|(_, weight)| *weight)
                .unwrap_or_else(|| {
                    trace!("No weight configured for {:?}, using 1", label);
                    1.0
                })
        })
        .sum();
    total / labels.len() as f64
}

/// Department labels rewritten to their canonical form, so aliases such as
/// `personal_care` find the weight configured for `Personal Care`.
fn canonical_departments(selection: &Selection<String>) -> Selection<String> {
    Selection::only(selection.values().map(|label| match label.parse::<Department>() {
        Ok(department) => department.label().to_string(),
        Err(_) => label.clone(),
    }))
}

fn round_multiplier(raw: f64) -> f64 {
    Decimal::from_f64(raw)
        .map(|value| value.round_dp(MULTIPLIER_PRECISION))
        .and_then(|value| value.to_f64())
        .unwrap_or_else(|| {
            let scale = 10f64.powi(MULTIPLIER_PRECISION as i32);
            (raw * scale).round() / scale
        })
}

/// Combined store x department multiplier, rounded to two decimals.
pub fn resolve(
    stores: &Selection<String>,
    departments: &Selection<String>,
    store_weights: &BTreeMap<String, f64>,
    department_weights: &BTreeMap<String, f64>,
) -> f64 {
    let departments = canonical_departments(departments);
    let raw = dimension_weight(stores, store_weights) * dimension_weight(&departments, department_weights);
    let multiplier = round_multiplier(raw).max(MIN_MULTIPLIER);

    debug!("Resolved filter multiplier {} (raw {})", multiplier, raw);
    multiplier
}

/// Scales every point's magnitudes; dates and the future flag are untouched.
pub fn apply_multiplier(points: &mut [SeriesPoint], multiplier: f64) {
    if multiplier == 1.0 {
        return;
    }
    for point in points {
        point.scale(multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_all_all_is_exactly_one() {
        let stores = table(&[("StoreA", 3.0), ("StoreB", 0.2)]);
        let departments = table(&[("Snacks", 0.5)]);
        let multiplier = resolve(
            &Selection::from_labels(["all"]),
            &Selection::from_labels(["all"]),
            &stores,
            &departments,
        );
        assert_eq!(multiplier, 1.0);
    }

    #[test]
    fn test_single_store_weight() {
        let multiplier = resolve(
            &Selection::from_labels(["StoreA"]),
            &Selection::All,
            &table(&[("StoreA", 1.2)]),
            &table(&[("Snacks", 0.5)]),
        );
        assert_eq!(multiplier, 1.2);
    }

    #[test]
    fn test_mean_within_dimension_and_product_across() {
        let stores = table(&[("A", 1.2), ("B", 0.8)]);
        let departments = table(&[("Beverages", 1.5)]);
        let multiplier = resolve(
            &Selection::from_labels(["A", "B"]),
            &Selection::from_labels(["beverages"]),
            &stores,
            &departments,
        );
        assert_eq!(multiplier, 1.5);
    }

    #[test]
    fn test_unknown_labels_are_neutral() {
        let stores = table(&[("A", 2.0)]);
        let multiplier = resolve(
            &Selection::from_labels(["A", "Nowhere"]),
            &Selection::All,
            &stores,
            &BTreeMap::new(),
        );
        assert_eq!(multiplier, 1.5);
    }

    #[test]
    fn test_result_is_rounded_and_positive() {
        let stores = table(&[("A", 1.0 / 3.0)]);
        let departments = table(&[("Snacks", 0.001)]);
        assert_eq!(
            resolve(&Selection::from_labels(["A"]), &Selection::All, &stores, &departments),
            0.33
        );
        assert_eq!(
            resolve(&Selection::All, &Selection::from_labels(["Snacks"]), &stores, &departments),
            MIN_MULTIPLIER
        );
    }

    #[test]
    fn test_department_aliases_share_the_weight() {
        let departments = table(&[("Personal Care", 0.6)]);
        for label in ["Personal Care", "personal care", "personal_care"] {
            let multiplier = resolve(
                &Selection::All,
                &Selection::from_labels([label]),
                &BTreeMap::new(),
                &departments,
            );
            assert_eq!(multiplier, 0.6, "label {:?}", label);
        }
    }

    #[test]
    fn test_huge_product_is_rounded_not_reset() {
        let stores = table(&[("A", 1e20)]);
        let departments = table(&[("Snacks", 1e20)]);
        let multiplier = resolve(
            &Selection::from_labels(["A"]),
            &Selection::from_labels(["Snacks"]),
            &stores,
            &departments,
        );
        assert!(multiplier > 1e39);
    }

    #[test]
    fn test_apply_multiplier_keeps_dates_and_flags() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut points = vec![
            SeriesPoint {
                date: day,
                is_future: false,
                actual: Some(1000.0),
                forecast: None,
                annotation: None,
            },
            SeriesPoint {
                date: day.succ_opt().unwrap(),
                is_future: true,
                actual: None,
                forecast: Some(500.0),
                annotation: Some("Heat wave".to_string()),
            },
        ];

        apply_multiplier(&mut points, 1.2);

        assert_eq!(points[0].actual, Some(1200.0));
        assert_eq!(points[0].forecast, None);
        assert!(!points[0].is_future);
        assert_eq!(points[1].forecast, Some(600.0));
        assert_eq!(points[1].actual, None);
        assert_eq!(points[1].annotation.as_deref(), Some("Heat wave"));
    }
}
