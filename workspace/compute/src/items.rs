//! Session item catalog: generation, table query and promo toggling.

use model::{Department, Item, Selection};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, info, instrument, warn};

use crate::error::{ComputeError, Result};
use crate::rng::SeededSequence;

/// Words the catalog generator builds item names from.
#[derive(Debug, Clone, Copy)]
pub struct CatalogVocabulary {
    /// Name prefixes, cycled by item index.
    pub styles: &'static [&'static str],
    /// Product nouns with the department they belong to, cycled by item index.
    pub products: &'static [(&'static str, Department)],
}

/// Generates `size` items named `Item {n} - {style} {product}`.
///
/// Prices, volumes and revenue forecasts are drawn from a sequence seeded with
/// `seed`, so the same inputs always give the same catalog. Every tenth item
/// starts with an active promotion.
#[instrument(skip(vocabulary))]
pub fn generate_catalog(seed: u64, size: usize, vocabulary: &CatalogVocabulary) -> Result<Vec<Item>> {
    if vocabulary.styles.is_empty() || vocabulary.products.is_empty() {
        return Err(ComputeError::InvalidSettings(
            "catalog vocabulary needs at least one style and one product".to_string(),
        ));
    }

    let mut rng = SeededSequence::new(seed);
    let catalog: Vec<Item> = (0..size)
        .map(|index| {
            let style = vocabulary.styles[index % vocabulary.styles.len()];
            let (product, department) = vocabulary.products[index % vocabulary.products.len()];

            let price = Decimal::new(rng.gen_range(199..=2499), 2);
            let units: u32 = rng.gen_range(50..550);
            let revenue = (price * Decimal::from(units)).round_dp(2);

            Item::new(
                format!("item-{}", index),
                format!("Item {} - {} {}", index + 1, style, product),
                department,
                price,
                units,
                revenue,
            )
            .with_promo(index % 10 == 0)
        })
        .collect();

    info!("Generated catalog of {} items", catalog.len());
    Ok(catalog)
}

/// Ordering applied to the table after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemSort {
    /// Catalog order.
    #[default]
    Default,
    RevenueDesc,
    UnitsDesc,
    Name,
    PriceAsc,
}

/// One page of the item table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Matching items before pagination.
    pub total: usize,
}

/// Number of pages needed to show `total` items, `per_page` at a time.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

fn matches_filters(item: &Item, needle: &str, departments: &Selection<String>) -> bool {
    let name_matches = needle.is_empty() || item.name().to_lowercase().contains(needle);
    let department_matches = match departments {
        Selection::All => true,
        Selection::Only(labels) => labels.iter().any(|label| item.department().matches(label)),
    };
    name_matches && department_matches
}

/// Filters the catalog and returns page `page` (1-indexed) in catalog order.
pub fn query(
    catalog: &[Item],
    search_term: &str,
    departments: &Selection<String>,
    page: usize,
    per_page: usize,
) -> ItemPage {
    query_sorted(catalog, search_term, departments, ItemSort::Default, page, per_page)
}

/// Filters, sorts and paginates the catalog.
///
/// The search term is a case-insensitive substring of the item name; the
/// department selection passes everything on `All`. Pages past the end, page
/// 0 and a zero page size give an empty slice while `total` still reports
/// every match.
#[instrument(skip(catalog, departments), fields(catalog_size = catalog.len()))]
pub fn query_sorted(
    catalog: &[Item],
    search_term: &str,
    departments: &Selection<String>,
    sort: ItemSort,
    page: usize,
    per_page: usize,
) -> ItemPage {
    let needle = search_term.trim().to_lowercase();
    let mut filtered: Vec<&Item> = catalog
        .iter()
        .filter(|item| matches_filters(item, &needle, departments))
        .collect();

    match sort {
        ItemSort::Default => {}
        ItemSort::RevenueDesc => filtered.sort_by_key(|item| Reverse(item.forecast_revenue())),
        ItemSort::UnitsDesc => filtered.sort_by_key(|item| Reverse(item.forecast_units())),
        ItemSort::Name => filtered.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase())),
        ItemSort::PriceAsc => filtered.sort_by_key(|item| item.price()),
    }

    let total = filtered.len();
    let items = match page.checked_sub(1).and_then(|index| index.checked_mul(per_page)) {
        Some(start) if per_page > 0 && start < total => filtered
            .into_iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    debug!("Item query matched {} items, returning {}", total, items.len());
    ItemPage { items, total }
}

/// Flips the promo flag of `item_id` and returns its new value.
pub fn toggle_promo(catalog: &mut [Item], item_id: &str) -> Result<bool> {
    match catalog.iter_mut().find(|item| item.id() == item_id) {
        Some(item) => {
            let active = item.toggle_promo();
            info!("Promo for {} is now {}", item_id, if active { "active" } else { "inactive" });
            Ok(active)
        }
        None => {
            warn!("Promo toggle for unknown item {}", item_id);
            Err(ComputeError::NotFound(format!("item {}", item_id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &[&str] = &["Classic", "Super", "Organic", "Value", "Family"];
    const PRODUCTS: &[(&str, Department)] = &[
        ("Chips", Department::Snacks),
        ("Soda", Department::Beverages),
        ("Soap", Department::Household),
        ("Bread", Department::Grocery),
    ];

    fn vocabulary() -> CatalogVocabulary {
        CatalogVocabulary {
            styles: STYLES,
            products: PRODUCTS,
        }
    }

    fn catalog() -> Vec<Item> {
        generate_catalog(12345, 100, &vocabulary()).unwrap()
    }

    #[test]
    fn test_catalog_is_deterministic() {
        assert_eq!(catalog(), catalog());
        let other = generate_catalog(54321, 100, &vocabulary()).unwrap();
        assert_ne!(catalog(), other);
    }

    #[test]
    fn test_catalog_shape() {
        let items = catalog();
        assert_eq!(items.len(), 100);
        assert_eq!(items[0].id(), "item-0");
        assert_eq!(items[0].name(), "Item 1 - Classic Chips");
        assert_eq!(items[0].department(), Department::Snacks);
        assert!(items[0].is_promo_active());
        assert!(!items[1].is_promo_active());
        for item in &items {
            assert!(item.price() >= Decimal::new(199, 2) && item.price() <= Decimal::new(2499, 2));
            assert!((50..550).contains(&item.forecast_units()));
            assert_eq!(item.forecast_revenue(), (item.price() * Decimal::from(item.forecast_units())).round_dp(2));
        }
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        let empty = CatalogVocabulary {
            styles: &[],
            products: PRODUCTS,
        };
        assert!(generate_catalog(1, 10, &empty).is_err());
    }

    #[test]
    fn test_unfiltered_total_is_catalog_size() {
        let items = catalog();
        let page = query(&items, "", &Selection::from_labels(["all"]), 1, 8);
        assert_eq!(page.total, items.len());
        assert_eq!(page.items.len(), 8);
        assert_eq!(page.items[0].id(), "item-0");
    }

    #[test]
    fn test_search_and_pagination() {
        // Four products cycle, so "chips" hits every fourth item: 25 of 100.
        let items = catalog();
        let page = query(&items, "chips", &Selection::All, 3, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 5);
        assert!(page.items.iter().all(|item| item.name().contains("Chips")));
        assert_eq!(page_count(page.total, 10), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = catalog();
        let upper = query(&items, "ORGANIC SODA", &Selection::All, 1, 100);
        let lower = query(&items, "organic soda", &Selection::All, 1, 100);
        assert_eq!(upper, lower);
        assert!(upper.total > 0);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let items = catalog();
        let departments = Selection::from_labels(["Snacks", "Household"]);
        let page = query(&items, "value", &departments, 1, 100);
        assert!(page.total > 0);
        for item in &page.items {
            assert!(item.name().contains("Value"));
            assert!(matches!(item.department(), Department::Snacks | Department::Household));
        }
    }

    #[test]
    fn test_unknown_department_matches_nothing() {
        let items = catalog();
        let page = query(&items, "", &Selection::from_labels(["Garden"]), 1, 10);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_beyond_last_is_empty() {
        let items = catalog();
        let page = query(&items, "chips", &Selection::All, 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 25);

        let page = query(&items, "", &Selection::All, 0, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 100);

        let page = query(&items, "", &Selection::All, 1, 0);
        assert!(page.items.is_empty());
        assert_eq!(page_count(page.total, 0), 0);
    }

    #[test]
    fn test_sorting() {
        let items = catalog();
        let page = query_sorted(&items, "", &Selection::All, ItemSort::RevenueDesc, 1, 100);
        assert!(page.items.windows(2).all(|w| w[0].forecast_revenue() >= w[1].forecast_revenue()));

        let page = query_sorted(&items, "", &Selection::All, ItemSort::PriceAsc, 1, 100);
        assert!(page.items.windows(2).all(|w| w[0].price() <= w[1].price()));

        let page = query_sorted(&items, "", &Selection::All, ItemSort::UnitsDesc, 1, 100);
        assert!(page.items.windows(2).all(|w| w[0].forecast_units() >= w[1].forecast_units()));
    }

    #[test]
    fn test_toggle_promo() {
        let mut items = catalog();
        assert!(!items[1].is_promo_active());
        assert!(toggle_promo(&mut items, "item-1").unwrap());
        assert!(items[1].is_promo_active());
        assert!(!toggle_promo(&mut items, "item-1").unwrap());

        let err = toggle_promo(&mut items, "item-999").unwrap_err();
        assert_eq!(err, ComputeError::NotFound("item item-999".to_string()));
    }
}
