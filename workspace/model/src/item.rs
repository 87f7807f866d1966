use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::department::Department;

/// A catalog item shown in the top items table.
///
/// The only mutable part of an item is its promo flag, flipped through
/// [`Item::toggle_promo`]. The id never changes once the item is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    name: String,
    department: Department,
    forecast_revenue: Decimal,
    forecast_units: u32,
    price: Decimal,
    is_promo_active: bool,
}

impl Item {
    /// Creates a new item without an active promotion.
    ///
    /// Negative prices are clamped to zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: Department,
        price: Decimal,
        forecast_units: u32,
        forecast_revenue: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department,
            forecast_revenue: forecast_revenue.max(Decimal::ZERO),
            forecast_units,
            price: price.max(Decimal::ZERO),
            is_promo_active: false,
        }
    }

    /// Same item with the promo flag set to `active`.
    pub fn with_promo(mut self, active: bool) -> Self {
        self.is_promo_active = active;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn forecast_revenue(&self) -> Decimal {
        self.forecast_revenue
    }

    pub fn forecast_units(&self) -> u32 {
        self.forecast_units
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn is_promo_active(&self) -> bool {
        self.is_promo_active
    }

    /// Flips the promo flag and returns the new value.
    pub fn toggle_promo(&mut self) -> bool {
        self.is_promo_active = !self.is_promo_active;
        self.is_promo_active
    }
}
