use model::Item;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Largest lift accepted by [`preview`].
pub const MAX_LIFT_PERCENT: u32 = 25;

/// What an item would do with `lift_percent` more demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioPreview {
    pub item_id: String,
    pub lift_percent: u32,
    pub baseline_units: u32,
    pub baseline_revenue: Decimal,
    pub projected_units: u32,
    pub projected_revenue: Decimal,
}

/// Projects units and revenue as `floor(x * (1 + lift / 100))`.
#[instrument(skip(item), fields(item_id = item.id()))]
pub fn preview(item: &Item, lift_percent: u32) -> Result<ScenarioPreview> {
    if lift_percent > MAX_LIFT_PERCENT {
        return Err(ComputeError::InvalidInput(format!(
            "lift_percent must be between 0 and {}, got {}",
            MAX_LIFT_PERCENT, lift_percent
        )));
    }

    let factor = Decimal::ONE + Decimal::new(i64::from(lift_percent), 2);
    let projected_units = (Decimal::from(item.forecast_units()) * factor).floor();
    let projected_units = projected_units
        .to_u32()
        .ok_or_else(|| ComputeError::InvalidInput(format!("projected units overflow for {}", item.id())))?;
    let projected_revenue = (item.forecast_revenue() * factor).floor();

    debug!(
        "Scenario +{}% for {}: {} -> {} units",
        lift_percent,
        item.id(),
        item.forecast_units(),
        projected_units
    );

    Ok(ScenarioPreview {
        item_id: item.id().to_string(),
        lift_percent,
        baseline_units: item.forecast_units(),
        baseline_revenue: item.forecast_revenue(),
        projected_units,
        projected_revenue,
    })
}
