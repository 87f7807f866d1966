use anyhow::{Context, Result, anyhow};
use axum::response::Json;
use chrono::NaiveDate;
use model::{BusinessType, Metric};
use tracing::info;

use crate::config::{initialize_app_state, load_settings};
use crate::helpers::converters::series_to_dto;
use crate::helpers::filters::filter_selection;
use crate::schemas::ForecastQuery;

/// Filter arguments of the `series` command.
#[derive(Debug, Clone)]
pub struct SeriesArgs {
    pub metric: Metric,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub stores: Option<String>,
    pub departments: Option<String>,
    pub explain: bool,
}

/// Computes one series the way the HTTP API does and prints it as JSON.
pub fn print_series(
    args: SeriesArgs,
    settings_path: Option<&str>,
    business_type: BusinessType,
    today: Option<NaiveDate>,
) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let state = initialize_app_state(settings, business_type, today)?;
    let dashboard = state
        .dashboard
        .try_read()
        .context("Dashboard is unexpectedly locked")?;

    let query = ForecastQuery {
        from: args.from,
        to: args.to,
        stores: args.stores,
        departments: args.departments,
        explain: Some(args.explain),
        ..ForecastQuery::default()
    };
    let filters = filter_selection(&query, dashboard.today())
        .map_err(|(_, Json(body))| anyhow!("{}: {}", body.code, body.error))?;
    let points = dashboard.series(args.metric, &filters)?;
    let series = series_to_dto(args.metric, &filters, dashboard.filter_multiplier(&filters), points);

    info!("Printing {} series with {} points", args.metric, series.points.len());
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
