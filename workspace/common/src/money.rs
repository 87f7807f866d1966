//! Display formatting for card values.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rusty_money::{Money, iso};

/// Formats `amount` as US dollars, e.g. `$48,200.00`.
pub fn format_usd(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::USD).to_string()
}

/// Dollar amount with a thousands suffix, e.g. `$48.2K`. Amounts below
/// one thousand fall back to [`format_usd`].
pub fn format_compact_usd(amount: Decimal) -> String {
    match compact(amount.to_f64().unwrap_or(0.0)) {
        Some(short) => format!("${}", short),
        None => format_usd(amount.round_dp(0)),
    }
}

/// Unit count with a thousands suffix, e.g. `12.4K`.
pub fn format_compact_count(count: u64) -> String {
    compact(count as f64).unwrap_or_else(|| count.to_string())
}

/// Signed percentage with one decimal, e.g. `+8.4%` or `-1.1%`.
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

fn compact(value: f64) -> Option<String> {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        Some(format!("{:.1}M", value / 1_000_000.0))
    } else if magnitude >= 1_000.0 {
        Some(format!("{:.1}K", value / 1_000.0))
    } else {
        None
    }
}
