//! Values derived from seed volumes and prices.

use agrodata_models::{Commodity, MonthlyExportRow, MonthlyPriceRow};
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MT_PER_MMT: f64 = 1_000_000.0;

/// Export value per MMT at a flat ~USD 420/t.
pub const USD_PER_MMT: f64 = 420_000_000.0;

/// Fixed BRL/USD rate used for `priceUsd`. Not a live quote.
pub const BRL_PER_USD: f64 = 6.0;

/// Divisor for partial-month scaling. Always 30, whatever the month length.
pub const PARTIAL_MONTH_DAYS: f64 = 30.0;

/// Share of export volume bound for China.
pub fn china_share(commodity: Commodity) -> f64 {
    match commodity {
        Commodity::Soybeans => 0.77,
        _ => 0.02,
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Expand twelve monthly volumes (MMT) into export rows.
///
/// When `year` is the year of `today`, the row for the current month is
/// flagged partial and its volume is scaled by `day_of_month / 30`.
pub fn monthly_export_rows(
    commodity: Commodity,
    year: i32,
    volumes: &[f64; 12],
    today: NaiveDate,
) -> Vec<MonthlyExportRow> {
    let share = china_share(commodity);
    let split = commodity.has_china_split();

    volumes
        .iter()
        .enumerate()
        .map(|(idx, &volume)| {
            let month = idx as u32 + 1;
            let is_partial = year == today.year() && month == today.month();
            let volume = if is_partial {
                volume * (f64::from(today.day()) / PARTIAL_MONTH_DAYS)
            } else {
                volume
            };

            MonthlyExportRow {
                year,
                month,
                month_name: MONTH_NAMES[idx].to_string(),
                volume_mt: volume * MT_PER_MMT,
                volume_mmt: round_to(volume, 2),
                value_usd: volume * USD_PER_MMT,
                to_china_mt: split.then(|| volume * MT_PER_MMT * share),
                to_china_pct: split.then(|| share * 100.0),
                is_partial,
            }
        })
        .collect()
}

/// Expand a location's monthly BRL prices into price rows with USD price and
/// month-over-month change. The first month has no prior and reports 0.
pub fn price_rows(year: i32, location: &str, prices: &[f64; 12]) -> Vec<MonthlyPriceRow> {
    prices
        .iter()
        .enumerate()
        .map(|(idx, &price)| {
            let previous = if idx > 0 { prices[idx - 1] } else { price };
            let change = if previous != 0.0 {
                (price - previous) / previous * 100.0
            } else {
                0.0
            };

            MonthlyPriceRow {
                year,
                month: idx as u32 + 1,
                month_name: MONTH_NAMES[idx].to_string(),
                location: location.to_string(),
                price_brl: price,
                price_usd: round_to(price / BRL_PER_USD, 2),
                mom_change_pct: round_to(change, 1),
            }
        })
        .collect()
}
