use std::sync::Arc;

use agrodata_models::{
    BalanceSheetRow, Commodity, ExportDestination, ExportPort, MonthlyExportRow, MonthlyPriceRow,
    ProductionRow, SoyComplexTables, SurveyRow,
};
use async_trait::async_trait;

use crate::clock::Clock;
use crate::derive::{monthly_export_rows, price_rows};
use crate::error::ProviderError;
use crate::seed;

/// Where uncached datasets come from. Mockable for testing.
///
/// Implementations return complete, un-sliced datasets; the service caches
/// them and applies per-request slicing.
#[async_trait]
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn balance_sheet(&self, commodity: Commodity)
        -> Result<Vec<BalanceSheetRow>, ProviderError>;

    async fn soy_complex(&self) -> Result<SoyComplexTables, ProviderError>;

    async fn monthly_exports(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<MonthlyExportRow>, ProviderError>;

    async fn export_destinations(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<ExportDestination>, ProviderError>;

    async fn export_ports(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<ExportPort>, ProviderError>;

    async fn production(&self, commodity: Commodity) -> Result<Vec<ProductionRow>, ProviderError>;

    async fn monthly_prices(
        &self,
        commodity: Commodity,
        year: i32,
        location: Option<&str>,
    ) -> Result<Vec<MonthlyPriceRow>, ProviderError>;

    async fn crop_surveys(&self, crop_year: &str) -> Result<Vec<SurveyRow>, ProviderError>;

    /// Locations with a published price series for `commodity`. Requests for
    /// any other location are synthesized and not worth caching.
    fn price_locations(&self, commodity: Commodity) -> Vec<String>;
}

/// Serves the embedded seed tables. Makes no network calls.
///
/// Needs a clock only to decide which export month is still in progress.
pub struct StaticProvider {
    clock: Arc<dyn Clock>,
}

impl StaticProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn balance_sheet(
        &self,
        commodity: Commodity,
    ) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        Ok(seed::balance_sheet(commodity))
    }

    async fn soy_complex(&self) -> Result<SoyComplexTables, ProviderError> {
        Ok(seed::soy_complex())
    }

    async fn monthly_exports(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<MonthlyExportRow>, ProviderError> {
        let volumes = seed::monthly_export_pattern(commodity, year)
            .unwrap_or([seed::FLAT_MONTHLY_EXPORT_MMT; 12]);
        let today = self.clock.now().date_naive();
        Ok(monthly_export_rows(commodity, year, &volumes, today))
    }

    async fn export_destinations(
        &self,
        _commodity: Commodity,
        _year: i32,
    ) -> Result<Vec<ExportDestination>, ProviderError> {
        Ok(seed::export_destinations())
    }

    async fn export_ports(
        &self,
        _commodity: Commodity,
        _year: i32,
    ) -> Result<Vec<ExportPort>, ProviderError> {
        Ok(seed::export_ports())
    }

    async fn production(&self, commodity: Commodity) -> Result<Vec<ProductionRow>, ProviderError> {
        Ok(seed::production(commodity))
    }

    async fn monthly_prices(
        &self,
        commodity: Commodity,
        year: i32,
        location: Option<&str>,
    ) -> Result<Vec<MonthlyPriceRow>, ProviderError> {
        let series = seed::price_series(commodity);
        let rows = match location {
            Some(location) => {
                let prices = series
                    .iter()
                    .find(|(loc, _)| *loc == location)
                    .map(|(_, prices)| *prices)
                    .unwrap_or([seed::FLAT_PRICE_BRL; 12]);
                price_rows(year, location, &prices)
            }
            None => series
                .iter()
                .flat_map(|(location, prices)| price_rows(year, location, prices))
                .collect(),
        };
        Ok(rows)
    }

    async fn crop_surveys(&self, crop_year: &str) -> Result<Vec<SurveyRow>, ProviderError> {
        Ok(seed::crop_surveys(crop_year))
    }

    fn price_locations(&self, commodity: Commodity) -> Vec<String> {
        seed::price_series(commodity)
            .into_iter()
            .map(|(location, _)| location.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;

    fn provider(y: i32, m: u32, d: u32) -> StaticProvider {
        StaticProvider::new(Arc::new(FixedClock::at(y, m, d)))
    }

    #[tokio::test]
    async fn exports_without_pattern_are_flat() {
        let rows = provider(2026, 10, 18)
            .monthly_exports(Commodity::Wheat, 2024)
            .await
            .unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.volume_mmt == 5.0));
    }

    #[tokio::test]
    async fn exports_in_current_year_scale_current_month() {
        let rows = provider(2025, 4, 10)
            .monthly_exports(Commodity::Soybeans, 2025)
            .await
            .unwrap();
        let partial: Vec<_> = rows.iter().filter(|r| r.is_partial).collect();
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].month, 4);
        assert_eq!(partial[0].volume_mmt, 5.0);
    }

    #[tokio::test]
    async fn prices_for_all_locations() {
        let rows = provider(2026, 1, 1)
            .monthly_prices(Commodity::Soybeans, 2025, None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 36);
        assert_eq!(rows[0].location, "MT");
        assert_eq!(rows[12].location, "PR");
        assert_eq!(rows[24].location, "Paranaguá");
        // Each location's series starts fresh.
        assert_eq!(rows[12].mom_change_pct, 0.0);
    }

    #[tokio::test]
    async fn prices_for_unknown_location_are_flat() {
        let rows = provider(2026, 1, 1)
            .monthly_prices(Commodity::Corn, 2025, Some("GO"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.price_brl == 100.0 && r.location == "GO"));
    }

    #[test]
    fn price_locations_follow_seed_series() {
        let p = provider(2026, 1, 1);
        assert_eq!(p.price_locations(Commodity::Corn), vec!["MT", "PR"]);
        assert!(p.price_locations(Commodity::SoyOil).is_empty());
    }

    #[tokio::test]
    async fn prices_without_table_are_empty() {
        let rows = provider(2026, 1, 1)
            .monthly_prices(Commodity::SoyOil, 2025, None)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
