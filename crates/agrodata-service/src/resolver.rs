//! One lookup per data category, each served through the cache.
//!
//! Year- and location-keyed categories are cached only for years in
//! [`CACHED_YEARS`] and for locations the provider has a series for. Anything
//! else is computed per request, so client input cannot grow the cache.

use std::ops::RangeInclusive;

use agrodata_models::cache_schema::key_patterns;
use agrodata_models::responses::{
    SOURCE_COMEXSTAT, SOURCE_CONAB, SOURCE_CONAB_PRICES, SOURCE_CONAB_PRODUCTION,
    SOURCE_CONAB_SECEX, SOY_COMPLEX_NOTE, UNIT_BRL_PER_BAG, UNIT_MMT, UNIT_THOUSAND_MT,
};
use agrodata_models::{
    BalanceSheetResponse, Commodity, ExportsByDestinationResponse, ExportsByPortResponse,
    MonthlyExportsResponse, MonthlyPricesResponse, ProductionResponse, SoyComplexResponse,
    SurveyRow,
};

use crate::derive::{round_to, MT_PER_MMT};
use crate::service::{AgDataService, Resolved};

/// Years whose datasets are kept in the cache.
pub const CACHED_YEARS: RangeInclusive<i32> = 2000..=2030;

/// Keep the last `n` rows.
fn most_recent<T>(mut rows: Vec<T>, n: usize) -> Vec<T> {
    let skip = rows.len().saturating_sub(n);
    rows.drain(..skip);
    rows
}

impl AgDataService {
    /// Supply/demand balance for the `years` most recent crop years, oldest first.
    pub async fn get_balance_sheet(&self, commodity: Commodity, years: usize) -> BalanceSheetResponse {
        let key = key_patterns::balance(commodity);
        let Resolved { data, last_updated } = self
            .resolve(&key, || self.provider().balance_sheet(commodity))
            .await;

        BalanceSheetResponse {
            success: true,
            commodity,
            unit: UNIT_MMT.to_string(),
            source: SOURCE_CONAB.to_string(),
            last_updated,
            data: most_recent(data, years),
        }
    }

    /// Beans, meal and oil balance tables in thousand metric tons.
    pub async fn get_soy_complex_balance(&self) -> SoyComplexResponse {
        let key = key_patterns::soy_complex();
        let Resolved { data, last_updated } = self
            .resolve(&key, || self.provider().soy_complex())
            .await;

        SoyComplexResponse {
            success: true,
            source: SOURCE_CONAB_SECEX.to_string(),
            note: SOY_COMPLEX_NOTE.to_string(),
            unit: UNIT_THOUSAND_MT.to_string(),
            last_updated,
            tables: data,
        }
    }

    pub async fn get_monthly_exports(
        &self,
        commodity: Commodity,
        year: i32,
        include_china: bool,
    ) -> MonthlyExportsResponse {
        let key = key_patterns::monthly_exports(commodity, year);
        let fetch = || self.provider().monthly_exports(commodity, year);
        let Resolved { data, last_updated } = if CACHED_YEARS.contains(&year) {
            self.resolve(&key, fetch).await
        } else {
            self.resolve_uncached(&key, fetch).await
        };

        let ytd_total: f64 = data.iter().map(|row| row.volume_mmt).sum();
        let ytd_to_china = (include_china && commodity.has_china_split()).then(|| {
            let china_mt: f64 = data.iter().filter_map(|row| row.to_china_mt).sum();
            round_to(china_mt / MT_PER_MMT, 2)
        });

        MonthlyExportsResponse {
            success: true,
            commodity,
            ncm_code: commodity.ncm_code().to_string(),
            year,
            source: SOURCE_COMEXSTAT.to_string(),
            last_updated,
            data,
            ytd_total_mmt: round_to(ytd_total, 2),
            ytd_to_china_mmt: ytd_to_china,
        }
    }

    /// Destinations largest first, cut to `top_n`. `totalMmt` covers every
    /// destination, including the ones cut.
    pub async fn get_exports_by_destination(
        &self,
        commodity: Commodity,
        year: i32,
        top_n: usize,
    ) -> ExportsByDestinationResponse {
        let key = key_patterns::destinations(commodity, year);
        let fetch = || self.provider().export_destinations(commodity, year);
        let Resolved { mut data, last_updated } = if CACHED_YEARS.contains(&year) {
            self.resolve(&key, fetch).await
        } else {
            self.resolve_uncached(&key, fetch).await
        };

        let total: f64 = data.iter().map(|d| d.volume_mmt).sum();
        data.truncate(top_n);

        ExportsByDestinationResponse {
            success: true,
            commodity,
            year,
            source: SOURCE_COMEXSTAT.to_string(),
            last_updated,
            total_mmt: round_to(total, 1),
            data,
        }
    }

    pub async fn get_exports_by_port(&self, commodity: Commodity, year: i32) -> ExportsByPortResponse {
        let key = key_patterns::ports(commodity, year);
        let fetch = || self.provider().export_ports(commodity, year);
        let Resolved { data, last_updated } = if CACHED_YEARS.contains(&year) {
            self.resolve(&key, fetch).await
        } else {
            self.resolve_uncached(&key, fetch).await
        };

        ExportsByPortResponse {
            success: true,
            commodity,
            year,
            source: SOURCE_COMEXSTAT.to_string(),
            last_updated,
            data,
        }
    }

    /// National production for the `years` most recent crop years.
    pub async fn get_production(&self, commodity: Commodity, years: usize) -> ProductionResponse {
        let key = key_patterns::production(commodity);
        let Resolved { data, last_updated } = self
            .resolve(&key, || self.provider().production(commodity))
            .await;

        ProductionResponse {
            success: true,
            commodity,
            source: SOURCE_CONAB_PRODUCTION.to_string(),
            last_updated,
            data: most_recent(data, years),
        }
    }

    /// Monthly prices for one location, or every location with a series. An
    /// empty location means every location.
    pub async fn get_monthly_prices(
        &self,
        commodity: Commodity,
        year: i32,
        location: Option<&str>,
    ) -> MonthlyPricesResponse {
        let location = location.filter(|l| !l.is_empty());
        let known_location = location.map_or(true, |l| {
            self.provider()
                .price_locations(commodity)
                .iter()
                .any(|known| known == l)
        });

        let key = key_patterns::prices(commodity, year, location);
        let fetch = || self.provider().monthly_prices(commodity, year, location);
        let Resolved { data, last_updated } = if known_location && CACHED_YEARS.contains(&year) {
            self.resolve(&key, fetch).await
        } else {
            self.resolve_uncached(&key, fetch).await
        };

        MonthlyPricesResponse {
            success: true,
            commodity,
            unit: UNIT_BRL_PER_BAG.to_string(),
            source: SOURCE_CONAB_PRICES.to_string(),
            last_updated,
            data,
        }
    }

    pub async fn get_crop_surveys(&self, crop_year: &str) -> Resolved<Vec<SurveyRow>> {
        let key = key_patterns::survey(crop_year);
        self.resolve(&key, || self.provider().crop_surveys(crop_year))
            .await
    }
}
