//! Test doubles for the clock and provider seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use agrodata_models::{
    BalanceSheetRow, Commodity, ExportDestination, ExportPort, MonthlyExportRow, MonthlyPriceRow,
    ProductionRow, SoyComplexTables, SurveyRow,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::clock::Clock;
use crate::error::ProviderError;
use crate::provider::{DataProvider, StaticProvider};

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Noon UTC on the given date; the epoch if the date does not exist.
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_default();
        Self::new(now)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serves the seed tables, counts calls, and yields once per call so that
/// concurrent requests interleave between cache check and write.
pub struct CountingProvider {
    inner: StaticProvider,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: StaticProvider::new(clock),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

#[async_trait]
impl DataProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn balance_sheet(
        &self,
        commodity: Commodity,
    ) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        self.tick().await;
        self.inner.balance_sheet(commodity).await
    }

    async fn soy_complex(&self) -> Result<SoyComplexTables, ProviderError> {
        self.tick().await;
        self.inner.soy_complex().await
    }

    async fn monthly_exports(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<MonthlyExportRow>, ProviderError> {
        self.tick().await;
        self.inner.monthly_exports(commodity, year).await
    }

    async fn export_destinations(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<ExportDestination>, ProviderError> {
        self.tick().await;
        self.inner.export_destinations(commodity, year).await
    }

    async fn export_ports(
        &self,
        commodity: Commodity,
        year: i32,
    ) -> Result<Vec<ExportPort>, ProviderError> {
        self.tick().await;
        self.inner.export_ports(commodity, year).await
    }

    async fn production(&self, commodity: Commodity) -> Result<Vec<ProductionRow>, ProviderError> {
        self.tick().await;
        self.inner.production(commodity).await
    }

    async fn monthly_prices(
        &self,
        commodity: Commodity,
        year: i32,
        location: Option<&str>,
    ) -> Result<Vec<MonthlyPriceRow>, ProviderError> {
        self.tick().await;
        self.inner.monthly_prices(commodity, year, location).await
    }

    async fn crop_surveys(&self, crop_year: &str) -> Result<Vec<SurveyRow>, ProviderError> {
        self.tick().await;
        self.inner.crop_surveys(crop_year).await
    }

    fn price_locations(&self, commodity: Commodity) -> Vec<String> {
        self.inner.price_locations(commodity)
    }
}

/// Every call fails as an unreachable upstream would.
pub struct FailingProvider;

fn unavailable<T>() -> Result<T, ProviderError> {
    Err(ProviderError::Unavailable("upstream unreachable".to_string()))
}

#[async_trait]
impl DataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn balance_sheet(&self, _: Commodity) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        unavailable()
    }

    async fn soy_complex(&self) -> Result<SoyComplexTables, ProviderError> {
        unavailable()
    }

    async fn monthly_exports(
        &self,
        _: Commodity,
        _: i32,
    ) -> Result<Vec<MonthlyExportRow>, ProviderError> {
        unavailable()
    }

    async fn export_destinations(
        &self,
        _: Commodity,
        _: i32,
    ) -> Result<Vec<ExportDestination>, ProviderError> {
        unavailable()
    }

    async fn export_ports(&self, _: Commodity, _: i32) -> Result<Vec<ExportPort>, ProviderError> {
        unavailable()
    }

    async fn production(&self, _: Commodity) -> Result<Vec<ProductionRow>, ProviderError> {
        unavailable()
    }

    async fn monthly_prices(
        &self,
        _: Commodity,
        _: i32,
        _: Option<&str>,
    ) -> Result<Vec<MonthlyPriceRow>, ProviderError> {
        unavailable()
    }

    async fn crop_surveys(&self, _: &str) -> Result<Vec<SurveyRow>, ProviderError> {
        unavailable()
    }

    fn price_locations(&self, _: Commodity) -> Vec<String> {
        vec![]
    }
}
