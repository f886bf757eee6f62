use agrodata_models::responses::{
    ByCommodity, ByYear, DestinationsByCommodity, SurveyData, SOURCE_COMEXSTAT, SOURCE_CONAB,
};
use agrodata_models::{Commodity, DashboardSummary};
use tracing::info;

use crate::seed::SURVEY_CROP_YEAR;
use crate::service::AgDataService;

const DASHBOARD_BALANCE_YEARS: usize = 6;
const DASHBOARD_PRODUCTION_YEARS: usize = 11;
const DASHBOARD_TOP_DESTINATIONS: usize = 10;
const PREVIOUS_YEAR: i32 = 2024;
const CURRENT_YEAR: i32 = 2025;

impl AgDataService {
    /// Everything the front page needs in one bundle.
    pub async fn get_dashboard_summary(&self) -> DashboardSummary {
        use Commodity::{Corn, Soybeans};

        let soy_balance = self.get_balance_sheet(Soybeans, DASHBOARD_BALANCE_YEARS).await;
        let corn_balance = self.get_balance_sheet(Corn, DASHBOARD_BALANCE_YEARS).await;

        let soy_exports_prev = self.get_monthly_exports(Soybeans, PREVIOUS_YEAR, true).await;
        let soy_exports_curr = self.get_monthly_exports(Soybeans, CURRENT_YEAR, true).await;
        let corn_exports_prev = self.get_monthly_exports(Corn, PREVIOUS_YEAR, true).await;
        let corn_exports_curr = self.get_monthly_exports(Corn, CURRENT_YEAR, true).await;

        let soy_production = self.get_production(Soybeans, DASHBOARD_PRODUCTION_YEARS).await;
        let corn_production = self.get_production(Corn, DASHBOARD_PRODUCTION_YEARS).await;

        let soy_prices_prev = self.get_monthly_prices(Soybeans, PREVIOUS_YEAR, None).await;
        let soy_prices_curr = self.get_monthly_prices(Soybeans, CURRENT_YEAR, None).await;
        let corn_prices_prev = self.get_monthly_prices(Corn, PREVIOUS_YEAR, None).await;
        let corn_prices_curr = self.get_monthly_prices(Corn, CURRENT_YEAR, None).await;

        let destinations = self
            .get_exports_by_destination(Soybeans, CURRENT_YEAR, DASHBOARD_TOP_DESTINATIONS)
            .await;
        let ports = self.get_exports_by_port(Soybeans, CURRENT_YEAR).await;
        let soy_complex = self.get_soy_complex_balance().await;
        let surveys = self.get_crop_surveys(SURVEY_CROP_YEAR).await;

        DashboardSummary {
            success: true,
            last_updated: self.now(),
            data_sources: vec![SOURCE_CONAB.to_string(), SOURCE_COMEXSTAT.to_string()],
            production: ByCommodity {
                soybeans: soy_production.data,
                corn: corn_production.data,
            },
            balance_sheets: ByCommodity {
                soybeans: soy_balance.data,
                corn: corn_balance.data,
            },
            monthly_exports: ByCommodity {
                soybeans: ByYear {
                    y2024: soy_exports_prev.data,
                    y2025: soy_exports_curr.data,
                },
                corn: ByYear {
                    y2024: corn_exports_prev.data,
                    y2025: corn_exports_curr.data,
                },
            },
            monthly_prices: ByCommodity {
                soybeans: ByYear {
                    y2024: soy_prices_prev.data,
                    y2025: soy_prices_curr.data,
                },
                corn: ByYear {
                    y2024: corn_prices_prev.data,
                    y2025: corn_prices_curr.data,
                },
            },
            export_destinations: DestinationsByCommodity {
                soybeans: destinations.data,
            },
            export_ports: ports.data,
            soy_complex: soy_complex.tables,
            survey_data: SurveyData {
                season_2025_26: surveys.data,
            },
        }
    }

    /// Drop every cache entry, repopulate the dashboard subset and persist.
    ///
    /// Readers running alongside may briefly see a key missing and compute it
    /// themselves; whichever write lands first is kept. Returns the number of
    /// entries after repopulating.
    pub async fn refresh_all(&self) -> usize {
        let cleared = self.store().clear();
        info!(cleared, "Cleared cache for refresh");

        self.get_dashboard_summary().await;
        self.save_snapshot();

        let entries = self.store().entry_count();
        info!(entries, "Refresh complete");
        entries
    }
}
