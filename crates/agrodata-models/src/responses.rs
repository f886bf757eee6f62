//! Response envelopes and the dashboard bundle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::commodity::Commodity;
use crate::records::*;

pub const SOURCE_CONAB: &str = "CONAB";
pub const SOURCE_CONAB_SECEX: &str = "CONAB e Secex";
pub const SOURCE_COMEXSTAT: &str = "SECEX/MDIC ComexStat";
pub const SOURCE_CONAB_PRODUCTION: &str = "CONAB SerieHistoricaGraos";
pub const SOURCE_CONAB_PRICES: &str = "CONAB PrecosMensalUF";

pub const UNIT_MMT: &str = "MMT";
pub const UNIT_THOUSAND_MT: &str = "mil t (thousand metric tons)";
pub const UNIT_BRL_PER_BAG: &str = "BRL/60kg bag";

pub const SOY_COMPLEX_NOTE: &str =
    "Estimativa em janeiro/2026. Estoque de passagem 31 de dezembro.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSheetResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub unit: String,
    pub source: String,
    pub last_updated: DateTime<Utc>,
    pub data: Vec<BalanceSheetRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoyComplexResponse {
    pub success: bool,
    pub source: String,
    pub note: String,
    pub unit: String,
    pub last_updated: DateTime<Utc>,
    #[serde(flatten)]
    pub tables: SoyComplexTables,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExportsResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub ncm_code: String,
    pub year: i32,
    pub source: String,
    #[serde(rename = "last_updated")]
    pub last_updated: DateTime<Utc>,
    pub data: Vec<MonthlyExportRow>,
    /// Sum of `volumeMmt` over the returned months, two decimals.
    pub ytd_total_mmt: f64,
    /// Present only when a China split was requested and the commodity has one.
    pub ytd_to_china_mmt: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportsByDestinationResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub year: i32,
    pub source: String,
    #[serde(rename = "last_updated")]
    pub last_updated: DateTime<Utc>,
    pub total_mmt: f64,
    pub data: Vec<ExportDestination>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportsByPortResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub year: i32,
    pub source: String,
    pub last_updated: DateTime<Utc>,
    pub data: Vec<ExportPort>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub source: String,
    pub last_updated: DateTime<Utc>,
    pub data: Vec<ProductionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPricesResponse {
    pub success: bool,
    pub commodity: Commodity,
    pub unit: String,
    pub source: String,
    pub last_updated: DateTime<Utc>,
    pub data: Vec<MonthlyPriceRow>,
}

/// Soybean and corn variants of the same dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByCommodity<T> {
    pub soybeans: T,
    pub corn: T,
}

/// The prior and current calendar years shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByYear<T> {
    #[serde(rename = "2024")]
    pub y2024: T,
    #[serde(rename = "2025")]
    pub y2025: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationsByCommodity {
    pub soybeans: Vec<ExportDestination>,
}

/// Successive crop survey estimates, keyed by crop year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyData {
    #[serde(rename = "2025/26")]
    pub season_2025_26: Vec<SurveyRow>,
}

/// Everything the dashboard needs on first page load, in one response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub success: bool,
    pub last_updated: DateTime<Utc>,
    pub data_sources: Vec<String>,
    pub production: ByCommodity<Vec<ProductionRow>>,
    pub balance_sheets: ByCommodity<Vec<BalanceSheetRow>>,
    pub monthly_exports: ByCommodity<ByYear<Vec<MonthlyExportRow>>>,
    pub monthly_prices: ByCommodity<ByYear<Vec<MonthlyPriceRow>>>,
    pub export_destinations: DestinationsByCommodity,
    pub export_ports: Vec<ExportPort>,
    pub soy_complex: SoyComplexTables,
    pub survey_data: SurveyData,
}

/// Cache health as reported by the admin status route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceStatus {
    pub initialized: bool,
    pub cache_keys: Vec<String>,
    pub last_updated: BTreeMap<String, DateTime<Utc>>,
}
