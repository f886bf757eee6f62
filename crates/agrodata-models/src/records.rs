//! Record types served by the API.
//!
//! Rows are immutable snapshots: the cache owns them and a refresh replaces a
//! whole dataset rather than editing rows in place. Field names on the wire
//! are camelCase, except the soy complex tables which keep the Portuguese
//! column names of the CONAB Table 14 layout.

use serde::{Deserialize, Serialize};

/// Supply/demand balance for one crop year, in million metric tons.
///
/// Supply (`opening_stock + production + imports`) matches disposition
/// (`consumption + exports + ending_stock`) within source rounding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRow {
    /// Crop year label, e.g. `2024/25`.
    pub year: String,
    pub opening_stock: f64,
    pub production: f64,
    pub imports: f64,
    #[serde(default)]
    pub total_supply: Option<f64>,
    pub consumption: f64,
    pub exports: f64,
    pub ending_stock: f64,
    #[serde(default)]
    pub is_projection: bool,
}

impl BalanceSheetRow {
    pub fn supply(&self) -> f64 {
        self.opening_stock + self.production + self.imports
    }

    pub fn disposition(&self) -> f64 {
        self.consumption + self.exports + self.ending_stock
    }
}

/// One crop year of a soy complex product, in thousand metric tons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoyComplexRow {
    #[serde(rename = "safra")]
    pub crop_year: String,
    #[serde(rename = "estoque_inicial")]
    pub opening_stock: f64,
    #[serde(rename = "producao")]
    pub production: f64,
    #[serde(rename = "importacao")]
    pub imports: f64,
    #[serde(rename = "suprimento")]
    pub total_supply: f64,
    #[serde(rename = "consumo")]
    pub consumption: f64,
    #[serde(rename = "exportacao")]
    pub exports: f64,
    #[serde(rename = "estoque_final")]
    pub ending_stock: f64,
}

/// The three soy complex tables: beans, meal and oil.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SoyComplexTables {
    #[serde(rename = "soja_graos")]
    pub beans: Vec<SoyComplexRow>,
    #[serde(rename = "farelo")]
    pub meal: Vec<SoyComplexRow>,
    #[serde(rename = "oleo")]
    pub oil: Vec<SoyComplexRow>,
}

/// Export volume for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExportRow {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    pub month_name: String,
    pub volume_mt: f64,
    pub volume_mmt: f64,
    pub value_usd: f64,
    #[serde(default)]
    pub to_china_mt: Option<f64>,
    #[serde(default)]
    pub to_china_pct: Option<f64>,
    /// Set only on the current month of the current year.
    #[serde(default)]
    pub is_partial: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDestination {
    pub country_code: String,
    pub country_name: String,
    pub volume_mt: f64,
    pub volume_mmt: f64,
    pub value_usd: f64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportPort {
    pub port_name: String,
    /// Two-letter state code, `-` for the residual bucket.
    pub state: String,
    pub volume_mmt: f64,
    pub share_pct: f64,
}

/// Planted area, output and yield for one crop year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRow {
    pub crop_year: String,
    #[serde(default)]
    pub state: Option<String>,
    pub area_mha: f64,
    pub production_mmt: f64,
    /// `production_mmt / area_mha`, as published.
    pub yield_mt_ha: f64,
    #[serde(default)]
    pub is_projection: bool,
}

/// Monthly farm-gate price at one location, per 60 kg bag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPriceRow {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub location: String,
    pub price_brl: f64,
    pub price_usd: f64,
    /// Zero on the first month of a location's series.
    pub mom_change_pct: f64,
}

/// One CONAB crop survey estimate (MMT).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRow {
    pub survey: u32,
    pub month: String,
    pub soybeans: f64,
    pub corn: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_row_uses_camel_case() {
        let row = BalanceSheetRow {
            year: "2025/26".to_string(),
            opening_stock: 10.731,
            production: 176.124,
            imports: 0.5,
            total_supply: None,
            consumption: 64.266,
            exports: 111.791,
            ending_stock: 11.298,
            is_projection: true,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["openingStock"], serde_json::json!(10.731));
        assert_eq!(json["endingStock"], serde_json::json!(11.298));
        assert_eq!(json["isProjection"], serde_json::json!(true));
        assert!(json["totalSupply"].is_null());
    }

    #[test]
    fn balance_row_projection_defaults_to_false() {
        let row: BalanceSheetRow = serde_json::from_value(serde_json::json!({
            "year": "2020/21",
            "openingStock": 2.5,
            "production": 135.9,
            "imports": 0.4,
            "consumption": 48.8,
            "exports": 86.1,
            "endingStock": 3.9
        }))
        .unwrap();
        assert!(!row.is_projection);
        assert!((row.supply() - row.disposition()).abs() < 0.01);
    }

    #[test]
    fn soy_complex_keeps_portuguese_columns() {
        let tables = SoyComplexTables {
            beans: vec![SoyComplexRow {
                crop_year: "2024/25".to_string(),
                opening_stock: 7231.3,
                production: 171480.5,
                imports: 968.6,
                total_supply: 179680.4,
                consumption: 60768.8,
                exports: 108181.1,
                ending_stock: 10730.6,
            }],
            meal: vec![],
            oil: vec![],
        };
        let json = serde_json::to_value(&tables).unwrap();
        assert_eq!(json["soja_graos"][0]["safra"], "2024/25");
        assert_eq!(json["soja_graos"][0]["suprimento"], serde_json::json!(179680.4));
        assert!(json["farelo"].as_array().unwrap().is_empty());
        assert!(json.get("oleo").is_some());
    }

    #[test]
    fn survey_row_omits_current_flag_unless_set() {
        let row = SurveyRow {
            survey: 1,
            month: "Oct 2025".to_string(),
            soybeans: 177.6,
            corn: 138.6,
            total: 354.7,
            is_current: false,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("isCurrent").is_none());
    }
}
