//! Seed datasets served while no live upstream integration exists.
//!
//! Balance sheets and the soy complex follow CONAB Table 14 (January 2026
//! estimate). Production follows the CONAB historical grain series. Export
//! patterns, destinations, ports and prices are representative seasonal
//! shapes, not published figures.

use agrodata_models::{
    BalanceSheetRow, Commodity, ExportDestination, ExportPort, ProductionRow, SoyComplexRow,
    SoyComplexTables, SurveyRow,
};

/// (crop year, opening, production, imports, consumption, exports, ending, projection)
type BalanceSeed = (&'static str, f64, f64, f64, f64, f64, f64, bool);

const SOYBEAN_BALANCE: &[BalanceSeed] = &[
    ("2020/21", 2.5, 135.9, 0.4, 48.8, 86.1, 3.9, false),
    ("2021/22", 3.9, 125.5, 0.3, 51.4, 78.7, -0.4, false),
    ("2022/23", -0.4, 154.6, 0.2, 53.9, 98.0, 2.5, false),
    ("2023/24", 2.5, 147.4, 0.3, 55.8, 92.4, 2.0, false),
    ("2024/25", 7.231, 171.481, 0.969, 60.769, 108.181, 10.731, false),
    ("2025/26", 10.731, 176.124, 0.500, 64.266, 111.791, 11.298, true),
];

const CORN_BALANCE: &[BalanceSeed] = &[
    ("2020/21", 11.2, 87.1, 3.1, 71.5, 20.8, 9.1, false),
    ("2021/22", 9.1, 113.1, 1.8, 77.0, 44.7, 2.3, false),
    ("2022/23", 2.3, 131.9, 1.6, 83.0, 52.0, 0.8, false),
    ("2023/24", 0.8, 115.7, 1.5, 86.5, 32.5, -1.0, false),
    ("2024/25", -1.0, 139.7, 1.2, 90.5, 40.0, 9.4, false),
    ("2025/26", 9.4, 138.8, 1.0, 94.5, 46.5, 8.2, true),
];

const SOY_MEAL_BALANCE: &[BalanceSeed] = &[
    ("2024/25", 3.367, 44.044, 0.0, 19.500, 23.300, 4.611, false),
    ("2025/26", 4.611, 46.620, 0.001, 20.300, 24.696, 6.236, true),
];

const SOY_OIL_BALANCE: &[BalanceSeed] = &[
    ("2024/25", 0.465, 11.426, 0.105, 10.318, 1.363, 0.316, false),
    ("2025/26", 0.316, 12.155, 0.100, 10.811, 1.400, 0.360, true),
];

const WHEAT_BALANCE: &[BalanceSeed] = &[
    ("2023/24", 0.8, 8.1, 5.5, 12.5, 0.3, 1.6, false),
    ("2024/25", 1.6, 7.9, 5.8, 12.8, 0.2, 2.3, false),
    ("2025/26", 2.3, 8.5, 5.5, 13.0, 0.3, 3.0, true),
];

/// Balance sheet rows in ascending crop-year order.
pub fn balance_sheet(commodity: Commodity) -> Vec<BalanceSheetRow> {
    let seed = match commodity {
        Commodity::Soybeans => SOYBEAN_BALANCE,
        Commodity::Corn => CORN_BALANCE,
        Commodity::SoyMeal => SOY_MEAL_BALANCE,
        Commodity::SoyOil => SOY_OIL_BALANCE,
        Commodity::Wheat => WHEAT_BALANCE,
    };
    seed.iter()
        .map(
            |&(year, opening, production, imports, consumption, exports, ending, projection)| {
                BalanceSheetRow {
                    year: year.to_string(),
                    opening_stock: opening,
                    production,
                    imports,
                    total_supply: None,
                    consumption,
                    exports,
                    ending_stock: ending,
                    is_projection: projection,
                }
            },
        )
        .collect()
}

/// (safra, estoque inicial, producao, importacao, suprimento, consumo, exportacao, estoque final)
type SoyComplexSeed = (&'static str, f64, f64, f64, f64, f64, f64, f64);

const SOY_BEANS_1000T: &[SoyComplexSeed] = &[
    ("2024/25", 7231.3, 171480.5, 968.6, 179680.4, 60768.8, 108181.1, 10730.6),
    ("2025/26", 10730.6, 176124.4, 500.0, 187355.0, 64265.9, 111790.8, 11298.2),
];

const SOY_MEAL_1000T: &[SoyComplexSeed] = &[
    ("2024/25", 3367.3, 44043.9, 0.1, 47411.3, 19500.0, 23300.4, 4610.9),
    ("2025/26", 4610.9, 46620.3, 1.0, 51232.3, 20300.0, 24696.0, 6236.3),
];

const SOY_OIL_1000T: &[SoyComplexSeed] = &[
    ("2024/25", 465.2, 11426.0, 105.2, 11996.5, 10318.0, 1362.9, 315.6),
    ("2025/26", 315.6, 12155.3, 100.0, 12570.9, 10811.0, 1400.0, 359.9),
];

fn soy_complex_rows(seed: &[SoyComplexSeed]) -> Vec<SoyComplexRow> {
    seed.iter()
        .map(
            |&(crop_year, opening, production, imports, supply, consumption, exports, ending)| {
                SoyComplexRow {
                    crop_year: crop_year.to_string(),
                    opening_stock: opening,
                    production,
                    imports,
                    total_supply: supply,
                    consumption,
                    exports,
                    ending_stock: ending,
                }
            },
        )
        .collect()
}

pub fn soy_complex() -> SoyComplexTables {
    SoyComplexTables {
        beans: soy_complex_rows(SOY_BEANS_1000T),
        meal: soy_complex_rows(SOY_MEAL_1000T),
        oil: soy_complex_rows(SOY_OIL_1000T),
    }
}

/// Monthly volume used for any commodity/year without a seasonal pattern (MMT).
pub const FLAT_MONTHLY_EXPORT_MMT: f64 = 5.0;

/// Seasonal monthly export volumes in MMT, January first. Soybeans peak
/// March-June, corn August-November.
pub fn monthly_export_pattern(commodity: Commodity, year: i32) -> Option<[f64; 12]> {
    let pattern = match (commodity, year) {
        (Commodity::Soybeans, 2024) => [1.8, 5.2, 12.8, 14.2, 14.8, 13.2, 10.8, 9.2, 7.8, 5.2, 3.6, 2.0],
        (Commodity::Soybeans, 2025) => [2.1, 6.0, 13.5, 15.0, 15.5, 13.8, 11.2, 9.6, 8.2, 5.8, 4.0, 2.2],
        (Commodity::Corn, 2024) => [3.8, 3.2, 1.8, 1.0, 0.6, 0.8, 3.5, 7.5, 8.5, 7.0, 5.5, 4.0],
        (Commodity::Corn, 2025) => [4.0, 3.5, 2.0, 1.2, 0.8, 1.0, 4.0, 8.0, 9.0, 7.5, 6.0, 4.5],
        (Commodity::SoyMeal, 2024) => [1.8, 1.9, 2.0, 2.1, 2.0, 1.9, 1.8, 1.9, 2.0, 2.1, 2.0, 1.8],
        (Commodity::SoyMeal, 2025) => [1.9, 2.0, 2.1, 2.2, 2.1, 2.0, 1.9, 2.0, 2.1, 2.2, 2.1, 1.9],
        (Commodity::SoyOil, 2024) => [0.10, 0.11, 0.12, 0.13, 0.12, 0.11, 0.10, 0.11, 0.12, 0.13, 0.12, 0.10],
        (Commodity::SoyOil, 2025) => [0.11, 0.12, 0.13, 0.14, 0.13, 0.12, 0.11, 0.12, 0.13, 0.14, 0.13, 0.11],
        _ => return None,
    };
    Some(pattern)
}

/// (country code, country name, share %, volume MMT)
const DESTINATIONS: &[(&str, &str, f64, f64)] = &[
    ("160", "China", 76.5, 82.5),
    ("270", "Spain", 3.8, 4.1),
    ("764", "Thailand", 2.9, 3.1),
    ("573", "Netherlands", 2.0, 2.2),
    ("792", "Turkey", 1.9, 2.0),
    ("399", "Japan", 1.5, 1.6),
    ("364", "Iran", 1.4, 1.5),
    ("220", "Egypt", 1.1, 1.2),
    ("586", "Pakistan", 1.0, 1.1),
    ("000", "Others", 7.9, 8.5),
];

/// Destination distribution, largest first. The same distribution is used for
/// every commodity and year.
pub fn export_destinations() -> Vec<ExportDestination> {
    DESTINATIONS
        .iter()
        .map(|&(code, name, share_pct, volume_mmt)| ExportDestination {
            country_code: code.to_string(),
            country_name: name.to_string(),
            volume_mt: volume_mmt * crate::derive::MT_PER_MMT,
            volume_mmt,
            value_usd: volume_mmt * crate::derive::USD_PER_MMT,
            share_pct,
        })
        .collect()
}

/// (port, state, volume MMT, share %)
const PORTS: &[(&str, &str, f64, f64)] = &[
    ("Santos", "SP", 34.5, 32.0),
    ("Paranaguá", "PR", 19.4, 18.0),
    ("Rio Grande", "RS", 15.1, 14.0),
    ("São Luís", "MA", 12.9, 12.0),
    ("Barcarena", "PA", 9.7, 9.0),
    ("São Francisco do Sul", "SC", 7.5, 7.0),
    ("Others", "-", 8.6, 8.0),
];

pub fn export_ports() -> Vec<ExportPort> {
    PORTS
        .iter()
        .map(|&(port, state, volume_mmt, share_pct)| ExportPort {
            port_name: port.to_string(),
            state: state.to_string(),
            volume_mmt,
            share_pct,
        })
        .collect()
}

/// (crop year, area Mha, production MMT, yield t/ha, projection)
type ProductionSeed = (&'static str, f64, f64, f64, bool);

const SOYBEAN_PRODUCTION: &[ProductionSeed] = &[
    ("2015/16", 33.3, 95.4, 2.87, false),
    ("2016/17", 33.9, 114.1, 3.36, false),
    ("2017/18", 35.1, 119.3, 3.40, false),
    ("2018/19", 35.9, 115.0, 3.21, false),
    ("2019/20", 36.9, 124.8, 3.38, false),
    ("2020/21", 38.5, 135.9, 3.53, false),
    ("2021/22", 41.0, 125.5, 3.06, false),
    ("2022/23", 43.2, 154.6, 3.58, false),
    ("2023/24", 45.1, 147.4, 3.27, false),
    ("2024/25", 47.4, 171.5, 3.62, false),
    ("2025/26", 48.9, 176.1, 3.60, true),
];

const CORN_PRODUCTION: &[ProductionSeed] = &[
    ("2015/16", 15.9, 64.1, 4.03, false),
    ("2016/17", 17.6, 97.8, 5.56, false),
    ("2017/18", 16.6, 80.7, 4.86, false),
    ("2018/19", 17.5, 100.0, 5.71, false),
    ("2019/20", 18.5, 102.5, 5.54, false),
    ("2020/21", 19.8, 87.1, 4.40, false),
    ("2021/22", 21.4, 113.1, 5.29, false),
    ("2022/23", 22.0, 131.9, 5.99, false),
    ("2023/24", 20.7, 115.7, 5.59, false),
    ("2024/25", 22.2, 139.7, 6.29, false),
    ("2025/26", 22.7, 138.8, 6.12, true),
];

/// National production series in ascending crop-year order. Empty for
/// commodities without a series.
pub fn production(commodity: Commodity) -> Vec<ProductionRow> {
    let seed: &[ProductionSeed] = match commodity {
        Commodity::Soybeans => SOYBEAN_PRODUCTION,
        Commodity::Corn => CORN_PRODUCTION,
        _ => &[],
    };
    seed.iter()
        .map(|&(crop_year, area, output, yield_mt_ha, projection)| ProductionRow {
            crop_year: crop_year.to_string(),
            state: None,
            area_mha: area,
            production_mmt: output,
            yield_mt_ha,
            is_projection: projection,
        })
        .collect()
}

/// Price used every month for a location without a series (BRL/60kg).
pub const FLAT_PRICE_BRL: f64 = 100.0;

/// Monthly BRL/60kg price series per location, January first.
pub fn price_series(commodity: Commodity) -> Vec<(&'static str, [f64; 12])> {
    match commodity {
        Commodity::Soybeans => vec![
            ("MT", [130.0, 126.0, 119.0, 115.0, 113.0, 111.0, 108.0, 113.0, 119.0, 125.0, 131.0, 133.0]),
            ("PR", [140.0, 136.0, 129.0, 125.0, 123.0, 121.0, 118.0, 123.0, 129.0, 135.0, 141.0, 143.0]),
            ("Paranaguá", [150.0, 146.0, 139.0, 135.0, 133.0, 131.0, 128.0, 133.0, 139.0, 145.0, 151.0, 153.0]),
        ],
        Commodity::Corn => vec![
            ("MT", [58.0, 56.0, 50.0, 49.0, 46.0, 45.0, 43.0, 46.0, 48.0, 53.0, 57.0, 59.0]),
            ("PR", [68.0, 65.0, 59.0, 58.0, 55.0, 54.0, 52.0, 55.0, 57.0, 62.0, 66.0, 68.0]),
        ],
        Commodity::Wheat => vec![
            ("PR", [88.0, 85.0, 82.0, 80.0, 78.0, 77.0, 79.0, 82.0, 85.0, 88.0, 91.0, 93.0]),
        ],
        Commodity::SoyMeal | Commodity::SoyOil => vec![],
    }
}

/// Crop year covered by the survey series.
pub const SURVEY_CROP_YEAR: &str = "2025/26";

/// Successive CONAB survey estimates for a crop year, oldest first.
pub fn crop_surveys(crop_year: &str) -> Vec<SurveyRow> {
    if crop_year != SURVEY_CROP_YEAR {
        return vec![];
    }
    let seed = [
        (1, "Oct 2025", 177.6, 138.6, 354.7),
        (2, "Nov 2025", 177.6, 138.8, 355.1),
        (3, "Dec 2025", 177.1, 138.8, 354.5),
        (4, "Jan 2026", 176.1, 138.8, 354.0),
    ];
    let latest = seed.len();
    seed.into_iter()
        .map(|(survey, month, soybeans, corn, total)| SurveyRow {
            survey,
            month: month.to_string(),
            soybeans,
            corn,
            total,
            is_current: survey as usize == latest,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_sheets_balance() {
        for commodity in Commodity::ALL {
            for row in balance_sheet(commodity) {
                assert!(
                    (row.supply() - row.disposition()).abs() < 0.01,
                    "{commodity} {} does not balance",
                    row.year
                );
            }
        }
    }

    #[test]
    fn only_latest_crop_year_is_projected() {
        for commodity in Commodity::ALL {
            let rows = balance_sheet(commodity);
            let last = rows.last().unwrap();
            assert!(last.is_projection, "{commodity}");
            assert!(rows[..rows.len() - 1].iter().all(|r| !r.is_projection));
        }
    }

    #[test]
    fn soy_complex_supply_column_adds_up() {
        let tables = soy_complex();
        for row in tables.beans.iter().chain(&tables.meal).chain(&tables.oil) {
            let supply = row.opening_stock + row.production + row.imports;
            assert!((supply - row.total_supply).abs() < 0.2, "{}", row.crop_year);
        }
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let destinations: f64 = export_destinations().iter().map(|d| d.share_pct).sum();
        let ports: f64 = export_ports().iter().map(|p| p.share_pct).sum();
        assert!((destinations - 100.0).abs() < 0.5);
        assert!((ports - 100.0).abs() < 0.5);
    }

    #[test]
    fn yield_is_production_over_area() {
        for row in production(Commodity::Soybeans)
            .into_iter()
            .chain(production(Commodity::Corn))
        {
            let derived = row.production_mmt / row.area_mha;
            assert!((derived - row.yield_mt_ha).abs() < 0.02, "{}", row.crop_year);
        }
    }

    #[test]
    fn no_production_series_for_soy_products() {
        assert!(production(Commodity::SoyMeal).is_empty());
        assert!(production(Commodity::Wheat).is_empty());
    }

    #[test]
    fn export_patterns_cover_two_years_for_soy_and_corn() {
        assert!(monthly_export_pattern(Commodity::Soybeans, 2024).is_some());
        assert!(monthly_export_pattern(Commodity::Corn, 2025).is_some());
        assert!(monthly_export_pattern(Commodity::Wheat, 2025).is_none());
        assert!(monthly_export_pattern(Commodity::Soybeans, 2023).is_none());
    }

    #[test]
    fn latest_survey_is_current() {
        let surveys = crop_surveys(SURVEY_CROP_YEAR);
        assert_eq!(surveys.len(), 4);
        assert!(surveys[3].is_current);
        assert!(surveys[..3].iter().all(|s| !s.is_current));
        assert!(crop_surveys("2019/20").is_empty());
    }
}
