use std::fmt;

use serde::{Deserialize, Serialize};

/// Commodities exposed by the API. The wire form is snake_case and doubles as
/// the cache key fragment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Soybeans,
    Corn,
    SoyMeal,
    SoyOil,
    Wheat,
}

impl Commodity {
    pub const ALL: [Commodity; 5] = [
        Commodity::Soybeans,
        Commodity::Corn,
        Commodity::SoyMeal,
        Commodity::SoyOil,
        Commodity::Wheat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Commodity::Soybeans => "soybeans",
            Commodity::Corn => "corn",
            Commodity::SoyMeal => "soy_meal",
            Commodity::SoyOil => "soy_oil",
            Commodity::Wheat => "wheat",
        }
    }

    /// Mercosur NCM heading used by the trade-statistics bureau.
    pub fn ncm_code(&self) -> &'static str {
        match self {
            Commodity::Soybeans => "1201",
            Commodity::Corn => "1005",
            Commodity::SoyMeal => "2304",
            Commodity::SoyOil => "1507",
            Commodity::Wheat => "1001",
        }
    }

    /// Whether export rows for this commodity carry a China destination split.
    pub fn has_china_split(&self) -> bool {
        matches!(self, Commodity::Soybeans | Commodity::SoyMeal)
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
