pub mod cache_schema;
pub mod commodity;
pub mod config;
pub mod records;
pub mod responses;

pub use cache_schema::{CacheSnapshot, CACHE_FILE_NAME};
pub use commodity::Commodity;
pub use config::{AdminConfig, AgrodataConfig, CacheConfig, ServerConfig};
pub use records::{
    BalanceSheetRow, ExportDestination, ExportPort, MonthlyExportRow, MonthlyPriceRow,
    ProductionRow, SoyComplexRow, SoyComplexTables, SurveyRow,
};
pub use responses::{
    BalanceSheetResponse, DashboardSummary, ExportsByDestinationResponse, ExportsByPortResponse,
    MonthlyExportsResponse, MonthlyPricesResponse, ProductionResponse, ServiceStatus,
    SoyComplexResponse,
};
