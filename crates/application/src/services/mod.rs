//! Application services

mod report_formatter;
mod response_cache;
mod unit_preferences;
mod weather_query_service;

pub use report_formatter::format_report;
pub use response_cache::{CacheKey, ResponseCache};
pub use unit_preferences::UnitPreferenceStore;
pub use weather_query_service::WeatherQueryService;
