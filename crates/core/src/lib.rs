pub mod catalog;
pub mod config;
pub mod query;
pub mod source;
pub mod stats;
pub mod testing;

pub use catalog::{
    load_catalog, parse_catalog, save_catalog, AgeRange, CatalogDocument, CatalogError,
    CatalogRecord,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SourceConfig,
};
pub use query::{
    filter, run_query, sort, Criterion, FilterCriteria, Query, QueryError, QueryResult,
    SortDirection, SortKey,
};
pub use source::{search_remote, CatalogSource, FileCatalogSource, HttpCatalogSource};
pub use stats::{aggregate, AggregateOptions, CatalogReport, ReportSection};
