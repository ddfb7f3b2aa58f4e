pub mod analytics_service;
pub use analytics_service::{AnalyticsError, AnalyticsService, MIN_SEARCH_LEN, ResultLimits};

pub mod analytics_service_impl;
pub use analytics_service_impl::CatalogAnalyticsService;

pub mod catalog_store;
pub use catalog_store::{CatalogStore, MemoryCatalog, StoreError, TitleOrder, TitlePage};

pub mod ingest;
pub use ingest::{CsvCatalogLoader, IngestError, LoadedCatalog, seed_store};
