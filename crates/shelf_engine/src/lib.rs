//! Shelf engine: fetching, product extraction, exports and the pipeline
//! that ties them together.
mod config;
mod decode;
mod export;
mod extract;
mod fetch;
mod gate;
mod grouped;
mod normalize;
mod persist;
mod pipeline;
mod selectors;
mod stores;
mod types;

pub use config::{
    deep_merge, load_config, AppConfig, ConfigError, LogFiles, LoggingConfig, OutputConfig,
    PersistenceConfig, WebScrapingConfig, DEFAULT_START_PAGE,
};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use export::{
    export_csv, export_json, export_text, read_json_export, ExportError, ExportSummary, SinkKind,
    CSV_HEADERS,
};
pub use extract::{ExtractError, ProductExtractor, DEFAULT_CATEGORY};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use gate::{Capability, FeatureGate, ToggleSet, ToggleValue};
pub use grouped::{export_grouped_yaml, export_yaml_items, item_file_name, GroupedExportOptions};
pub use normalize::{normalize_price, rating_from_classes, resolve_url};
pub use persist::{ensure_output_dir, write_file, AtomicFileWriter, PersistError};
pub use pipeline::{Pipeline, PipelineError, RunReport, SinkReport};
pub use selectors::{
    CompiledSelectors, FieldSelector, FieldSelectorConfig, AVAILABILITY_SELECTOR,
    DEFAULT_IMAGE_SELECTOR, DEFAULT_NAME_SELECTOR, DEFAULT_PRICE_SELECTOR, IMAGE_FALLBACK,
    NAME_FALLBACK, PRICE_FALLBACK, PRODUCT_CONTAINER, RATING_MARKER_CLASS, RATING_SELECTOR,
};
pub use stores::{attempt_store, StoreAttempt, StoreKind};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
