//! Shelf core: product records, the catalog container and the pure
//! pipeline state machine.
mod catalog;
mod msg;
mod record;
mod state;
mod update;

pub use catalog::{Catalog, CatalogInfo};
pub use msg::Msg;
pub use record::{ProductRecord, Rating, UnknownRating, UNCATEGORIZED, UNKNOWN_NAME};
pub use state::{Phase, PipelineState};
pub use update::update;
