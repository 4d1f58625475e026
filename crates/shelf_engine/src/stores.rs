//! Placeholder database sinks. They record that persistence was requested
//! and write nothing.

use std::fmt;

use shelf_core::Catalog;
use shelf_logging::LogSink;

use crate::gate::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Relational,
    Document,
}

impl StoreKind {
    pub const ALL: [StoreKind; 2] = [StoreKind::Relational, StoreKind::Document];

    pub fn capability(self) -> Capability {
        match self {
            StoreKind::Relational => Capability::SaveToSqlite,
            StoreKind::Document => Capability::SaveToMongodb,
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Relational => f.write_str("relational store"),
            StoreKind::Document => f.write_str("document store"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAttempt {
    pub kind: StoreKind,
    pub target: String,
    pub records: usize,
}

pub fn attempt_store(
    kind: StoreKind,
    target: &str,
    catalog: &Catalog,
    log: &dyn LogSink,
) -> StoreAttempt {
    log.warn(&format!(
        "Persistence to {kind} at {target} is not implemented; {} records not stored",
        catalog.len()
    ));
    StoreAttempt {
        kind,
        target: target.to_string(),
        records: catalog.len(),
    }
}
