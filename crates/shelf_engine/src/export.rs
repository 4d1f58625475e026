use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use shelf_core::{Catalog, ProductRecord};
use shelf_logging::LogSink;

use crate::gate::Capability;
use crate::grouped::{export_grouped_yaml, export_yaml_items, GroupedExportOptions};
use crate::persist::{write_file, PersistError};

/// Column order of the tabular export.
pub const CSV_HEADERS: [&str; 8] = [
    "name",
    "price",
    "availability",
    "rating",
    "url",
    "description",
    "media_path",
    "category",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One export destination format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Csv,
    Json,
    GroupedYaml,
    YamlItems,
    Text,
}

impl SinkKind {
    pub const ALL: [SinkKind; 5] = [
        SinkKind::Csv,
        SinkKind::Json,
        SinkKind::GroupedYaml,
        SinkKind::YamlItems,
        SinkKind::Text,
    ];

    /// Toggle that switches this sink on.
    pub fn capability(self) -> Capability {
        match self {
            SinkKind::Csv => Capability::SaveToCsv,
            SinkKind::Json => Capability::SaveToJson,
            SinkKind::GroupedYaml => Capability::SaveToYaml,
            SinkKind::YamlItems => Capability::SaveToYamlItems,
            SinkKind::Text => Capability::SaveToText,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SinkKind::Csv => "csv",
            SinkKind::Json => "json",
            SinkKind::GroupedYaml => "grouped yaml",
            SinkKind::YamlItems => "yaml items",
            SinkKind::Text => "text",
        }
    }

    /// Writes `catalog` to `destination` in this sink's format.
    pub fn export(
        self,
        catalog: &Catalog,
        destination: &Path,
        options: &GroupedExportOptions,
        log: &dyn LogSink,
    ) -> Result<ExportSummary, ExportError> {
        match self {
            SinkKind::Csv => export_csv(catalog, destination, log),
            SinkKind::Json => export_json(catalog, destination, log),
            SinkKind::GroupedYaml => export_grouped_yaml(catalog, destination, options, log),
            SinkKind::YamlItems => export_yaml_items(catalog, destination, log),
            SinkKind::Text => export_text(catalog, destination, log),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub sink: SinkKind,
    pub destination: PathBuf,
    pub records: usize,
    pub files_written: usize,
}

impl ExportSummary {
    pub(crate) fn single_file(sink: SinkKind, destination: PathBuf, records: usize) -> Self {
        Self {
            sink,
            destination,
            records,
            files_written: 1,
        }
    }
}

pub fn export_csv(
    catalog: &Catalog,
    path: &Path,
    log: &dyn LogSink,
) -> Result<ExportSummary, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in catalog {
        writer.write_record(csv_row(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;

    let written = write_file(path, &bytes)?;
    log.info(&format!("Catalog saved to CSV: {}", written.display()));
    Ok(ExportSummary::single_file(SinkKind::Csv, written, catalog.len()))
}

fn csv_row(record: &ProductRecord) -> [String; 8] {
    [
        record.name.clone(),
        record.price.map(|p| p.to_string()).unwrap_or_default(),
        record.availability.clone().unwrap_or_default(),
        record
            .rating
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
        record.url.clone(),
        record.description.clone(),
        record.media_path.clone(),
        record.category.clone(),
    ]
}

/// Pretty-printed JSON array with one object per record.
pub fn export_json(
    catalog: &Catalog,
    path: &Path,
    log: &dyn LogSink,
) -> Result<ExportSummary, ExportError> {
    let mut body = serde_json::to_string_pretty(catalog.records())?;
    body.push('\n');
    let written = write_file(path, body.as_bytes())?;
    log.info(&format!("Catalog saved to JSON: {}", written.display()));
    Ok(ExportSummary::single_file(SinkKind::Json, written, catalog.len()))
}

/// Reads back a file written by [`export_json`].
pub fn read_json_export(path: &Path) -> Result<Vec<ProductRecord>, ExportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// One description line per record, for eyeballing a run.
pub fn export_text(
    catalog: &Catalog,
    path: &Path,
    log: &dyn LogSink,
) -> Result<ExportSummary, ExportError> {
    let mut body = String::new();
    for line in catalog.listing() {
        body.push_str(&line);
        body.push('\n');
    }
    let written = write_file(path, body.as_bytes())?;
    log.info(&format!("Catalog saved to text file: {}", written.display()));
    Ok(ExportSummary::single_file(SinkKind::Text, written, catalog.len()))
}
