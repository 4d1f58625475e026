//! YAML exports shaped for the product-listing config tree.

use std::path::Path;

use serde::Serialize;
use shelf_core::{Catalog, ProductRecord};
use shelf_logging::LogSink;

use crate::export::{ExportError, ExportSummary, SinkKind};
use crate::extract::DEFAULT_CATEGORY;
use crate::persist::{ensure_output_dir, write_file, AtomicFileWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedExportOptions {
    /// Every product lands under this one label; records' own `category`
    /// is not consulted.
    pub category_label: String,
}

impl Default for GroupedExportOptions {
    fn default() -> Self {
        Self {
            category_label: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GroupedDocument<'a> {
    categories: Vec<CategoryGroup<'a>>,
}

#[derive(Debug, Serialize)]
struct CategoryGroup<'a> {
    name: &'a str,
    products: Vec<ProductSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct ProductSummary<'a> {
    name: &'a str,
    price: Option<f64>,
    description: &'a str,
    media: &'a str,
}

impl<'a> From<&'a ProductRecord> for ProductSummary<'a> {
    fn from(record: &'a ProductRecord) -> Self {
        let media = if record.media_path.is_empty() {
            record.url.as_str()
        } else {
            record.media_path.as_str()
        };
        Self {
            name: &record.name,
            price: record.price,
            description: &record.description,
            media,
        }
    }
}

pub fn export_grouped_yaml(
    catalog: &Catalog,
    path: &Path,
    options: &GroupedExportOptions,
    log: &dyn LogSink,
) -> Result<ExportSummary, ExportError> {
    let document = GroupedDocument {
        categories: vec![CategoryGroup {
            name: &options.category_label,
            products: catalog.iter().map(ProductSummary::from).collect(),
        }],
    };
    let body = serde_yaml::to_string(&document)?;
    let written = write_file(path, body.as_bytes())?;
    log.info(&format!(
        "Catalog saved to grouped YAML under {:?}: {}",
        options.category_label,
        written.display()
    ));
    Ok(ExportSummary::single_file(
        SinkKind::GroupedYaml,
        written,
        catalog.len(),
    ))
}

/// File name for the record at zero-based `index`.
pub fn item_file_name(index: usize) -> String {
    format!("item_{}.yml", index + 1)
}

/// Writes `item_<n>.yml` per record into `dir`, overwriting older files.
pub fn export_yaml_items(
    catalog: &Catalog,
    dir: &Path,
    log: &dyn LogSink,
) -> Result<ExportSummary, ExportError> {
    ensure_output_dir(dir)?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    for (index, record) in catalog.iter().enumerate() {
        let body = serde_yaml::to_string(record)?;
        writer.write(item_file_name(index), body.as_bytes())?;
    }
    log.info(&format!(
        "Catalog saved to YAML directory (one file per item): {}",
        dir.display()
    ));
    Ok(ExportSummary {
        sink: SinkKind::YamlItems,
        destination: dir.to_path_buf(),
        records: catalog.len(),
        files_written: catalog.len(),
    })
}
