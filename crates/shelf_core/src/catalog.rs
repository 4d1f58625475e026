use std::collections::HashSet;

use shelf_logging::LogSink;

use crate::record::ProductRecord;

const IN_STOCK: &str = "in stock";
const OUT_OF_STOCK: &str = "out of stock";

/// Informational metadata about a catalog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogInfo {
    pub kind: &'static str,
    pub version: &'static str,
    pub records_created: usize,
}

/// Ordered collection of product records for one extraction run.
///
/// Insertion order mirrors document order and is preserved by every
/// operation except [`Catalog::sorted_by_price`], which returns a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    created: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ProductRecord) -> &ProductRecord {
        self.records.push(record);
        self.created += 1;
        &self.records[self.records.len() - 1]
    }

    /// Removes the first record equal to `record`.
    pub fn remove(&mut self, record: &ProductRecord) -> Option<ProductRecord> {
        let index = self.records.iter().position(|r| r == record)?;
        Some(self.records.remove(index))
    }

    /// Empties the catalog and returns how many records it held.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Swaps the record at `index` for `record` and returns the previous one.
    /// Every update, and every miss, leaves a line in `log`.
    pub fn replace(
        &mut self,
        index: usize,
        record: ProductRecord,
        log: &dyn LogSink,
    ) -> Option<ProductRecord> {
        let held = self.records.len();
        let Some(slot) = self.records.get_mut(index) else {
            log.warn(&format!(
                "Item update skipped: no record at index {index} (catalog holds {held})"
            ));
            return None;
        };
        log.info(&format!("Item updated at index {index}: {record}"));
        Some(std::mem::replace(slot, record))
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter_by_min_price(&self, threshold: f64) -> Vec<&ProductRecord> {
        self.records
            .iter()
            .filter(|r| r.price.is_some_and(|p| p >= threshold))
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ProductRecord> {
        let wanted = name.trim();
        self.records.iter().find(|r| r.name.trim() == wanted)
    }

    pub fn total_price(&self) -> f64 {
        self.records.iter().map(ProductRecord::price_or_zero).sum()
    }

    pub fn all_in_stock(&self) -> bool {
        self.records.iter().all(|r| r.availability_contains(IN_STOCK))
    }

    pub fn any_out_of_stock(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.availability_contains(OUT_OF_STOCK))
    }

    /// Unique category labels in first-seen order.
    pub fn distinct_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Stable ascending sort by price, absent prices ordered as zero.
    pub fn sorted_by_price(&self) -> Vec<&ProductRecord> {
        let mut sorted: Vec<&ProductRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_price(b));
        sorted
    }

    /// One description line per record, in catalog order.
    pub fn listing(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            kind: "Catalog",
            version: env!("CARGO_PKG_VERSION"),
            records_created: self.created,
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Extend<ProductRecord> for Catalog {
    fn extend<T: IntoIterator<Item = ProductRecord>>(&mut self, iter: T) {
        for record in iter {
            self.add(record);
        }
    }
}

impl FromIterator<ProductRecord> for Catalog {
    fn from_iter<T: IntoIterator<Item = ProductRecord>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}
