use pretty_assertions::assert_eq;
use shelf_core::{Catalog, ProductRecord, Rating};
use shelf_logging::{Level, MemoryLog};

fn record(name: &str, price: Option<f64>, availability: &str) -> ProductRecord {
    ProductRecord {
        availability: Some(availability.to_string()),
        category: "Books".to_string(),
        ..ProductRecord::new(name, format!("https://example.test/{name}"))
    }
    .with_price(price)
}

fn sample() -> Catalog {
    [
        record("Soumission", Some(50.10), "In stock"),
        record("Sharp Objects", Some(47.82), "In stock"),
        record("Tipping the Velvet", None, "In stock"),
        record("Sapiens", Some(54.23), "In stock"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn empty_catalog_queries_have_neutral_answers() {
    let catalog = Catalog::new();
    assert_eq!(catalog.total_price(), 0.0);
    assert!(catalog.all_in_stock());
    assert!(!catalog.any_out_of_stock());
    assert!(catalog.distinct_categories().is_empty());
    assert!(catalog.sorted_by_price().is_empty());
    assert_eq!(catalog.find_by_name("anything"), None);
}

#[test]
fn total_price_skips_absent_prices() {
    let catalog: Catalog = [
        record("Priced", Some(19.99), "In stock"),
        record("Unpriced", None, "In stock"),
    ]
    .into_iter()
    .collect();
    assert!((catalog.total_price() - 19.99).abs() < 1e-9);
}

#[test]
fn stock_queries_are_case_insensitive() {
    let catalog: Catalog = [
        record("A", Some(1.0), "In stock"),
        record("B", Some(2.0), "OUT OF STOCK"),
    ]
    .into_iter()
    .collect();
    assert!(!catalog.all_in_stock());
    assert!(catalog.any_out_of_stock());
}

#[test]
fn missing_availability_is_not_in_stock() {
    let mut catalog = Catalog::new();
    catalog.add(ProductRecord::new("No stock info", "https://example.test/x"));
    assert!(!catalog.all_in_stock());
    assert!(!catalog.any_out_of_stock());
}

#[test]
fn filter_by_min_price_excludes_absent_prices() {
    let catalog = sample();
    let names: Vec<&str> = catalog
        .filter_by_min_price(50.0)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Soumission", "Sapiens"]);
}

#[test]
fn find_by_name_trims_but_respects_case() {
    let catalog = sample();
    assert_eq!(
        catalog.find_by_name("  Sharp Objects ").map(|r| r.price),
        Some(Some(47.82))
    );
    assert_eq!(catalog.find_by_name("sharp objects"), None);
}

#[test]
fn sorted_by_price_is_stable_and_treats_absent_as_zero() {
    let mut catalog = sample();
    catalog.add(record("Free Sample", Some(0.0), "In stock"));
    let names: Vec<&str> = catalog
        .sorted_by_price()
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Tipping the Velvet",
            "Free Sample",
            "Sharp Objects",
            "Soumission",
            "Sapiens"
        ]
    );
    // Insertion order is untouched.
    assert_eq!(catalog.records()[0].name, "Soumission");
}

#[test]
fn distinct_categories_keep_first_seen_order() {
    let mut catalog = sample();
    catalog.add(ProductRecord {
        category: "Poetry".to_string(),
        ..ProductRecord::new("A Light in the Attic", "https://example.test/a")
    });
    catalog.add(ProductRecord::new("Mystery box", "https://example.test/m"));
    assert_eq!(
        catalog.distinct_categories(),
        vec!["Books", "Poetry", "Uncategorized"]
    );
}

#[test]
fn remove_takes_first_structural_match_only() {
    let mut catalog = Catalog::new();
    let dup = record("Dup", Some(3.0), "In stock");
    catalog.add(dup.clone());
    catalog.add(record("Other", Some(4.0), "In stock"));
    catalog.add(dup.clone());

    assert_eq!(catalog.remove(&dup), Some(dup.clone()));
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[0].name, "Other");
    assert_eq!(catalog.records()[1], dup);

    let missing = record("Missing", None, "In stock");
    assert_eq!(catalog.remove(&missing), None);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn clear_reports_prior_count_and_counter_survives() {
    let mut catalog = sample();
    assert_eq!(catalog.clear(), 4);
    assert!(catalog.is_empty());
    assert_eq!(catalog.clear(), 0);
    assert_eq!(catalog.info().records_created, 4);
}

#[test]
fn replace_swaps_whole_record() {
    let mut catalog = sample();
    let updated = ProductRecord {
        rating: Some(Rating::Five),
        ..record("Sharp Objects", Some(40.0), "In stock")
    };
    let log = MemoryLog::new();
    let previous = catalog
        .replace(1, updated.clone(), &log)
        .expect("index in range");
    assert_eq!(previous.price, Some(47.82));
    assert_eq!(catalog.records()[1], updated);
    assert!(log.contains(
        Level::Info,
        "Item updated at index 1: Product name=\"Sharp Objects\", price=40"
    ));

    assert_eq!(catalog.replace(99, updated, &log), None);
    assert!(log.contains(Level::Warn, "no record at index 99"));
    assert_eq!(catalog.len(), 4);
}

#[test]
fn listing_has_one_line_per_record_in_order() {
    let catalog = sample();
    let listing = catalog.listing();
    assert_eq!(listing.len(), 4);
    assert!(listing[0].contains("name=\"Soumission\""));
    assert!(listing[2].contains("price=none"));
}

#[test]
fn duplicates_are_kept() {
    let mut catalog = Catalog::new();
    let same = record("Same", Some(1.0), "In stock");
    catalog.add(same.clone());
    catalog.add(same);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.info().records_created, 2);
}
