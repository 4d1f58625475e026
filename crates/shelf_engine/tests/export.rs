use std::fs;

use pretty_assertions::assert_eq;
use shelf_core::{Catalog, ProductRecord, Rating};
use shelf_engine::{
    export_csv, export_grouped_yaml, export_json, export_text, export_yaml_items,
    read_json_export, ExportError, GroupedExportOptions, SinkKind,
};
use shelf_logging::{Level, MemoryLog};
use tempfile::TempDir;

fn attic() -> ProductRecord {
    ProductRecord {
        name: "A Light in the Attic".to_string(),
        price: Some(51.77),
        description: String::new(),
        category: "Books".to_string(),
        media_path: "https://example.test/media/cache/a.jpg".to_string(),
        rating: Some(Rating::Three),
        availability: Some("In stock".to_string()),
        url: "https://example.test/catalogue/a-light-in-the-attic_1000/index.html".to_string(),
    }
}

fn velvet() -> ProductRecord {
    ProductRecord {
        name: "Tipping the Velvet, \"Special\"".to_string(),
        media_path: String::new(),
        ..ProductRecord::new("", "https://example.test/catalogue/velvet/index.html")
    }
}

fn catalog() -> Catalog {
    [attic(), velvet()].into_iter().collect()
}

#[test]
fn csv_has_fixed_header_and_empty_absent_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.csv");
    let log = MemoryLog::new();

    let summary = export_csv(&catalog(), &path, &log).unwrap();
    assert_eq!(summary.sink, SinkKind::Csv);
    assert_eq!(summary.records, 2);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "name,price,availability,rating,url,description,media_path,category"
    );
    assert_eq!(
        lines[1],
        "A Light in the Attic,51.77,In stock,Three,https://example.test/catalogue/a-light-in-the-attic_1000/index.html,,https://example.test/media/cache/a.jpg,Books"
    );
    assert_eq!(
        lines[2],
        "\"Tipping the Velvet, \"\"Special\"\"\",,,,https://example.test/catalogue/velvet/index.html,,,Uncategorized"
    );
    assert!(log.contains(Level::Info, "Catalog saved to CSV"));
}

#[test]
fn csv_for_empty_catalog_is_header_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.csv");
    export_csv(&Catalog::new(), &path, &MemoryLog::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "name,price,availability,rating,url,description,media_path,category\n"
    );
}

#[test]
fn json_round_trips_field_for_field() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out").join("data.json");
    let original = catalog();

    export_json(&original, &path, &MemoryLog::new()).unwrap();
    let reloaded = read_json_export(&path).unwrap();
    assert_eq!(reloaded, original.records().to_vec());

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  {\n    \"name\": \"A Light in the Attic\""));
    assert!(raw.contains("\"price\": null"));
}

#[test]
fn json_for_empty_catalog_is_an_empty_array() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.json");
    export_json(&Catalog::new(), &path, &MemoryLog::new()).unwrap();
    assert_eq!(read_json_export(&path).unwrap(), Vec::<ProductRecord>::new());
}

#[test]
fn grouped_yaml_reduces_products_under_one_label() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("products").join("books_from_site.yaml");

    let mut mixed = catalog();
    mixed.add(ProductRecord {
        category: "Poetry".to_string(),
        media_path: String::new(),
        url: String::new(),
        ..ProductRecord::new("Untitled", "")
    });

    export_grouped_yaml(&mixed, &path, &GroupedExportOptions::default(), &MemoryLog::new())
        .unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    let categories = doc["categories"].as_sequence().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"].as_str(), Some("Books"));

    let products = categories[0]["products"].as_sequence().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["price"].as_f64(), Some(51.77));
    assert_eq!(
        products[0]["media"].as_str(),
        Some("https://example.test/media/cache/a.jpg")
    );
    // Empty media path falls back to the page url, then to "".
    assert_eq!(
        products[1]["media"].as_str(),
        Some("https://example.test/catalogue/velvet/index.html")
    );
    assert!(products[1]["price"].is_null());
    assert_eq!(products[2]["media"].as_str(), Some(""));
    assert_eq!(products[2]["description"].as_str(), Some(""));

    let keys: Vec<&str> = products[0]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["name", "price", "description", "media"]);
}

#[test]
fn grouped_yaml_is_byte_identical_across_runs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.yaml");
    let snapshot = catalog();
    let options = GroupedExportOptions::default();

    export_grouped_yaml(&snapshot, &path, &options, &MemoryLog::new()).unwrap();
    let first = fs::read(&path).unwrap();
    export_grouped_yaml(&snapshot, &path, &options, &MemoryLog::new()).unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn grouped_yaml_for_empty_catalog_keeps_structure() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.yaml");
    export_grouped_yaml(
        &Catalog::new(),
        &path,
        &GroupedExportOptions::default(),
        &MemoryLog::new(),
    )
    .unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["categories"][0]["name"].as_str(), Some("Books"));
    assert!(doc["categories"][0]["products"]
        .as_sequence()
        .unwrap()
        .is_empty());
}

#[test]
fn yaml_items_writes_one_numbered_file_per_record() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("items");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("item_1.yml"), "stale").unwrap();

    let summary = export_yaml_items(&catalog(), &dir, &MemoryLog::new()).unwrap();
    assert_eq!(summary.files_written, 2);

    let first: ProductRecord =
        serde_yaml::from_str(&fs::read_to_string(dir.join("item_1.yml")).unwrap()).unwrap();
    let second: ProductRecord =
        serde_yaml::from_str(&fs::read_to_string(dir.join("item_2.yml")).unwrap()).unwrap();
    assert_eq!(first, attic());
    assert_eq!(second, velvet());
}

#[test]
fn yaml_items_for_empty_catalog_creates_empty_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("items");
    let summary = export_yaml_items(&Catalog::new(), &dir, &MemoryLog::new()).unwrap();
    assert_eq!(summary.files_written, 0);
    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn text_export_writes_one_description_per_line() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("items.txt");
    export_text(&catalog(), &path, &MemoryLog::new()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Product name=\"A Light in the Attic\", price=51.77"));
    assert!(lines[1].contains("rating=none"));
}

#[test]
fn export_into_a_file_path_fails_with_persist_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let err = export_csv(&catalog(), &blocker.join("data.csv"), &MemoryLog::new()).unwrap_err();
    assert!(matches!(err, ExportError::Persist(_)));
}

#[test]
fn sink_kind_dispatches_to_matching_writer() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("via_sink.txt");
    let summary = SinkKind::Text
        .export(
            &catalog(),
            &path,
            &GroupedExportOptions::default(),
            &MemoryLog::new(),
        )
        .unwrap();
    assert_eq!(summary.sink, SinkKind::Text);
    assert_eq!(summary.destination, path);
}
