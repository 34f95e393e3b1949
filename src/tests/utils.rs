use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;

use crate::db::{init_db, Database};
use crate::domain::listing::{Listing, ListingCategory, Orientation};
use crate::domain::snapshot::Snapshot;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A listing with plausible defaults; only id and price vary per test.
pub fn listing_priced(id: &str, price: f64) -> Listing {
    Listing {
        id: id.to_string(),
        category: ListingCategory::Apartment,
        price,
        reduced_tax_price: None,
        delivery_date: "3ème trimestre 2025".to_string(),
        size_m2: 46,
        floor: 3,
        orientation: Orientation::SouthWest,
        has_balcony: true,
        has_terrace: false,
        parking_count: 1,
        room_label: "2 pièces".to_string(),
        loaded_at: date(2023, 1, 1).and_time(NaiveTime::MIN),
    }
}

pub fn snapshot_of(day: NaiveDate, records: Vec<Listing>) -> Snapshot {
    Snapshot::new(day, records)
}

pub fn snapshot_with_ids(day: NaiveDate, ids: &[&str]) -> Snapshot {
    Snapshot::new(
        day,
        ids.iter().map(|id| listing_priced(id, 250_000.0)).collect(),
    )
}

/// Initialize a fresh in-memory journal using the production schema.
pub fn init_test_db() -> Database {
    let db = Database::new(":memory:");

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

/// A scratch folder under the system temp dir, unique per test name.
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("immo-watch-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("could not create test dir");
    dir
}

/// Minimal page carrying the embedded state, for parser and loader tests.
pub fn snapshot_html(lots_json: &str) -> String {
    format!(
        "<html><head><script>window.__NUXT__ = \
         {{state:{{productDetails:{{\"lots\": {lots_json}}}}}}};</script></head>\
         <body></body></html>"
    )
}

pub fn lot_json(id: &str, price: f64) -> String {
    format!(
        r#"{{"nb_lot": "{id}", "type_bien": "Appartement", "prixNeufTva": {price}, "prixFullTax": null, "date_dispo": "3ème trimestre 2025", "surface": 46, "etage": 3, "orientation_sud": "OUI", "orientation_est": "NON", "orientation_ouest": "OUI", "orientation_nord": "NON", "balcon": 1, "terrasse": "NON", "parking": 1, "nb_piece": 2}}"#
    )
}
