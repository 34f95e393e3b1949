// src/domain/listing.rs

use chrono::NaiveDateTime;
use std::fmt;

/// One unit ("lot") as advertised on the programme page, flattened and
/// typed, ready for comparison. Raw scraped values never reach this struct:
/// conversion and validation happen at the scraper boundary.
///
/// `id` is the lot number shown on the page. It is stable across captures
/// and unique within one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub category: ListingCategory,
    /// Full-tax price, in euros.
    pub price: f64,
    /// Reduced-VAT price when the lot is eligible.
    pub reduced_tax_price: Option<f64>,
    /// Free-text delivery label, e.g. "3ème trimestre 2025".
    pub delivery_date: String,
    pub size_m2: i64,
    pub floor: i64,
    pub orientation: Orientation,
    pub has_balcony: bool,
    pub has_terrace: bool,
    pub parking_count: i64,
    /// Room label as displayed, e.g. "2 pièces".
    pub room_label: String,
    /// When this capture was taken. Supplied by the caller, never read from
    /// the clock here.
    pub loaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingCategory {
    Apartment,
    Studio,
}

impl ListingCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingCategory::Apartment => "Appartement",
            ListingCategory::Studio => "Studio",
        }
    }
}

impl fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::NorthEast => "Nord-Est",
            Orientation::NorthWest => "Nord-Ouest",
            Orientation::SouthEast => "Sud-Est",
            Orientation::SouthWest => "Sud-Ouest",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
