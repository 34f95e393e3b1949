use serde::Deserialize;
use serde_json::Value;

// lot (one entry of the embedded "lots" array)
//  ├── nb_lot            lot number, number or string depending on the page
//  ├── type_bien         "Appartement" | "Studio"
//  ├── prixNeufTva       full-tax price
//  ├── prixFullTax       reduced-VAT price, null when not eligible
//  ├── date_dispo        free-text delivery label
//  ├── surface / etage / parking / nb_piece
//  ├── orientation_sud / _est / _ouest / _nord   "OUI" / "NON"
//  ├── balcon            truthy flag
//  └── terrasse          "OUI" / "NON"
//
// Numeric-looking fields arrive as numbers on some captures and as strings
// on others, so they stay `Value` here and are coerced at the conversion
// boundary in `parse.rs`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLot {
    pub nb_lot: Value,
    pub type_bien: String,

    #[serde(rename = "prixNeufTva")]
    pub prix_neuf_tva: Value,
    #[serde(rename = "prixFullTax")]
    pub prix_full_tax: Option<Value>,

    pub date_dispo: String,
    pub surface: Value,
    pub etage: Value,

    pub orientation_sud: String,
    pub orientation_est: String,
    pub orientation_ouest: String,
    pub orientation_nord: String,

    pub balcon: Value,
    pub terrasse: String,
    pub parking: Value,
    pub nb_piece: Value,
}
