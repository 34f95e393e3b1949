// src/scraper/parse.rs
//
// Parsing boundary between the scraped page and the typed domain. The page
// embeds its inventory as a JavaScript state object; we locate it, slice the
// "lots" array out as JSON, and convert each raw lot into a `Listing`.
// Nothing downstream of this module ever sees a raw value.

use chrono::NaiveDateTime;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::domain::listing::{Listing, ListingCategory, Orientation};

use super::models::RawLot;
use super::scraper_error::ScrapeError;

const STATE_MARKER: &str = "window.__NUXT__";

/// Full pipeline for one capture: HTML -> raw lots -> typed listings.
/// `loaded_at` is supplied by the caller so parsing stays deterministic.
pub fn parse_snapshot_html(
    html: &str,
    loaded_at: NaiveDateTime,
) -> Result<Vec<Listing>, ScrapeError> {
    let script = extract_state_script(html)?;
    let lots_json = slice_lots_array(&script)?;
    let raw_lots: Vec<RawLot> =
        serde_json::from_str(lots_json).map_err(|e| ScrapeError::JsonParse(e.to_string()))?;
    raw_lots
        .iter()
        .map(|lot| convert_lot(lot, loaded_at))
        .collect()
}

/// The text of the script tag carrying the embedded page state.
fn extract_state_script(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("script").map_err(|e| ScrapeError::HtmlParse(e.to_string()))?;

    for element in document.select(&selector) {
        let text: String = element.text().collect();
        if text.contains(STATE_MARKER) {
            return Ok(text);
        }
    }
    Err(ScrapeError::MissingStateScript)
}

/// Slices the balanced `"lots": [...]` JSON array out of the state script.
/// The script is JavaScript, not a JSON document, so the array is found by
/// bracket matching rather than a full parse.
fn slice_lots_array(script: &str) -> Result<&str, ScrapeError> {
    let marker = "\"lots\":";
    let start = script.find(marker).ok_or_else(|| {
        ScrapeError::UnexpectedShape("\"lots\" array missing from page state".to_string())
    })?;
    let after = &script[start + marker.len()..];
    let open = after
        .find('[')
        .ok_or_else(|| ScrapeError::UnexpectedShape("\"lots\" is not an array".to_string()))?;
    let array = &after[open..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in array.as_bytes().iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&array[..=i]);
                }
            }
            _ => {}
        }
    }
    Err(ScrapeError::UnexpectedShape(
        "unterminated \"lots\" array".to_string(),
    ))
}

/// Converts one raw lot into a typed [`Listing`], validating every field.
pub fn convert_lot(lot: &RawLot, loaded_at: NaiveDateTime) -> Result<Listing, ScrapeError> {
    Ok(Listing {
        id: as_string(&lot.nb_lot, "nb_lot")?,
        category: extract_category(&lot.type_bien)?,
        price: as_f64(&lot.prix_neuf_tva, "prixNeufTva")?,
        reduced_tax_price: as_opt_f64(lot.prix_full_tax.as_ref(), "prixFullTax")?,
        delivery_date: lot.date_dispo.clone(),
        size_m2: as_i64(&lot.surface, "surface")?,
        floor: as_i64(&lot.etage, "etage")?,
        orientation: extract_orientation(lot)?,
        has_balcony: truthy(&lot.balcon),
        has_terrace: yes_no(&lot.terrasse, "terrasse")?,
        parking_count: as_i64(&lot.parking, "parking")?,
        room_label: as_string(&lot.nb_piece, "nb_piece")?,
        loaded_at,
    })
}

fn extract_category(label: &str) -> Result<ListingCategory, ScrapeError> {
    match label {
        "Appartement" => Ok(ListingCategory::Apartment),
        "Studio" => Ok(ListingCategory::Studio),
        other => Err(ScrapeError::InvalidValue(format!(
            "unknown lot category '{other}'"
        ))),
    }
}

fn extract_orientation(lot: &RawLot) -> Result<Orientation, ScrapeError> {
    let south = yes_no(&lot.orientation_sud, "orientation_sud")?;
    let east = yes_no(&lot.orientation_est, "orientation_est")?;
    let west = yes_no(&lot.orientation_ouest, "orientation_ouest")?;
    let north = yes_no(&lot.orientation_nord, "orientation_nord")?;

    if north && west {
        Ok(Orientation::NorthWest)
    } else if south && east {
        Ok(Orientation::SouthEast)
    } else if south && west {
        Ok(Orientation::SouthWest)
    } else if north && east {
        Ok(Orientation::NorthEast)
    } else {
        Err(ScrapeError::InvalidValue(format!(
            "unsupported orientation flags (south, east, west, north) = ({south}, {east}, {west}, {north})"
        )))
    }
}

fn yes_no(value: &str, field: &str) -> Result<bool, ScrapeError> {
    match value {
        "OUI" => Ok(true),
        "NON" => Ok(false),
        other => Err(ScrapeError::InvalidValue(format!(
            "{field}: expected OUI or NON, got '{other}'"
        ))),
    }
}

fn as_string(value: &Value, field: &str) -> Result<String, ScrapeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(invalid(field, other)),
    }
}

fn as_f64(value: &Value, field: &str) -> Result<f64, ScrapeError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(field, value)),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid(field, value)),
        other => Err(invalid(field, other)),
    }
}

fn as_i64(value: &Value, field: &str) -> Result<i64, ScrapeError> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None => n
                .as_f64()
                .map(|f| f as i64)
                .ok_or_else(|| invalid(field, value)),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => Ok(i),
                Err(_) => trimmed
                    .parse::<f64>()
                    .map(|f| f as i64)
                    .map_err(|_| invalid(field, value)),
            }
        }
        other => Err(invalid(field, other)),
    }
}

fn as_opt_f64(value: Option<&Value>, field: &str) -> Result<Option<f64>, ScrapeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_f64(v, field).map(Some),
    }
}

// JavaScript-style truthiness for flags the page stores as 0/1, "", or null.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn invalid(field: &str, value: &Value) -> ScrapeError {
    ScrapeError::InvalidValue(format!("{field}: cannot convert {value}"))
}
