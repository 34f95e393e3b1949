// src/domain/report.rs
//
// Renders a GlobalAnalysis into the French plain-text report sent by mail,
// and exposes the evolution gate deciding whether to send it at all.

use chrono::NaiveDate;

use super::analysis::GlobalAnalysis;
use super::diff::{CountComparison, RecordComparison};
use super::history::ShortHistory;
use super::listing::Listing;
use super::snapshot::CountSnapshot;

/// One-line summary used as the mail subject.
pub fn format_title(analysis: &GlobalAnalysis) -> String {
    format!(
        "Nexity - {} vente / {} nouveau",
        analysis.latest_counts.sold, analysis.latest_counts.new
    )
}

/// Multi-section indented report: count history, then the itemized
/// evolutions of the latest comparison.
pub fn format_report(analysis: &GlobalAnalysis) -> String {
    let mut res = format!(
        "Global Analysis at {}\n\n",
        format_date(analysis.count_history.current.date)
    );
    res.push_str(&format_count_history(&analysis.count_history));
    res.push_str("\n\n");
    res.push_str(&format_evolutions(
        &analysis.latest_counts,
        &analysis.latest_compare,
    ));
    res
}

/// The gate: notify iff the latest comparison shows any movement.
pub fn should_notify(analysis: &GlobalAnalysis) -> bool {
    analysis.has_changed()
}

fn format_count_history(history: &ShortHistory<CountSnapshot>) -> String {
    let mut res = String::from("Historique du nombre de biens :\n");
    res.push_str(&format!("\t{}\n", format_count_snapshot(&history.original)));
    if let Some(previous) = &history.previous {
        res.push_str(&format!("\t{}\n", format_count_snapshot(previous)));
    }
    res.push_str(&format!("\t{}\n", format_count_snapshot(&history.current)));
    res
}

fn format_evolutions(counts: &CountComparison, records: &RecordComparison) -> String {
    let mut sub = format_section(counts.sold, &records.sold, "vente");
    sub.push_str(&format_section(counts.new, &records.new, "nouveau"));
    sub.push_str(&format!("{} restants\n", counts.remaining));

    format!(
        "Evolutions {} -> {} :\n{}",
        format_date(counts.previous_date),
        format_date(counts.current_date),
        add_indent(&sub)
    )
}

fn format_section(n: usize, listings: &[Listing], name: &str) -> String {
    if n == 0 {
        return format!("0 {name}\n");
    }
    let mut lines = String::new();
    for listing in listings {
        lines.push_str(&format_listing_line(listing));
        lines.push('\n');
    }
    format!("{n} {name} :\n{}\n", add_indent(&lines))
}

/// One itemized listing line, e.g.
/// `Lot 4161 ; 46M² / 2 pièces / Nord-Ouest / Etage 16 / Prix 301,420.00 €`.
pub fn format_listing_line(listing: &Listing) -> String {
    let mut res = format!(
        "Lot {} ; {}M² / {} / {} / Etage {} / Prix {}",
        listing.id,
        listing.size_m2,
        listing.room_label,
        listing.orientation,
        listing.floor,
        format_price(listing.price)
    );
    match listing.reduced_tax_price {
        Some(reduced) => res.push_str(&format!(" / TVA 5.5 {}", format_price(reduced))),
        None => res.push_str(" / Pas de TVA 5.5"),
    }
    res
}

fn format_count_snapshot(snap: &CountSnapshot) -> String {
    format!("{} -> {} biens", format_date(snap.date), snap.count)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Euro amount with thousands separators and two decimals: `1,234,567.00 €`.
pub fn format_price(price: f64) -> String {
    let fixed = format!("{price:.2}");
    let (whole, cents) = match fixed.split_once('.') {
        Some((whole, cents)) => (whole, cents),
        None => (fixed.as_str(), "00"),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{cents} €")
}

/// Indents every line of `s` with a tab; a trailing newline is dropped so
/// the caller controls the separator after the block.
fn add_indent(s: &str) -> String {
    let indented = format!("\t{}", s.replace('\n', "\n\t"));
    match indented.strip_suffix("\n\t") {
        Some(head) => head.to_string(),
        None => indented,
    }
}
