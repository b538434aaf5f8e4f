//! CSV rendering for transaction and RFQ exports.
//!
//! Numeric fields are fixed to two decimals; fields containing commas,
//! quotes or newlines are double-quote escaped.

use std::borrow::Cow;
use std::fmt::Write;

use sunstock_core::RfqDraft;

use crate::models::StockTransaction;

/// Quote a CSV field if it contains a comma, quote or newline.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Render the clients/consumption export: one row per output transaction.
///
/// Quantities are negated - the export reads as material leaving the
/// warehouse. Produces `transactions.len() + 1` lines (header + rows).
#[must_use]
pub fn consumption_csv(transactions: &[&StockTransaction]) -> String {
    let mut csv =
        String::from("Datum,Projekat,Stavka,Kolicina,Jedinicna cena,Ukupna vrednost,Osoblje,Komentar\n");

    for t in transactions {
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.2},{:.2},{},{}",
            t.created_at.format("%d.%m.%Y"),
            escape(&t.project),
            escape(&t.item_name),
            -i64::from(t.quantity),
            t.unit_price,
            t.total_value,
            escape(&t.staff_name),
            escape(t.comment.as_deref().unwrap_or("")),
        );
    }

    csv
}

/// Download filename for the consumption export.
///
/// Project names are reduced to `[A-Za-z0-9_]` so the header stays a plain
/// token.
#[must_use]
pub fn consumption_filename(project: Option<&str>) -> String {
    match project {
        Some(p) => {
            let safe: String = p
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            format!("klijenti_{safe}.csv")
        }
        None => "klijenti_svi_projekti.csv".to_owned(),
    }
}

/// Render the RFQ draft as CSV: numbered lines plus a trailing total row.
#[must_use]
pub fn rfq_csv(draft: &RfqDraft) -> String {
    let mut csv = String::from("R. br,Naziv artikla,Jedinica,Kolicina,Cena po jedinici,Ukupno\n");

    for (index, line) in draft.lines().iter().enumerate() {
        let _ = writeln!(
            csv,
            "{},{},{},{},{:.2},{:.2}",
            index + 1,
            escape(&line.name),
            escape(&line.unit),
            line.quantity,
            line.unit_price,
            line.total(),
        );
    }

    let _ = writeln!(csv, "UKUPNO,,,,,{:.2}", draft.total());
    csv
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sunstock_core::{ItemId, StaffId, StockDirection, TransactionId};

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn output_tx(id: i32, item_name: &str, quantity: i32, comment: Option<&str>) -> StockTransaction {
        StockTransaction {
            id: TransactionId::new(id),
            item_id: Some(ItemId::new(1)),
            item_name: item_name.to_owned(),
            direction: StockDirection::Output,
            quantity,
            unit_price: dec("120.5"),
            total_value: dec("120.5") * Decimal::from(quantity),
            project: "Solarna elektrana Beograd".to_owned(),
            staff_id: Some(StaffId::new(2)),
            staff_name: "Ana Jovanovic".to_owned(),
            comment: comment.map(str::to_owned),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_consumption_csv_has_header_plus_row_per_transaction() {
        let a = output_tx(1, "DC kabl 4mm2", 10, None);
        let b = output_tx(2, "Junction box IP67", 3, Some("hitna isporuka"));
        let csv = consumption_csv(&[&a, &b]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Datum,Projekat,"));
    }

    #[test]
    fn test_consumption_csv_negates_quantity_and_fixes_decimals() {
        let t = output_tx(1, "DC kabl 4mm2", 10, None);
        let csv = consumption_csv(&[&t]);

        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",-10,"));
        assert!(row.contains(",120.50,"));
        assert!(row.contains(",1205.00,"));
    }

    #[test]
    fn test_embedded_commas_and_quotes_are_escaped() {
        let t = output_tx(1, "Kabl, crni \"premium\"", 1, None);
        let csv = consumption_csv(&[&t]);

        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Kabl, crni \"\"premium\"\"\""));
        // The quoted field must not add extra unquoted commas
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_consumption_filename_sanitizes_project() {
        assert_eq!(consumption_filename(None), "klijenti_svi_projekti.csv");
        assert_eq!(
            consumption_filename(Some("Solarna elektrana Novi Sad")),
            "klijenti_Solarna_elektrana_Novi_Sad.csv"
        );
    }

    #[test]
    fn test_rfq_csv_numbers_lines_and_appends_total() {
        let mut draft = RfqDraft::new();
        draft.add(ItemId::new(1), "Panel 450W", dec("35000"), 2);
        draft.add(ItemId::new(2), "DC kabl 4mm2", dec("120.50"), 10);

        let csv = rfq_csv(&draft);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,Panel 450W,kom,2,35000.00,70000.00"));
        assert!(lines[2].starts_with("2,DC kabl 4mm2,kom,10,120.50,1205.00"));
        assert_eq!(lines[3], "UKUPNO,,,,,71205.00");
    }
}
