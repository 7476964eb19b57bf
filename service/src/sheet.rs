//! Spreadsheet transfer of [`Case`] rows.
//!
//! Cases are exchanged with the outside world as CSV: one row per case,
//! keyed by the unique case number. Importing an exported sheet upserts
//! every row by its number, so a round-trip reproduces the same set of
//! case numbers.

use std::collections::HashMap;

use derive_more::{Display, Error as StdError, From};

use crate::domain::{case, Case};

/// Header written to (and expected from) every transferred sheet.
const HEADER: [&str; 9] = [
    "number",
    "buyer",
    "buyer_phone",
    "seller",
    "seller_phone",
    "city",
    "status",
    "tax_kind",
    "notes",
];

/// Single transferable [`Case`] row of a sheet.
#[derive(Clone, Debug)]
pub struct Row {
    /// [`case::Number`] the row is keyed by.
    pub number: case::Number,

    /// Buying [`case::Party`] of the [`Case`].
    pub buyer: case::Party,

    /// Selling [`case::Party`] of the [`Case`].
    pub seller: case::Party,

    /// [`case::City`] of the [`Case`].
    pub city: Option<case::City>,

    /// [`case::Status`] of the [`Case`].
    pub status: case::Status,

    /// [`case::TaxKind`] of the [`Case`].
    pub tax_kind: case::TaxKind,

    /// Free-form [`case::Notes`] of the [`Case`].
    pub notes: Option<case::Notes>,
}

impl From<&Case> for Row {
    fn from(case: &Case) -> Self {
        Self {
            number: case.number.clone(),
            buyer: case.buyer.clone(),
            seller: case.seller.clone(),
            city: case.city.clone(),
            status: case.status,
            tax_kind: case.tax_kind,
            notes: case.notes.clone(),
        }
    }
}

/// Encodes the provided [`Row`]s as CSV.
///
/// # Errors
///
/// Returns an [`Error`] if CSV writing fails.
pub fn encode(rows: &[Row]) -> Result<String, Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(HEADER)?;
    for row in rows {
        let status = row.status.to_string();
        let tax_kind = row.tax_kind.to_string();
        wtr.write_record([
            row.number.as_ref(),
            row.buyer.name.as_ref(),
            row.buyer.phone.as_ref().map_or("", AsRef::as_ref),
            row.seller.name.as_ref(),
            row.seller.phone.as_ref().map_or("", AsRef::as_ref),
            row.city.as_ref().map_or("", AsRef::as_ref),
            status.as_str(),
            tax_kind.as_str(),
            row.notes.as_ref().map_or("", AsRef::as_ref),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| Error::NotUtf8)
}

/// Decodes [`Row`]s from the provided CSV text.
///
/// # Errors
///
/// Returns an [`Error`] if the CSV is malformed, the header doesn't
/// match, or a row carries an invalid field.
pub fn decode(csv: &str) -> Result<Vec<Row>, Error> {
    let mut rdr = csv::Reader::from_reader(csv.as_bytes());

    let header = rdr.headers()?;
    if header != &csv::StringRecord::from(HEADER.as_slice()) {
        return Err(Error::Header);
    }

    rdr.records()
        .map(|record| {
            let record = record?;
            let line = record
                .position()
                .map_or(0, csv::Position::line);

            let field = |idx: usize| {
                record.get(idx).map(str::trim).filter(|f| !f.is_empty())
            };
            let invalid = |name: &'static str| Error::Field { line, name };

            Ok(Row {
                number: field(0)
                    .and_then(case::Number::new)
                    .ok_or(invalid("number"))?,
                buyer: case::Party {
                    name: field(1)
                        .and_then(case::PartyName::new)
                        .ok_or(invalid("buyer"))?,
                    phone: field(2)
                        .map(|f| {
                            case::Phone::new(f)
                                .ok_or(invalid("buyer_phone"))
                        })
                        .transpose()?,
                },
                seller: case::Party {
                    name: field(3)
                        .and_then(case::PartyName::new)
                        .ok_or(invalid("seller"))?,
                    phone: field(4)
                        .map(|f| {
                            case::Phone::new(f)
                                .ok_or(invalid("seller_phone"))
                        })
                        .transpose()?,
                },
                city: field(5)
                    .map(|f| case::City::new(f).ok_or(invalid("city")))
                    .transpose()?,
                status: field(6)
                    .and_then(|f| f.parse().ok())
                    .ok_or(invalid("status"))?,
                tax_kind: field(7)
                    .and_then(|f| f.parse().ok())
                    .ok_or(invalid("tax_kind"))?,
                notes: field(8)
                    .map(|f| case::Notes::new(f).ok_or(invalid("notes")))
                    .transpose()?,
            })
        })
        .collect()
}

/// Deduplicates the provided [`Row`]s by their [`case::Number`], keeping
/// the last occurrence of every number.
#[must_use]
pub fn dedupe(rows: Vec<Row>) -> Vec<Row> {
    let mut by_number = HashMap::<case::Number, usize>::new();
    let mut out = Vec::<Row>::with_capacity(rows.len());

    for row in rows {
        if let Some(&idx) = by_number.get(&row.number) {
            out[idx] = row;
        } else {
            _ = by_number.insert(row.number.clone(), out.len());
            out.push(row);
        }
    }

    out
}

/// Error of a sheet transfer.
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// CSV reading or writing failed.
    #[display("CSV error: {_0}")]
    #[from]
    Csv(csv::Error),

    /// Sheet header doesn't match the expected one.
    #[display("sheet header doesn't match the expected one")]
    Header,

    /// Row carries a missing or invalid field.
    #[display("invalid `{name}` field on line {line}")]
    Field {
        /// Line the invalid field is on.
        line: u64,

        /// Name of the invalid field.
        name: &'static str,
    },

    /// Encoded sheet is not valid UTF-8.
    #[display("encoded sheet is not valid UTF-8")]
    NotUtf8,
}

#[cfg(test)]
mod spec {
    use crate::domain::case;

    use super::{decode, dedupe, encode, Row};

    fn row(number: &str, buyer: &str) -> Row {
        Row {
            number: case::Number::new(number).unwrap(),
            buyer: case::Party {
                name: case::PartyName::new(buyer).unwrap(),
                phone: case::Phone::new("0912345678"),
            },
            seller: case::Party {
                name: case::PartyName::new("李大華").unwrap(),
                phone: None,
            },
            city: case::City::new("台北市"),
            status: case::Status::Processing,
            tax_kind: case::TaxKind::General,
            notes: None,
        }
    }

    #[test]
    fn round_trips_case_numbers() {
        let rows =
            vec![row("114-0001", "王小明"), row("114-0002", "陳美玲")];

        let decoded = decode(&encode(&rows).unwrap()).unwrap();

        assert_eq!(
            decoded.iter().map(|r| r.number.clone()).collect::<Vec<_>>(),
            rows.iter().map(|r| r.number.clone()).collect::<Vec<_>>(),
        );
        assert_eq!(
            AsRef::<str>::as_ref(&decoded[0].buyer.name),
            "王小明",
        );
        assert_eq!(
            AsRef::<str>::as_ref(decoded[0].buyer.phone.as_ref().unwrap()),
            "0912345678",
        );
        assert_eq!(decoded[0].status, case::Status::Processing);
    }

    #[test]
    fn dedupes_by_number_keeping_last() {
        let rows = vec![
            row("114-0001", "王小明"),
            row("114-0002", "陳美玲"),
            row("114-0001", "林志強"),
        ];

        let deduped = dedupe(rows);

        assert_eq!(deduped.len(), 2);
        assert_eq!(AsRef::<str>::as_ref(&deduped[0].number), "114-0001");
        assert_eq!(
            AsRef::<str>::as_ref(&deduped[0].buyer.name),
            "林志強",
        );
        assert_eq!(AsRef::<str>::as_ref(&deduped[1].number), "114-0002");
    }

    #[test]
    fn rejects_foreign_header() {
        assert!(decode("a,b,c\n1,2,3").is_err());
    }

    #[test]
    fn rejects_invalid_status() {
        let rows = vec![row("114-0001", "王小明")];
        let csv = encode(&rows).unwrap().replace("PROCESSING", "WHATEVER");

        assert!(decode(&csv).is_err());
    }
}
