//! Text form of a single ledger entry.
//!
//! ```text
//! <date>:<store>[@<address>]:<detail>:<exchange>:<cost>:<balance>
//! ```
//!
//! The `@<address>` part is left out when an entry has no address. Amounts
//! are written with two decimal places.

use std::str::FromStr;

use crate::{
    common::{error::RecordError, money::Money},
    domain::entry::{Entry, ExchangeKind},
};

pub const FIELD_DELIMITER: char = ':';
pub const ADDRESS_DELIMITER: char = '@';
/// Number of `:` separated fields in an entry line.
pub const ENTRY_FIELDS: usize = 6;

const DATE: usize = 0;
const LOCATION: usize = 1;
const DETAIL: usize = 2;
const EXCHANGE: usize = 3;
const COST: usize = 4;
const BALANCE: usize = 5;

/// Serializes an entry to its record line (no trailing newline).
///
/// # Examples
/// ```
/// use ledger_notebook::common::money::Money;
/// use ledger_notebook::domain::entry::{Entry, ExchangeKind};
/// use ledger_notebook::io::codec::encode;
///
/// let entry = Entry::new(
///     "20240305T090507", "Store", "", "Shopping",
///     ExchangeKind::Expense, Money::from_cents(-1900), Money::from_cents(8100),
/// );
/// assert_eq!(encode(&entry), "20240305T090507:Store:Shopping:Expense:-19.00:81.00");
/// ```
pub fn encode(entry: &Entry) -> String {
    let location = if entry.has_address() {
        format!("{}{ADDRESS_DELIMITER}{}", entry.store, entry.address)
    } else {
        entry.store.clone()
    };

    format!(
        "{}:{}:{}:{}:{}:{}",
        entry.date,
        location,
        entry.detail,
        entry.exchange,
        entry.cost.to_string_2dp(),
        entry.balance.to_string_2dp()
    )
}

/// Parses one record line back into an entry.
///
/// # Errors
/// - `RecordError::FieldCount` when the line does not split into six fields.
/// - `RecordError::Amount` when cost or balance is not a decimal number.
/// - `RecordError::ExchangeKind` for anything other than `Income`/`Expense`.
pub fn decode(line: &str) -> Result<Entry, RecordError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    decode_fields(&fields).map_err(|err| match err {
        RecordError::FieldCount { expected, found, .. } => RecordError::FieldCount {
            expected,
            found,
            line: line.to_string(),
        },
        other => other,
    })
}

/// Same as [`decode`] for a line that has already been split on `:`.
pub fn decode_fields(fields: &[&str]) -> Result<Entry, RecordError> {
    if fields.len() != ENTRY_FIELDS {
        return Err(RecordError::FieldCount {
            expected: ENTRY_FIELDS,
            found: fields.len(),
            line: fields.join(":"),
        });
    }

    // Store-only locations carry no `@` and decode with an empty address.
    let (store, address) = fields[LOCATION]
        .split_once(ADDRESS_DELIMITER)
        .unwrap_or((fields[LOCATION], ""));

    let exchange = ExchangeKind::from_str(fields[EXCHANGE])?;
    let cost = parse_amount("cost", fields[COST])?;
    let balance = parse_amount("balance", fields[BALANCE])?;

    Ok(Entry::new(
        fields[DATE],
        store,
        address,
        fields[DETAIL],
        exchange,
        cost,
        balance,
    ))
}

/// Rejects text that would change the shape of an encoded line.
pub fn validate_text(
    field: &'static str,
    value: &str,
    reserved: &[char],
) -> Result<(), RecordError> {
    match value.chars().find(|c| reserved.contains(c) || *c == '\n' || *c == '\r') {
        Some(ch) => Err(RecordError::ReservedCharacter {
            field,
            ch,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn parse_amount(field: &'static str, value: &str) -> Result<Money, RecordError> {
    Money::from_str(value).map_err(|source| RecordError::Amount {
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(address: &str) -> Entry {
        Entry::new(
            "20240305T090507",
            "Corner Shop",
            address,
            "Groceries",
            ExchangeKind::Expense,
            Money::from_cents(-1234),
            Money::from_cents(8766),
        )
    }

    #[test]
    fn encodes_with_and_without_address() {
        assert_eq!(
            encode(&sample("12 Main St")),
            "20240305T090507:Corner Shop@12 Main St:Groceries:Expense:-12.34:87.66"
        );
        assert_eq!(
            encode(&sample("")),
            "20240305T090507:Corner Shop:Groceries:Expense:-12.34:87.66"
        );
    }

    #[test]
    fn decode_restores_encoded_entries() {
        for entry in [sample("12 Main St"), sample("")] {
            assert_eq!(decode(&encode(&entry)).unwrap(), entry);
        }
    }

    #[test]
    fn decodes_store_only_location_with_empty_address() {
        let entry = decode("20240101T120000:Payroll:Salary:Income:1500.00:1600.00").unwrap();
        assert_eq!(entry.store, "Payroll");
        assert_eq!(entry.address, "");
        assert_eq!(entry.exchange, ExchangeKind::Income);
        assert_eq!(entry.cost, Money::from_cents(150000));
        assert_eq!(entry.balance, Money::from_cents(160000));
    }

    #[test]
    fn address_keeps_everything_after_first_at() {
        let entry = decode("20240101T120000:Shop@Unit 4@Mall:Gift:Expense:-5.00:95.00").unwrap();
        assert_eq!(entry.store, "Shop");
        assert_eq!(entry.address, "Unit 4@Mall");
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = decode("20240101T120000:Shop:Expense:-5.00:95.00").unwrap_err();
        assert!(matches!(
            err,
            RecordError::FieldCount { expected: 6, found: 5, ref line }
                if line == "20240101T120000:Shop:Expense:-5.00:95.00"
        ));

        let err = decode("20240101T120000:Shop:Gift:note:Expense:-5.00:95.00").unwrap_err();
        assert!(matches!(err, RecordError::FieldCount { found: 7, .. }));
    }

    #[test]
    fn rejects_unparseable_amounts() {
        let err = decode("20240101T120000:Shop:Gift:Expense:five:95.00").unwrap_err();
        assert!(matches!(err, RecordError::Amount { field: "cost", .. }));

        let err = decode("20240101T120000:Shop:Gift:Expense:-5.00:").unwrap_err();
        assert!(matches!(err, RecordError::Amount { field: "balance", .. }));
    }

    #[test]
    fn rejects_exponent_amounts_quickly() {
        let err = decode("20240101T080000:S:d:Income:1e100000000:1.00").unwrap_err();
        assert!(matches!(err, RecordError::Amount { field: "cost", ref value, .. } if value == "1e100000000"));

        let err = decode("20240101T080000:S:d:Income:1.00:5E-3").unwrap_err();
        assert!(matches!(err, RecordError::Amount { field: "balance", .. }));
    }

    #[test]
    fn rejects_unknown_exchange_kind() {
        let err = decode("20240101T120000:Shop:Gift:Refund:-5.00:95.00").unwrap_err();
        assert!(matches!(err, RecordError::ExchangeKind(ref kind) if kind == "Refund"));
    }

    #[test]
    fn validate_text_flags_reserved_characters() {
        assert!(validate_text("detail", "Lunch", &[':']).is_ok());
        assert!(matches!(
            validate_text("store", "Shop@Mall", &[':', '@']),
            Err(RecordError::ReservedCharacter { field: "store", ch: '@', .. })
        ));
        assert!(validate_text("detail", "two\nlines", &[':']).is_err());
    }
}
