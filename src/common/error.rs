use std::{path::PathBuf, str::Utf8Error};

use bigdecimal::ParseBigDecimalError;

use crate::common::money::Money;

/// Failure to decode (or encode) a single ledger record.
///
/// These are local to one line: a loader reports them and moves on.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("malformed entry: expected {expected} fields, found {found}: `{line}`")]
    FieldCount {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("malformed {field} amount `{value}`: {source}")]
    Amount {
        field: &'static str,
        value: String,
        #[source]
        source: ParseBigDecimalError,
    },
    #[error("balance {balance} plus cost {cost} is out of range")]
    BalanceOverflow { balance: Money, cost: Money },
    #[error("entry is not valid UTF-8: {source}")]
    Encoding {
        #[source]
        source: Utf8Error,
    },
    #[error("unknown exchange kind `{0}`; expected Income or Expense")]
    ExchangeKind(String),
    #[error("{field} must not contain `{ch}`: `{value}`")]
    ReservedCharacter {
        field: &'static str,
        ch: char,
        value: String,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("malformed ledger header in {}: `{line}`", .path.display())]
    MalformedHeader { path: PathBuf, line: String },
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("account {0} has no opening entry")]
    MissingOpeningEntry(String),
    #[error("account {id} already exists (backed by {})", .path.display())]
    DuplicateAccount { id: String, path: PathBuf },
    #[error("file error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("rejected entry: {0}")]
    Record(#[from] RecordError),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}\n\n{}", crate::app::USAGE)]
    Usage(String),
    #[error("input error: {0}")]
    Input(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
