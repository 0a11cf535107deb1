//! Flat-file ledger notebooks: one colon-delimited file per account with
//! dated income/expense entries and running balances.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;

pub use common::error::{AppError, LedgerError, RecordError};
pub use common::money::Money;
pub use domain::{
    account::Account,
    entry::{Entry, ExchangeKind},
    ledger::{Ledger, LoadReport},
};
