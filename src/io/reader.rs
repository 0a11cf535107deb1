use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ByteRecord;

use crate::{
    common::{
        error::{LedgerError, RecordError},
        logging::ActivityLog,
    },
    domain::{account::Account, entry::Entry},
    io::codec,
};

#[derive(serde::Deserialize)]
/// First line of a notebook: `<full name>:<identifier>`.
struct HeaderRow {
    full_name: String,
    id: String,
}

const HEADER_FIELDS: usize = 2;

/// A line that could not be decoded and was left out of the account.
#[derive(Debug)]
pub struct SkippedLine {
    pub line: u64,
    pub error: RecordError,
}

/// Result of loading one notebook: the account plus every line it skipped.
#[derive(Debug)]
pub struct LoadedAccount {
    pub account: Account,
    pub skipped: Vec<SkippedLine>,
}

/// Builds a CSV reader that understands the notebook layout: `:` separated,
/// no header row, no quoting, and records of varying length.
pub fn notebook_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr)
}

/// Opens and loads the notebook at `path`.
pub fn load(path: &Path, log: &ActivityLog) -> Result<LoadedAccount, LedgerError> {
    let file = File::open(path).map_err(|err| LedgerError::io(path, err))?;
    read_account(path, file, log)
}

/// Reads a notebook from any reader. `path` becomes the account's backing
/// file.
///
/// The header must be exactly `<full name>:<identifier>`; anything else fails
/// the whole load. Entry lines that do not decode are logged, collected in
/// [`LoadedAccount::skipped`] and otherwise ignored.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ledger_notebook::common::logging::ActivityLog;
/// use ledger_notebook::io::reader::read_account;
///
/// let data = "Jane Doe:1a2b3c\n\
/// 20240101T080000:—:—:Income:0.00:50.00\n\
/// garbage\n\
/// 20240102T080000:Store:Shopping:Expense:-19.00:31.00\n";
/// let loaded = read_account(Path::new("jane.lgr"), data.as_bytes(), &ActivityLog::silent()).unwrap();
///
/// assert_eq!(loaded.account.id(), "1a2b3c");
/// assert_eq!(loaded.account.entries().len(), 2);
/// assert_eq!(loaded.skipped.len(), 1);
/// ```
pub fn read_account<R: Read>(
    path: &Path,
    rdr: R,
    log: &ActivityLog,
) -> Result<LoadedAccount, LedgerError> {
    let mut rdr = notebook_reader(rdr);
    let mut records = rdr.byte_records();

    let header = match records.next() {
        Some(record) => record.map_err(|source| csv_error(path, source))?,
        None => {
            return Err(LedgerError::MalformedHeader {
                path: path.to_path_buf(),
                line: String::new(),
            });
        }
    };
    let malformed_header = || LedgerError::MalformedHeader {
        path: path.to_path_buf(),
        line: header
            .iter()
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(":"),
    };
    if header.len() != HEADER_FIELDS {
        return Err(malformed_header());
    }
    let HeaderRow { full_name, id } = header
        .deserialize::<HeaderRow>(None)
        .map_err(|_| malformed_header())?;

    let mut account = Account::new(id, full_name, path);
    let mut skipped = Vec::new();

    for record in records {
        let record = record.map_err(|source| csv_error(path, source))?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        match decode_record(&record) {
            Ok(entry) => account.push(entry),
            Err(error) => {
                log.record_skipped(path, line, &error.to_string());
                skipped.push(SkippedLine { line, error });
            }
        }
    }

    log.ledger_loaded(account.id(), path, account.entries().len(), skipped.len());
    Ok(LoadedAccount { account, skipped })
}

fn decode_record(record: &ByteRecord) -> Result<Entry, RecordError> {
    let fields = record
        .iter()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .map_err(|source| RecordError::Encoding { source })?;
    codec::decode_fields(&fields)
}

fn csv_error(path: &Path, source: csv::Error) -> LedgerError {
    LedgerError::Csv {
        path: PathBuf::from(path),
        source,
    }
}
