use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    common::{error::LedgerError, timestamp},
    domain::{account::Account, entry::Entry, ledger::Ledger},
};

#[derive(serde::Serialize)]
/// One table row. The empty `open`/`close` cells produce the leading and
/// trailing pipes of a markdown row.
struct TableRow {
    open: &'static str,
    date: String,
    transfer_to: String,
    description: String,
    cost: String,
    balance: String,
    close: &'static str,
}

impl From<&Entry> for TableRow {
    fn from(entry: &Entry) -> Self {
        let mut transfer_to = escape(&entry.store);
        if entry.has_address() {
            transfer_to.push_str(&format!("<br>*@{}*", escape(&entry.address)));
        }

        Self {
            open: "",
            date: timestamp::display(&entry.date),
            transfer_to,
            description: escape(&entry.detail),
            cost: entry.cost.to_string_2dp(),
            balance: entry.balance.to_string_2dp(),
            close: "",
        }
    }
}

const COLUMNS: [&str; 7] = ["", " Date ", " Transfer To ", " Description ", " Cost ", " Balance ", ""];
const RULE: [&str; 7] = ["", "---", "---", "---", "---", "---", ""];

/// Writes an account as a markdown table, oldest entry first.
///
/// ```text
/// ##### Account Name: Jane Doe
/// ##### Account Number: 1a2b3c
/// | Date | Transfer To | Description | Cost | Balance |
/// |---|---|---|---|---|
/// |2024/01/02 08:00:00|Store<br>*@1 High St*|Shopping|-19.00|31.00|
/// ```
///
/// # Errors
///
/// Returns a `csv::Error` if writing any line fails.
pub fn write_table<W: Write>(mut writer: W, account: &Account) -> Result<(), csv::Error> {
    writeln!(writer, "##### Account Name: {}", account.full_name)?;
    writeln!(writer, "##### Account Number: {}", account.id())?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    wtr.write_record(RULE)?;
    for entry in account.entries() {
        wtr.serialize(TableRow::from(entry))?;
    }

    wtr.flush()?;
    Ok(())
}

/// `<identifier>.md`, the export name used when the caller gives none.
pub fn default_table_path(account: &Account) -> PathBuf {
    PathBuf::from(format!("{}.md", account.id()))
}

/// Adds the `.md` extension unless `name` already has it.
pub fn table_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    match path.extension() {
        Some(ext) if ext == "md" => path,
        _ => PathBuf::from(format!("{name}.md")),
    }
}

/// Exports `account` to `path`, replacing any existing file.
pub fn export_table(path: &Path, account: &Account) -> Result<(), LedgerError> {
    let file = File::create(path).map_err(|err| LedgerError::io(path, err))?;
    write_table(file, account).map_err(|source| LedgerError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes one `<identifier>.md` table per account into `dir`. Returns the
/// files written, in identifier order.
pub fn export_all(ledger: &Ledger, dir: &Path) -> Result<Vec<PathBuf>, LedgerError> {
    ledger
        .accounts()
        .map(|account| {
            let path = dir.join(default_table_path(account));
            export_table(&path, account).map(|()| path)
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
