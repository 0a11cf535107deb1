use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

use crate::common::error::LedgerError;

/// Header line of a notebook file.
pub fn header_line(full_name: &str, id: &str) -> String {
    format!("{full_name}:{id}")
}

/// Appends `line` and a newline to the notebook at `path`, creating the file
/// if it does not exist. Existing content is never truncated.
pub fn append_line(path: &Path, line: &str) -> Result<(), LedgerError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| LedgerError::io(path, err))?;

    let record = format!("{line}\n");
    file.write_all(record.as_bytes())
        .map_err(|err| LedgerError::io(path, err))?;
    file.flush().map_err(|err| LedgerError::io(path, err))
}

/// Replaces whatever is at `path` with a new notebook holding the header and
/// the seed entry.
///
/// Destructive: an existing file at `path` is removed first.
pub fn create_fresh(path: &Path, header: &str, seed: &str) -> Result<(), LedgerError> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(LedgerError::io(path, err)),
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| LedgerError::io(path, err))?;
    let mut wtr = BufWriter::new(file);

    writeln!(wtr, "{header}").map_err(|err| LedgerError::io(path, err))?;
    writeln!(wtr, "{seed}").map_err(|err| LedgerError::io(path, err))?;
    wtr.flush().map_err(|err| LedgerError::io(path, err))
}
