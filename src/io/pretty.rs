use std::io::{self, Write};

use crate::{
    common::timestamp,
    domain::{account::Account, entry::Entry, ledger::Ledger},
};

pub fn write_entry<W: Write>(out: &mut W, entry: &Entry) -> io::Result<()> {
    writeln!(out, "{} {}", timestamp::display(&entry.date), entry.store)?;
    writeln!(out, "\t\t{}: {} ${}", entry.exchange, entry.detail, entry.cost)?;
    writeln!(out, "\t\tBalance: ${}", entry.balance)?;
    if entry.has_address() {
        writeln!(out, "\t\tLocation: {}", entry.address)?;
    }
    Ok(())
}

/// Prints one account, oldest entry first.
pub fn write_account<W: Write>(out: &mut W, account: &Account) -> io::Result<()> {
    writeln!(out, "Account Name: {}", account.full_name)?;
    writeln!(out, "Account Number: {}", account.id())?;
    writeln!(out, "================================")?;
    for entry in account.entries() {
        write_entry(out, entry)?;
    }
    writeln!(out)
}

pub fn write_ledger<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    for account in ledger.accounts() {
        write_account(out, account)?;
    }
    Ok(())
}
