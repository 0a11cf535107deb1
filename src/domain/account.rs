use std::path::{Path, PathBuf};

use crate::{
    common::money::Money,
    domain::entry::{Entry, ExchangeKind},
};

/// Store and detail text of the synthetic entry that opens every account.
pub const SEED_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: String,
    pub full_name: String,
    pub file_path: PathBuf,
    /// Append-only, oldest first.
    entries: Vec<Entry>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            file_path: file_path.into(),
            entries: Vec::new(),
        }
    }

    /// The zero-cost entry that carries an account's opening balance.
    pub fn seed_entry(date: impl Into<String>, initial_balance: Money) -> Entry {
        Entry::new(
            date,
            SEED_PLACEHOLDER,
            "",
            SEED_PLACEHOLDER,
            ExchangeKind::Income,
            Money::zero(),
            initial_balance,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn last_entry(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Balance after the newest entry, zero for an account with no entries.
    pub fn balance(&self) -> Money {
        self.last_entry().map(|e| e.balance).unwrap_or_default()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Checks the running balance chain: every entry's balance equals the
    /// previous balance plus its cost.
    pub fn balances_consistent(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].balance.checked_add(pair[1].cost) == Some(pair[1].balance))
    }
}
