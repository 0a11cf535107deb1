use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    common::{
        error::{LedgerError, RecordError},
        logging::ActivityLog,
        money::Money,
        timestamp,
    },
    domain::{
        account::Account,
        entry::{Entry, ExchangeKind},
        identifier::generate_id,
    },
    io::{
        codec::{self, ADDRESS_DELIMITER, FIELD_DELIMITER},
        reader::{self, LoadedAccount, SkippedLine},
        writer,
    },
};

/// What loading one notebook produced besides the account itself.
#[derive(Debug)]
pub struct LoadReport {
    pub id: String,
    pub path: PathBuf,
    pub skipped: Vec<SkippedLine>,
}

/// Every account known to one run, keyed by identifier.
///
/// The ledger is the only place balances are computed. Each account is backed
/// by its notebook file, and every change is written there before it is
/// applied in memory.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
    log: ActivityLog,
}

impl Ledger {
    pub fn new(log: ActivityLog) -> Self {
        Self {
            accounts: BTreeMap::new(),
            log,
        }
    }

    /// Accounts in identifier order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn is_valid(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// The account whose notebook lives at `path`.
    pub fn account_by_path(&self, path: &Path) -> Option<&Account> {
        self.accounts().find(|account| account.path() == path)
    }

    /// Opens a new account and writes its notebook.
    ///
    /// Any file already at `file_path` is replaced. The notebook gets the
    /// `<full name>:<identifier>` header and a seed entry carrying
    /// `initial_balance`. Returns the new identifier.
    pub fn create_account(
        &mut self,
        full_name: &str,
        file_path: impl AsRef<Path>,
        initial_balance: Money,
    ) -> Result<String, LedgerError> {
        self.create_account_at(full_name, file_path.as_ref(), initial_balance, timestamp::now())
    }

    fn create_account_at(
        &mut self,
        full_name: &str,
        file_path: &Path,
        initial_balance: Money,
        created: String,
    ) -> Result<String, LedgerError> {
        codec::validate_text("full name", full_name, &[FIELD_DELIMITER])?;

        let id = generate_id(full_name, initial_balance, &created);
        if let Some(existing) = self.accounts.get(&id) {
            return Err(LedgerError::DuplicateAccount {
                id,
                path: existing.file_path.clone(),
            });
        }

        let seed = Account::seed_entry(created, initial_balance);
        writer::create_fresh(
            file_path,
            &writer::header_line(full_name, &id),
            &codec::encode(&seed),
        )?;

        let mut account = Account::new(id.clone(), full_name, file_path);
        account.push(seed);
        self.log.account_created(full_name, &id, file_path);
        self.accounts.insert(id.clone(), account);

        Ok(id)
    }

    /// Records a new entry on account `id` and appends it to the notebook.
    ///
    /// The balance is the previous balance plus `cost`; a negative cost is an
    /// expense. An account without its opening entry, or a balance that would
    /// leave the `Money` range, is refused before anything is written. If the
    /// file append fails the account is left unchanged.
    pub fn add_entry(
        &mut self,
        id: &str,
        store: &str,
        address: &str,
        detail: &str,
        cost: Money,
    ) -> Result<Entry, LedgerError> {
        self.add_entry_at(id, store, address, detail, cost, timestamp::now())
    }

    fn add_entry_at(
        &mut self,
        id: &str,
        store: &str,
        address: &str,
        detail: &str,
        cost: Money,
        date: String,
    ) -> Result<Entry, LedgerError> {
        let account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;

        codec::validate_text("store", store, &[FIELD_DELIMITER, ADDRESS_DELIMITER])?;
        codec::validate_text("address", address, &[FIELD_DELIMITER])?;
        codec::validate_text("detail", detail, &[FIELD_DELIMITER])?;

        let previous = account
            .last_entry()
            .map(|last| last.balance)
            .ok_or_else(|| LedgerError::MissingOpeningEntry(id.to_string()))?;
        let balance = previous
            .checked_add(cost)
            .ok_or(RecordError::BalanceOverflow {
                balance: previous,
                cost,
            })?;

        let entry = Entry::new(
            date,
            store,
            address,
            detail,
            ExchangeKind::for_cost(cost),
            cost,
            balance,
        );
        let line = codec::encode(&entry);

        writer::append_line(account.path(), &line)?;
        self.log.entry_added(&account.full_name, &line);
        account.push(entry.clone());

        Ok(entry)
    }

    /// Loads every notebook in `paths`, in order.
    ///
    /// Undecodable entry lines are skipped and listed in the returned reports.
    /// A malformed header or an I/O failure stops the batch; notebooks loaded
    /// before it stay in the ledger.
    pub fn load<I, P>(&mut self, paths: I) -> Result<Vec<LoadReport>, LedgerError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut reports = Vec::new();
        for path in paths {
            let loaded = reader::load(path.as_ref(), &self.log)?;
            reports.push(self.insert_loaded(loaded));
        }
        Ok(reports)
    }

    /// Adds an already read notebook. An account with the same identifier is
    /// replaced.
    pub fn insert_loaded(&mut self, loaded: LoadedAccount) -> LoadReport {
        let LoadedAccount { account, skipped } = loaded;
        let report = LoadReport {
            id: account.id().to_string(),
            path: account.file_path.clone(),
            skipped,
        };

        if self.accounts.contains_key(account.id()) {
            self.log.account_replaced(account.id(), account.path());
        }
        self.accounts.insert(report.id.clone(), account);

        report
    }
}
