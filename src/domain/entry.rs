use std::{fmt, str::FromStr};

use crate::common::{error::RecordError, money::Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeKind {
    Income,
    Expense,
}

impl ExchangeKind {
    /// Classifies a signed cost: negative amounts are expenses, everything
    /// else (zero included) is income.
    pub fn for_cost(cost: Money) -> Self {
        if cost.is_negative() {
            ExchangeKind::Expense
        } else {
            ExchangeKind::Income
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeKind::Income => "Income",
            ExchangeKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(ExchangeKind::Income),
            "Expense" => Ok(ExchangeKind::Expense),
            other => Err(RecordError::ExchangeKind(other.to_string())),
        }
    }
}

/// One dated line of an account's notebook.
///
/// `balance` is the account balance after `cost` was applied. An empty
/// `address` means the entry was recorded without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: String,
    pub store: String,
    pub address: String,
    pub detail: String,
    pub exchange: ExchangeKind,
    pub cost: Money,
    pub balance: Money,
}

impl Entry {
    pub fn new(
        date: impl Into<String>,
        store: impl Into<String>,
        address: impl Into<String>,
        detail: impl Into<String>,
        exchange: ExchangeKind,
        cost: Money,
        balance: Money,
    ) -> Self {
        Self {
            date: date.into(),
            store: store.into(),
            address: address.into(),
            detail: detail.into(),
            exchange,
            cost,
            balance,
        }
    }

    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }
}
