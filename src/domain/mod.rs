pub mod account;
pub mod entry;
pub mod identifier;
pub mod ledger;
