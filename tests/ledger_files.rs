use std::fs;
use std::path::Path;

use ledger_notebook::{
    common::logging::ActivityLog,
    io::{codec, markdown},
    ExchangeKind, Ledger, LedgerError, Money, RecordError,
};

fn ledger() -> Ledger {
    Ledger::new(ActivityLog::silent())
}

fn cents(value: i64) -> Money {
    Money::from_cents(value)
}

// Checks the running balance rule over a whole entry sequence.
fn assert_balance_chain(ledger: &Ledger, id: &str) {
    let entries = ledger.lookup(id).expect("account exists").entries();
    assert_eq!(entries[0].cost, Money::zero(), "seed entry must cost nothing");
    for pair in entries.windows(2) {
        assert_eq!(pair[1].balance, pair[0].balance + pair[1].cost);
    }
}

#[test]
fn loads_fixture_notebook_in_file_order() {
    let mut ledger = ledger();
    let reports = ledger.load(["tests/fixtures/jane-doe.lgr"]).unwrap();

    assert_eq!(reports.len(), 1);
    assert!(reports[0].skipped.is_empty());

    let account = ledger.lookup("9f3a1c77d2e04b18").expect("account loaded");
    assert_eq!(account.full_name, "Jane Doe");
    assert_eq!(account.entries().len(), 4);
    assert_eq!(account.entries()[2].address, "1 Work Rd");
    assert_eq!(account.balance(), cents(132775));
    assert_balance_chain(&ledger, "9f3a1c77d2e04b18");
}

#[test]
fn loading_twice_gives_identical_accounts() {
    let mut first = ledger();
    let mut second = ledger();
    first.load(["tests/fixtures/jane-doe.lgr"]).unwrap();
    second.load(["tests/fixtures/jane-doe.lgr"]).unwrap();

    let a = first.lookup("9f3a1c77d2e04b18").unwrap();
    let b = second.lookup("9f3a1c77d2e04b18").unwrap();
    assert_eq!(a.entries(), b.entries());
}

#[test]
fn one_corrupted_line_is_reported_once() {
    let mut ledger = ledger();
    let reports = ledger.load(["tests/fixtures/corrupted.lgr"]).unwrap();

    assert_eq!(reports[0].skipped.len(), 1);
    assert_eq!(reports[0].skipped[0].line, 4);
    assert_eq!(ledger.lookup("00c0ffee00").unwrap().entries().len(), 3);
}

#[test]
fn line_with_invalid_utf8_is_skipped() {
    let mut ledger = ledger();
    let reports = ledger.load(["tests/fixtures/bad-utf8.lgr"]).unwrap();

    assert_eq!(reports[0].skipped.len(), 1);
    assert_eq!(reports[0].skipped[0].line, 3);
    assert!(matches!(reports[0].skipped[0].error, RecordError::Encoding { .. }));

    let account = ledger.lookup("badbytes01").unwrap();
    assert_eq!(account.entries().len(), 2);
    assert_eq!(account.balance(), cents(51000));
}

#[test]
fn malformed_header_aborts_the_load() {
    let mut ledger = ledger();
    let err = ledger.load(["tests/fixtures/bad-header.lgr"]).unwrap_err();

    assert!(matches!(err, LedgerError::MalformedHeader { .. }));
    assert!(ledger.is_empty());
}

#[test]
fn every_fixture_line_round_trips_through_the_codec() {
    let contents = fs::read_to_string("tests/fixtures/jane-doe.lgr").unwrap();
    for line in contents.lines().skip(1) {
        let entry = codec::decode(line).unwrap();
        assert_eq!(codec::encode(&entry), line);
    }
}

#[test]
fn create_account_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.lgr");
    let mut ledger = ledger();

    let id = ledger.create_account("Jane Doe", &path, cents(5000)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(format!("Jane Doe:{id}").as_str()));
    let seed = codec::decode(lines.next().unwrap()).unwrap();
    assert_eq!(seed.cost, cents(0));
    assert_eq!(seed.balance, cents(5000));
    assert_eq!(lines.next(), None);
}

#[test]
fn add_entry_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.lgr");
    let mut ledger = ledger();
    let id = ledger.create_account("Jane Doe", &path, cents(10000)).unwrap();

    let entry = ledger.add_entry(&id, "Store", "", "Shopping", cents(-1900)).unwrap();

    assert_eq!(entry.store, "Store");
    assert_eq!(entry.address, "");
    assert_eq!(entry.detail, "Shopping");
    assert_eq!(entry.exchange, ExchangeKind::Expense);
    assert_eq!(entry.cost, cents(-1900));
    assert_eq!(entry.balance, cents(8100));

    let contents = fs::read_to_string(&path).unwrap();
    let last = contents.lines().last().unwrap();
    assert_eq!(last, format!("{}:Store:Shopping:Expense:-19.00:81.00", entry.date));
    assert_eq!(entry.date.len(), 15);
}

#[test]
fn unknown_account_leaves_everything_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.lgr");
    let mut ledger = ledger();
    let id = ledger.create_account("Jane Doe", &path, cents(100)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = ledger.add_entry("feedface", "Store", "", "Shopping", cents(-1)).unwrap_err();

    assert!(matches!(err, LedgerError::AccountNotFound(_)));
    assert!(!ledger.is_valid("feedface"));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.lookup(&id).unwrap().entries().len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn appended_entries_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.lgr");

    let mut writer = ledger();
    let id = writer.create_account("Jane Doe", &path, cents(2000)).unwrap();
    for (store, address, cost) in [("Bakery", "", -450), ("Payroll", "HQ", 120000), ("Garage", "Ring Rd", -8999)] {
        writer.add_entry(&id, store, address, "misc", cents(cost)).unwrap();
    }

    let mut reader = ledger();
    reader.load([&path]).unwrap();

    assert_eq!(reader.lookup(&id), writer.lookup(&id));
    assert_eq!(reader.lookup(&id).unwrap().balance(), cents(112551));
    assert_balance_chain(&reader, &id);
}

#[test]
fn exported_table_follows_stored_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("jane.md");
    let mut ledger = ledger();
    ledger.load(["tests/fixtures/jane-doe.lgr"]).unwrap();

    let account = ledger.account_by_path(Path::new("tests/fixtures/jane-doe.lgr")).unwrap();
    markdown::export_table(&out, account).unwrap();

    let table = fs::read_to_string(&out).unwrap();
    let rows: Vec<&str> = table.lines().skip(4).collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("|2024/01/01 08:00:00|"));
    assert_eq!(rows[2], "|2024/01/03 17:00:00|Employer<br>*@1 Work Rd*|Salary|1250.50|1331.50|");
    assert!(rows[3].starts_with("|2024/01/05 07:15:02|Cafe<br>*@Main St*|"));
}
