use chrono::{Local, NaiveDateTime};

/// Layout of the date field in a ledger record, e.g. `20240305T090507`.
pub const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current local time as a record stamp. Every field is zero padded.
pub fn now() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

pub fn parse(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}

/// Human readable form used by the printer and the markdown export.
/// Stamps that do not parse are returned unchanged.
pub fn display(stamp: &str) -> String {
    match parse(stamp) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => stamp.to_string(),
    }
}
