//! QSL received checks.
//!
//! Each confirmation service leaves its own fields in exported records.
//! These helpers look at those fields; they do not contact any service.

use crate::record::Record;

/// A way a contact can be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QslSource {
    /// Paper card or any confirmation recorded in `QSL_RCVD`.
    Card,
    ClubLog,
    Eqsl,
    Lotw,
    Qrz,
}

impl QslSource {
    pub const ALL: [QslSource; 5] = [Self::Card, Self::ClubLog, Self::Eqsl, Self::Lotw, Self::Qrz];

    /// True if `record` shows a confirmation through this source.
    pub fn confirmed(self, record: &Record) -> bool {
        match self {
            Self::Card => matches!(record.get("QSL_RCVD"), "Y" | "V"),
            Self::ClubLog => clublog_rcvd(record),
            Self::Eqsl => eqsl_rcvd(record),
            Self::Lotw => lotw_rcvd(record),
            Self::Qrz => qrz_rcvd(record),
        }
    }
}

fn any_present(record: &Record, names: &[&str]) -> bool {
    names.iter().any(|name| !record.get(name).is_empty())
}

/// Club Log: `APP_MASTERLOG_CLUBLOG_QSL` of `Y`/`V`, or a received date.
pub fn clublog_rcvd(record: &Record) -> bool {
    matches!(record.get("APP_MASTERLOG_CLUBLOG_QSL"), "Y" | "V")
        || any_present(record, &["APP_MASTERLOG_CLUBLOG_QSLRDATE"])
}

/// eQSL.cc: `EQSL_QSL_RCVD` of `Y`, or a received date.
pub fn eqsl_rcvd(record: &Record) -> bool {
    record.get("EQSL_QSL_RCVD") == "Y" || any_present(record, &["EQSL_QSLRDATE"])
}

/// Logbook of the World: `LOTW_QSL_RCVD` of `Y`, or any LoTW
/// confirmation detail field.
pub fn lotw_rcvd(record: &Record) -> bool {
    record.get("LOTW_QSL_RCVD") == "Y"
        || any_present(record, &["APP_LOTW_2XQSL", "APP_LOTW_QSLMODE", "APP_LOTW_RXQSL"])
}

/// QRZ.com: `APP_QRZLOG_STATUS` of `C` (confirmed).
pub fn qrz_rcvd(record: &Record) -> bool {
    record.get("APP_QRZLOG_STATUS") == "C"
}

/// True if the contact is confirmed by any means.
pub fn qsl_rcvd(record: &Record) -> bool {
    QslSource::ALL.iter().any(|source| source.confirmed(record))
}

/// Every source that confirmed the contact.
pub fn qsl_sources(record: &Record) -> Vec<QslSource> {
    QslSource::ALL.into_iter().filter(|source| source.confirmed(record)).collect()
}
