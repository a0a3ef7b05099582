//! QSO matching: do two records describe the same contact?
//!
//! Two logs of the same contact rarely agree byte for byte. A match needs
//! the same call sign and band, compatible modes, and start times that fall
//! on the same day within a configurable window.
//!
//! ```
//! use adif_core::{Matcher, Record};
//!
//! let mine: Record = [
//!     ("CALL", "W1AW"), ("BAND", "20m"), ("MODE", "PSK"), ("SUBMODE", "PSK31"),
//!     ("QSO_DATE", "20230101"), ("TIME_ON", "1200"),
//! ].into_iter().collect();
//! let theirs: Record = [
//!     ("CALL", "w1aw"), ("BAND", "20M"), ("MODE", "PSK31"),
//!     ("QSO_DATE", "20230101"), ("TIME_ON", "120130"),
//! ].into_iter().collect();
//!
//! assert!(Matcher::default().matches(&mine, &theirs));
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use crate::record::Record;

/// Fields a record needs before it can be compared with another.
pub const MINIMUM_FIELDS: [&str; 5] = ["CALL", "BAND", "MODE", "QSO_DATE", "TIME_ON"];

/// Matching configuration.
///
/// # Example
///
/// ```
/// use adif_core::MatchConfig;
///
/// let strict = MatchConfig::default().with_max_seconds(60);
/// assert_eq!(strict.max_seconds, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Largest start time difference, in seconds, still considered the same
    /// contact.
    ///
    /// Default: 900 (15 minutes).
    pub max_seconds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_seconds: 900 }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_seconds(mut self, max_seconds: u32) -> Self {
        self.max_seconds = max_seconds;
        self
    }
}

/// Decides whether two records are the same contact, and merges them.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// True if both records are viable and agree on call, band, mode and
    /// time. Checks run in that order and stop at the first mismatch.
    pub fn matches(&self, a: &Record, b: &Record) -> bool {
        if !minimum_viable(a) {
            debug!("record 1 lacks the minimum QSO fields");
            return false;
        }
        if !minimum_viable(b) {
            debug!("record 2 lacks the minimum QSO fields");
            return false;
        }
        if !same_field(a, b, "CALL") || !same_field(a, b, "BAND") {
            return false;
        }
        mode_match(a, b) && self.time_match(a, b)
    }

    /// True if both start times fall on the same calendar day and are at
    /// most `max_seconds` apart.
    ///
    /// This rejects contacts straddling midnight even when they are only
    /// seconds apart. Unparseable dates or times never match.
    pub fn time_match(&self, a: &Record, b: &Record) -> bool {
        let (Some(start_a), Some(start_b)) = (qso_start(a), qso_start(b)) else {
            debug!(
                "unparseable start time: {:?} {:?} vs {:?} {:?}",
                a.get("QSO_DATE"),
                a.get("TIME_ON"),
                b.get("QSO_DATE"),
                b.get("TIME_ON")
            );
            return false;
        };
        if start_a.date() != start_b.date() {
            return false;
        }
        (start_a - start_b).num_seconds().abs() <= i64::from(self.config.max_seconds)
    }
}

/// True if the record has every field in [`MINIMUM_FIELDS`].
pub fn minimum_viable(record: &Record) -> bool {
    MINIMUM_FIELDS.iter().all(|name| record.contains(name))
}

/// True if the modes of two records are compatible.
///
/// Equal primary modes match unless both records carry a submode and the
/// submodes differ. A primary mode equal to the other record's submode also
/// matches (`PSK31` against `PSK`/`PSK31`). Empty primary modes never match.
pub fn mode_match(a: &Record, b: &Record) -> bool {
    let mode_a = a.get("MODE").to_uppercase();
    let mode_b = b.get("MODE").to_uppercase();
    if mode_a.is_empty() || mode_b.is_empty() {
        return false;
    }
    let sub_a = a.get("SUBMODE").to_uppercase();
    let sub_b = b.get("SUBMODE").to_uppercase();

    if mode_a == mode_b {
        sub_a.is_empty() || sub_b.is_empty() || sub_a == sub_b
    } else {
        mode_a == sub_b || mode_b == sub_a
    }
}

/// `QSO_DATE` (YYYYMMDD) plus `TIME_ON` (HHMM or HHMMSS) as a date-time.
fn qso_start(record: &Record) -> Option<NaiveDateTime> {
    let date = record.get("QSO_DATE");
    let time = record.get("TIME_ON");

    let date = NaiveDate::from_ymd_opt(
        number(date, 0..4)?,
        number(date, 4..6)?,
        number(date, 6..8)?,
    )?;
    // HHMM or HHMMSS; a lone fifth digit makes the whole time invalid
    let seconds = if time.len() > 4 { number(time, 4..6)? } else { 0 };
    let time = NaiveTime::from_hms_opt(number(time, 0..2)?, number(time, 2..4)?, seconds)?;

    Some(date.and_time(time))
}

fn number<T: std::str::FromStr>(s: &str, range: std::ops::Range<usize>) -> Option<T> {
    let digits = s.get(range)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Case-insensitive comparison of one field across two records.
fn same_field(a: &Record, b: &Record, name: &str) -> bool {
    a.get(name).to_uppercase() == b.get(name).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qso(fields: &[(&str, &str)]) -> Record {
        let mut record: Record = [
            ("CALL", "K1ABC"),
            ("BAND", "20m"),
            ("MODE", "SSB"),
            ("QSO_DATE", "20230101"),
            ("TIME_ON", "235000"),
        ]
        .into_iter()
        .collect();
        record.extend(fields.iter().copied());
        record
    }

    #[test]
    fn test_minimum_viable() {
        assert!(minimum_viable(&qso(&[])));
        let mut record = qso(&[]);
        record.remove("TIME_ON");
        assert!(!minimum_viable(&record));
        assert!(!minimum_viable(&Record::new()));
    }

    #[test]
    fn test_identical_records_match() {
        assert!(Matcher::default().matches(&qso(&[]), &qso(&[])));
    }

    #[test]
    fn test_not_viable_never_matches() {
        let mut partial = qso(&[]);
        partial.remove("BAND");
        let matcher = Matcher::default();
        assert!(!matcher.matches(&partial, &qso(&[])));
        assert!(!matcher.matches(&qso(&[]), &partial));
    }

    #[test]
    fn test_call_and_band_case_insensitive() {
        let a = qso(&[("CALL", "k1abc"), ("BAND", "20M")]);
        assert!(Matcher::default().matches(&a, &qso(&[])));
    }

    #[test]
    fn test_different_call_or_band() {
        let matcher = Matcher::default();
        assert!(!matcher.matches(&qso(&[("CALL", "K1ABD")]), &qso(&[])));
        assert!(!matcher.matches(&qso(&[("BAND", "40m")]), &qso(&[])));
    }

    #[test]
    fn test_mode_submode_wildcard() {
        let a = qso(&[("MODE", "PSK"), ("SUBMODE", "PSK31")]);
        let b = qso(&[("MODE", "psk")]);
        assert!(mode_match(&a, &b));
        assert!(mode_match(&b, &a));
    }

    #[test]
    fn test_mode_submodes_differ() {
        let a = qso(&[("MODE", "PSK"), ("SUBMODE", "PSK31")]);
        let b = qso(&[("MODE", "PSK"), ("SUBMODE", "PSK63")]);
        assert!(!mode_match(&a, &b));
    }

    #[test]
    fn test_mode_cross_match() {
        let a = qso(&[("MODE", "PSK"), ("SUBMODE", "PSK31")]);
        let b = qso(&[("MODE", "PSK31")]);
        assert!(mode_match(&a, &b));
        assert!(mode_match(&b, &a));
    }

    #[test]
    fn test_mode_empty_never_matches() {
        let a = qso(&[("MODE", "")]);
        assert!(!mode_match(&a, &a));
        assert!(!mode_match(&a, &qso(&[])));
    }

    #[test]
    fn test_mode_mismatch() {
        assert!(!mode_match(&qso(&[("MODE", "CW")]), &qso(&[])));
    }

    #[test]
    fn test_time_window_boundary() {
        let matcher = Matcher::default();
        let a = qso(&[("TIME_ON", "231500")]);
        assert!(matcher.matches(&a, &qso(&[("TIME_ON", "233000")])));
        assert!(!matcher.matches(&a, &qso(&[("TIME_ON", "233001")])));
        // 541 seconds is well inside the default window
        assert!(matcher.matches(&qso(&[]), &qso(&[("TIME_ON", "235901")])));
    }

    #[test]
    fn test_time_without_seconds() {
        let matcher = Matcher::default();
        let a = qso(&[("TIME_ON", "1200")]);
        let b = qso(&[("TIME_ON", "121500")]);
        assert!(matcher.time_match(&a, &b));
        assert!(!matcher.time_match(&a, &qso(&[("TIME_ON", "1216")])));
    }

    #[test]
    fn test_time_across_midnight_rejected() {
        let matcher = Matcher::default();
        let late = qso(&[("QSO_DATE", "20230101"), ("TIME_ON", "235930")]);
        let early = qso(&[("QSO_DATE", "20230102"), ("TIME_ON", "000030")]);
        assert!(!matcher.time_match(&late, &early));
    }

    #[test]
    fn test_custom_window() {
        let matcher = Matcher::new(MatchConfig::new().with_max_seconds(30));
        let a = qso(&[("TIME_ON", "120000")]);
        assert!(matcher.time_match(&a, &qso(&[("TIME_ON", "120030")])));
        assert!(!matcher.time_match(&a, &qso(&[("TIME_ON", "120031")])));
    }

    #[test]
    fn test_unparseable_time() {
        let matcher = Matcher::default();
        assert!(!matcher.time_match(&qso(&[("TIME_ON", "12")]), &qso(&[])));
        assert!(!matcher.time_match(&qso(&[("QSO_DATE", "2023-01-01")]), &qso(&[])));
        assert!(!matcher.time_match(&qso(&[("QSO_DATE", "20231301")]), &qso(&[])));
        assert!(!matcher.time_match(&qso(&[("TIME_ON", "2500")]), &qso(&[])));
    }

    #[test]
    fn test_five_digit_time_rejected() {
        let matcher = Matcher::default();
        let hhmm = qso(&[("TIME_ON", "1234")]);
        assert!(matcher.time_match(&hhmm, &hhmm));
        assert!(!matcher.time_match(&qso(&[("TIME_ON", "12345")]), &hhmm));
        assert!(!matcher.time_match(&qso(&[("TIME_ON", "12345")]), &qso(&[("TIME_ON", "12345")])));
    }

    #[test]
    fn test_default_config() {
        assert_eq!(MatchConfig::default().max_seconds, 900);
        assert_eq!(Matcher::default().config().max_seconds, 900);
    }
}
