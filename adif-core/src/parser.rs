//! Record parser.
//!
//! Drives the specifier scanner across one text buffer, filling the current
//! record and mirroring header metadata into a separate header record.
//! The parser owns both records; a [`RecordReader`](crate::RecordReader)
//! owns exactly one parser, so there is no shared "current record" state.

use std::collections::VecDeque;

use log::trace;
use phf::phf_map;

use crate::error::Diagnostic;
use crate::record::Record;
use crate::specifier::{scan, Marker};

/// Metadata tags copied into the header, with every header key they land in.
///
/// `ADIF_VERS` is what Log4OM writes instead of `ADIF_VER`; it is kept under
/// its own name and also under the standard one.
static HEADER_FIELDS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "ADIF_VER" => ADIF_VER,
    "ADIF_VERS" => ADIF_VERS,
    "CREATED_TIMESTAMP" => CREATED_TIMESTAMP,
    "PROGRAMID" => PROGRAMID,
    "PROGRAMVERSION" => PROGRAMVERSION,
};

const ADIF_VER: &[&str] = &["ADIF_VER"];
const ADIF_VERS: &[&str] = &["ADIF_VERS", "ADIF_VER"];
const CREATED_TIMESTAMP: &[&str] = &["CREATED_TIMESTAMP"];
const PROGRAMID: &[&str] = &["PROGRAMID"];
const PROGRAMVERSION: &[&str] = &["PROGRAMVERSION"];

/// Tag prefixes copied into the header under their own name.
const HEADER_PREFIXES: &[&str] = &["USERDEF"];

/// Diagnostics kept per parser before older ones are dropped.
const MAX_DIAGNOSTICS: usize = 256;

/// Header keys a tag is mirrored into (none for ordinary fields).
fn header_keys(tag: &str) -> impl Iterator<Item = &str> + '_ {
    let fixed: &[&str] = HEADER_FIELDS.get(tag).copied().unwrap_or_default();
    let prefixed = HEADER_PREFIXES.iter().any(|prefix| tag.starts_with(prefix)).then_some(tag);
    fixed.iter().copied().chain(prefixed)
}

/// Fills a record from ADIF text.
#[derive(Debug, Default)]
pub struct RecordParser {
    record: Record,
    header: Record,
    eoh: bool,
    diagnostics: VecDeque<Diagnostic>,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one buffer into the current record.
    ///
    /// Clears the record first when `reset` is set. Every field found is
    /// written into the record, last write wins. Scanning stops at the first
    /// `<EOR>` so a buffer holding several records only feeds the first.
    ///
    /// If an `<EOH>` precedes that point, everything collected so far is
    /// dropped from the record (the metadata stays in [`header`](Self::header))
    /// and scanning carries on after the marker; [`eoh`](Self::eoh) reports it.
    /// An `<EOH>` after the first `<EOR>` belongs to the following text and is
    /// only seen once the caller passes that text in again.
    ///
    /// Returns true iff the buffer contains an `<EOR>`.
    pub fn parse(&mut self, buf: &str, reset: bool) -> bool {
        self.eoh = false;
        if reset {
            self.record.clear();
        }

        let eor = Marker::EndOfRecord.find(buf, 0);
        let limit = eor.as_ref().map_or(buf.len(), |r| r.start);
        let body = &buf[..limit];

        let mut cursor = 0;
        if let Some(eoh) = Marker::EndOfHeader.find(body, 0) {
            self.scan_fields(&body[..eoh.start], 0);
            trace!("end of header, dropping {} fields", self.record.len());
            self.record.clear();
            self.eoh = true;
            cursor = eoh.end;
        }
        self.scan_fields(body, cursor);

        eor.is_some()
    }

    fn scan_fields(&mut self, buf: &str, mut cursor: usize) {
        while let Some(field) = scan(buf, cursor) {
            trace!("field {} = {:?}", field.tag, field.value);
            if field.is_clamped() {
                self.diagnose(Diagnostic::LengthClamped {
                    tag: field.tag.clone(),
                    declared: field.declared_len,
                    actual: field.len,
                });
            }
            for key in header_keys(&field.tag) {
                self.header.set(key, field.value);
            }
            self.record.set(&field.tag, field.value);
            cursor = field.resume;
        }
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(diagnostic);
    }

    /// The current record.
    #[inline]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Take the current record, leaving an empty one.
    pub fn take_record(&mut self) -> Record {
        std::mem::take(&mut self.record)
    }

    /// Header metadata seen so far. Survives `<EOH>` and record resets.
    #[inline]
    pub fn header(&self) -> &Record {
        &self.header
    }

    /// True if the last [`parse`](Self::parse) call consumed an `<EOH>`.
    #[inline]
    pub fn eoh(&self) -> bool {
        self.eoh
    }

    /// Clear the current record. The header is kept.
    pub fn clear(&mut self) {
        self.record.clear();
    }

    /// Tolerated irregularities, oldest first.
    pub fn diagnostics(&self) -> &VecDeque<Diagnostic> {
        &self.diagnostics
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }
}
