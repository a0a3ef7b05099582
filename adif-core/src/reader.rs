//! Record reader: assembles records across lines of an input stream.
//!
//! ADIF files put records on one line, on many lines, or several to a line.
//! The reader appends lines to a pending buffer until an `<EOR>` shows up,
//! parses the buffer, then advances a cursor past the consumed record and
//! keeps the rest for the next call. The consumed prefix is only dropped
//! before the next line is appended, so a log written as one long line is
//! read in a single pass.
//!
//! # Line endings
//!
//! Every `\r` and `\n` becomes a space before the line is appended, so a
//! field boundary that falls on a line break still separates tokens. A value
//! whose declared length spans a real line break gets the break flattened to
//! a space; multi-line values are not otherwise supported.
//!
//! # Decoding
//!
//! Input is read as bytes and decoded as UTF-8. Invalid byte sequences are
//! dropped, not replaced.

use std::collections::VecDeque;
use std::io::BufRead;

use log::debug;

use crate::error::{Diagnostic, Result};
use crate::parser::RecordParser;
use crate::record::Record;
use crate::specifier::Marker;

/// Reads consecutive records from one stream.
///
/// Keep one reader per stream: the pending buffer holds text already pulled
/// from the stream but not yet returned as a record.
#[derive(Debug, Default)]
pub struct RecordReader {
    parser: RecordParser,
    pending: String,
    /// Byte offset of the first unconsumed character in `pending`.
    consumed: usize,
    line: Vec<u8>,
}

impl RecordReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the next record from `stream`.
    ///
    /// Returns `Ok(true)` when a record was completed; it is then available
    /// through [`record`](Self::record). Returns `Ok(false)` when the stream
    /// ran out before another `<EOR>`.
    pub fn read_next<R: BufRead + ?Sized>(&mut self, stream: &mut R) -> Result<bool> {
        // A previous read may have pulled in more than one record
        if self.complete_pending(true) {
            return Ok(true);
        }

        let mut reset = true;
        loop {
            self.line.clear();
            if stream.read_until(b'\n', &mut self.line)? == 0 {
                break;
            }
            self.compact();
            push_decoded(&mut self.pending, &self.line);

            if let Some(eoh) = Marker::EndOfHeader.find(&self.pending, 0) {
                self.parser.parse(&self.pending, true);
                self.consumed = eoh.end;
                debug!("header complete: {} fields", self.parser.header().len());
                reset = false;
            }

            if self.complete_pending(reset) {
                return Ok(true);
            }
        }

        // Covers a final record without a line terminator after <EOR>
        Ok(self.complete_pending(reset))
    }

    /// Parse and consume the pending buffer up to its first `<EOR>`, if any.
    fn complete_pending(&mut self, reset: bool) -> bool {
        let unread = &self.pending[self.consumed..];
        let Some(eor) = Marker::EndOfRecord.find(unread, 0) else {
            return false;
        };
        if !self.parser.parse(unread, reset) {
            return false;
        }
        self.consumed += eor.end;
        true
    }

    /// Drop the consumed prefix of the pending buffer.
    fn compact(&mut self) {
        if self.consumed > 0 {
            self.pending.drain(..self.consumed);
            self.consumed = 0;
        }
    }

    /// The most recently completed record.
    #[inline]
    pub fn record(&self) -> &Record {
        self.parser.record()
    }

    /// Take the most recently completed record, leaving an empty one.
    pub fn take_record(&mut self) -> Record {
        self.parser.take_record()
    }

    /// Header metadata seen so far on this stream.
    #[inline]
    pub fn header(&self) -> &Record {
        self.parser.header()
    }

    /// Text read from the stream but not yet consumed.
    #[inline]
    pub fn pending(&self) -> &str {
        &self.pending[self.consumed..]
    }

    /// True if the last parse consumed an `<EOH>`.
    #[inline]
    pub fn eoh(&self) -> bool {
        self.parser.eoh()
    }

    /// Irregularities the parser tolerated on this stream.
    pub fn diagnostics(&self) -> &VecDeque<Diagnostic> {
        self.parser.diagnostics()
    }
}

/// Append `bytes` to `out` as UTF-8, dropping invalid sequences and turning
/// each CR and LF into a space.
fn push_decoded(out: &mut String, bytes: &[u8]) {
    let start = out.len();
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    if out[start..].contains(['\r', '\n']) {
        let normalized = out[start..].replace(['\r', '\n'], " ");
        out.truncate(start);
        out.push_str(&normalized);
    }
}
