//! Iterator over the records of one ADIF stream.
//!
//! [`Records`] is forward-only and single-pass. The stream is opened on the
//! first `next()` and dropped as soon as the sequence ends.
//!
//! Errors do not surface through the `Iterator` interface: an open or read
//! failure simply ends the sequence. Callers that need to tell a short log
//! from a truncated one can look at [`Records::error`] afterwards, or install
//! an observer with [`Records::on_error`].

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Diagnostic, Error, Result};
use crate::reader::RecordReader;
use crate::record::Record;

type Opener<R> = Box<dyn FnOnce() -> Result<R> + Send>;
type Observer = Box<dyn FnMut(&Error) + Send>;

enum Source<R> {
    Unopened(Opener<R>),
    Open(R),
    Closed,
}

/// The records of one stream, in file order.
pub struct Records<R> {
    reader: RecordReader,
    source: Source<R>,
    error: Option<Error>,
    observer: Option<Observer>,
    count: usize,
}

impl<R: BufRead> Records<R> {
    /// Iterate over an already open stream.
    pub fn new(stream: R) -> Self {
        Self::with_source(Source::Open(stream))
    }

    /// Iterate over a stream produced by `open` on first use.
    pub fn with_opener<F>(open: F) -> Self
    where
        F: FnOnce() -> Result<R> + Send + 'static,
    {
        Self::with_source(Source::Unopened(Box::new(open)))
    }

    fn with_source(source: Source<R>) -> Self {
        Self {
            reader: RecordReader::new(),
            source,
            error: None,
            observer: None,
            count: 0,
        }
    }

    /// Call `observer` with any error that ends the sequence.
    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&Error) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The error that ended the sequence, if one did.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Take the error that ended the sequence, if one did.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Header metadata seen so far.
    pub fn header(&self) -> &Record {
        self.reader.header()
    }

    /// Irregularities tolerated so far, plus the terminating error if any.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<_> = self.reader.diagnostics().iter().cloned().collect();
        if let Some(err) = &self.error {
            diagnostics.push(Diagnostic::StreamError { message: err.to_string() });
        }
        diagnostics
    }

    /// Number of records yielded so far.
    pub fn count_so_far(&self) -> usize {
        self.count
    }

    /// True once the sequence has ended and the stream is closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.source, Source::Closed)
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if matches!(self.source, Source::Unopened(_)) {
            if let Source::Unopened(open) = std::mem::replace(&mut self.source, Source::Closed) {
                self.source = Source::Open(open()?);
            }
        }
        let Source::Open(stream) = &mut self.source else {
            return Ok(None);
        };
        if !self.reader.read_next(stream)? || self.reader.record().is_empty() {
            return Ok(None);
        }
        Ok(Some(self.reader.record().clone()))
    }

    fn close(&mut self) {
        if !self.is_closed() {
            debug!("closing ADIF stream after {} records", self.count);
        }
        self.source = Source::Closed;
    }
}

impl Records<BufReader<File>> {
    /// Iterate over the records of a file. The file is opened lazily.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        Self::with_opener(move || {
            File::open(&path)
                .map(BufReader::new)
                .map_err(|source| Error::Open { path, source })
        })
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        match self.next_record() {
            Ok(Some(record)) => {
                self.count += 1;
                Some(record)
            }
            Ok(None) => {
                self.close();
                None
            }
            Err(err) => {
                warn!("ADIF stream ended early after {} records: {}", self.count, err);
                if let Some(observer) = self.observer.as_mut() {
                    observer(&err);
                }
                self.error = Some(err);
                self.close();
                None
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Records<R> {}

impl<R> fmt::Debug for Records<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.source {
            Source::Unopened(_) => "unopened",
            Source::Open(_) => "open",
            Source::Closed => "closed",
        };
        f.debug_struct("Records")
            .field("state", &state)
            .field("count", &self.count)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
