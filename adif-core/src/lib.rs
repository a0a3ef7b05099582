//! ADIF Core
//!
//! Streaming parser for ADIF (Amateur Data Interchange Format) logs, plus
//! the QSO matching and merging used to reconcile the same contact reported
//! by several independent logbooks.
//!
//! # Architecture
//!
//! - **specifier.rs** - `<TAG:LEN[:TYPE]>VALUE` scanner and bare marker search
//! - **parser.rs** - Fills a record (and the header) from one text buffer
//! - **reader.rs** - Pulls lines from a stream into a pending buffer until `<EOR>`
//! - **iter.rs** - `Iterator` over the records of one stream
//! - **record.rs** - Record type, accessors and ADIF serialization
//! - **matcher.rs** - Same-contact decision (call, band, mode, time window)
//! - **merge.rs** - Field-level merge of two matched records
//! - **band.rs** - Frequency to band table
//! - **qsl.rs** - QSL received checks for the common confirmation services
//! - **error.rs** - Error type and parse diagnostics
//!
//! # Example
//!
//! ```
//! use adif_core::Records;
//!
//! let log = "<ADIF_VER:5>3.1.0 <EOH>\n<CALL:4>W1AW <BAND:3>20m <EOR>\n";
//! let records: Vec<_> = Records::new(log.as_bytes()).collect();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("call"), "W1AW");
//! ```

pub mod band;
pub mod error;
pub mod iter;
pub mod matcher;
pub mod merge;
pub mod parser;
pub mod qsl;
pub mod reader;
pub mod record;
pub mod specifier;

pub use band::{freq_to_band, Band, BANDS};
pub use error::{Diagnostic, Error, Result};
pub use iter::Records;
pub use matcher::{MatchConfig, Matcher};
pub use parser::RecordParser;
pub use qsl::QslSource;
pub use reader::RecordReader;
pub use record::Record;
pub use specifier::{FieldSpecifier, Marker};
