//! Read an ADIF log from stdin and write it back out normalized.
//!
//! Usage: cargo run --example stdin_parse < log.adi
//!
//! Set `RUST_LOG=debug` to see header and stream events.

use std::io::{self, Write};

use adif_core::Records;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut records = Records::new(io::stdin().lock());
    let mut out = io::stdout().lock();

    let mut body = Vec::new();
    for record in records.by_ref() {
        body.push(record.to_adif());
    }

    // The header is only complete once the stream has been read
    let header = records.header();
    if !header.is_empty() {
        write!(out, "{}<EOH>\n\n", header.to_header())?;
    }
    for line in &body {
        writeln!(out, "{}", line)?;
    }

    for diagnostic in records.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }
    match records.take_error() {
        Some(err) => Err(io::Error::new(io::ErrorKind::Other, err)),
        None => Ok(()),
    }
}
