//! Convert an ADIF file to JSON.
//!
//! Usage: cargo run --example to_json --features serde -- log.adi

use std::process::ExitCode;

use adif_core::{Record, Records};

#[derive(serde::Serialize)]
struct Log {
    header: Record,
    records: Vec<Record>,
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: to_json <file.adi>");
        return ExitCode::FAILURE;
    };

    let mut stream = Records::open(&path);
    let records: Vec<_> = stream.by_ref().collect();
    if let Some(err) = stream.error() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let log = Log { header: stream.header().clone(), records };
    match serde_json::to_string_pretty(&log) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
