use crate::config::{read_config, Config};
use crate::parser::apache::ApacheErrorParser;
use crate::reader::create_line_source;
use crate::scan::{scan, ScanError, ScanStats};

use env_logger::Env;
use log::info;
use std::env::args;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

mod config;
mod parser;
mod reader;
mod scan;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match args().nth(1) {
        Some(config_file) => {
            info!("Using config file {}", config_file);
            read_config(&config_file).unwrap_or_else(|e| {
                eprintln!("{}", e);
                process::exit(2);
            })
        }
        None => Config::default(),
    };
    info!("Config: {:?}", config);

    let lines = create_line_source(&config.log_file).unwrap_or_else(|e| {
        eprintln!("Failed to open log file {}: {}", config.log_file, e);
        process::exit(2);
    });

    let parser = ApacheErrorParser::new();
    let start = std::time::Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = scan(lines, &parser, &mut out);
    report(result, start.elapsed(), &mut io::stderr());
}

/// Logs the run summary, or writes the notice for a scan cut short by a read
/// error to `err`. Either way the process ends normally.
fn report<W: Write>(result: Result<ScanStats, ScanError>, elapsed: Duration, err: &mut W) {
    match result {
        Ok(stats) => info!(
            concat!(
                "elapsed {} ms, {} lines read, {} lines/s, ",
                "entries = {}, blank = {}, unrecognized = {}, bad dates = {}"
            ),
            elapsed.as_millis(),
            stats.lines,
            stats.lines as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
            stats.entries,
            stats.blank,
            stats.unrecognized,
            stats.invalid_dates
        ),
        Err(e) => {
            // nowhere left to report a failing stderr
            let _ = writeln!(err, "{}", e);
        }
    }
}
