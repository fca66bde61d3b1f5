use crate::parser::{LineParser, ParseError, ParseResult};
use derive_more::Display;
use log::debug;
use std::io::{self, Write};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ScanStats {
    pub lines: usize,
    pub blank: usize,
    pub unrecognized: usize,
    pub entries: usize,
    pub invalid_dates: usize,
}

#[derive(Debug, Display)]
pub enum ScanError {
    #[display(fmt = "reading log input: {}", _0)]
    Read(io::Error),
    #[display(fmt = "writing diagnostics: {}", _0)]
    Write(io::Error),
}

impl std::error::Error for ScanError {}

/// Runs every line through `parser`, writing per-line diagnostics to `out`.
/// Stops at the end of input or at the first read error.
pub fn scan<I, P, W>(lines: I, parser: &P, out: &mut W) -> Result<ScanStats, ScanError>
where
    I: IntoIterator<Item = io::Result<String>>,
    P: for<'a> LineParser<&'a str>,
    W: Write,
{
    let mut stats = ScanStats::default();
    for line in lines {
        let line = line.map_err(ScanError::Read)?;
        stats.lines += 1;
        match parser.parse_line(&line) {
            Ok(ParseResult { entry, warning }) => {
                stats.entries += 1;
                if let Some(warning) = warning {
                    stats.invalid_dates += 1;
                    writeln!(out, "{}", warning).map_err(ScanError::Write)?;
                }
                debug!("{}", entry);
            }
            Err(ParseError::BlankLine) => stats.blank += 1,
            Err(err) => {
                stats.unrecognized += 1;
                writeln!(out, "{} {}", err, line).map_err(ScanError::Write)?;
            }
        }
    }
    Ok(stats)
}
