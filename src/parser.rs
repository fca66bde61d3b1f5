use chrono::NaiveDateTime;
use derive_more::Display;
use std::fmt;
use std::net::IpAddr;

pub mod apache;

/// One recognized line of an Apache error log.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ErrorLogEntry {
    pub timestamp: Option<NaiveDateTime>,
    pub client_ip: Option<IpAddr>,
    pub message: String,
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "{}", ts)?,
            None => f.write_str("-")?,
        }
        match self.client_ip {
            Some(ip) => write!(f, " {}", ip)?,
            None => f.write_str(" -")?,
        }
        write!(f, " {}", self.message)
    }
}

/// A constructed entry together with the non-fatal problem met while building it.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseResult {
    pub entry: ErrorLogEntry,
    pub warning: Option<ParseError>,
}

#[derive(Debug, Display, Clone, Copy, Eq, PartialEq)]
pub enum ParseError {
    #[display(fmt = "Blank line")]
    BlankLine,
    #[display(fmt = "Unrecognized log format")]
    UnrecognizedFormat,
    #[display(fmt = "Failed to parse log datetime.")]
    InvalidDateTime,
}

impl std::error::Error for ParseError {}

pub trait LineParser<L> {
    fn parse_line(&self, line: L) -> Result<ParseResult, ParseError>;
}
