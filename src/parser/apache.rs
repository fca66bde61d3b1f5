use crate::parser::{ErrorLogEntry, LineParser, ParseError, ParseResult};
use chrono::{NaiveDateTime, Weekday};
use memchr::memrchr;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[([^\]]+)\] \[([^\]]+)\] (?:\[client ([^\]]+)\])? *(.*)$"#)
        .expect("line pattern must compile")
});
static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[([^\]]+)\]"#).expect("date pattern must compile"));
static CLIENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[client ([^\]]+)\]"#).expect("client pattern must compile"));

/// Layout gate for `Mon Jan _2 15:04:05 2006`: two-digit minutes and seconds,
/// an unsigned four-digit year, an optional fraction after the seconds.
static ANSIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^([A-Za-z]{3}) ([A-Za-z]{3}) {1,2}"#,
        r#"(\d{1,2} \d{1,2}:\d{2}:\d{2}(?:\.\d+)? \d{4})$"#,
    ))
    .expect("ANSI C date pattern must compile")
});

/// Month, day, time and year of an ANSI C date once the weekday is split off.
/// `%.f` reads nothing when the seconds carry no fraction.
const DATE_FORMAT: &str = "%b %d %H:%M:%S%.f %Y";

/// Parser for the classic Apache `error.log` layout:
///
/// ```text
/// [Wed Oct 11 14:32:52 2000] [error] [client 127.0.0.1] client denied by server configuration
/// ```
///
/// The second bracketed field (level or module) is required for a line to be
/// recognized but is not kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApacheErrorParser;

impl ApacheErrorParser {
    pub fn new() -> Self {
        ApacheErrorParser
    }
}

impl LineParser<&str> for ApacheErrorParser {
    fn parse_line(&self, line: &str) -> Result<ParseResult, ParseError> {
        if line.is_empty() {
            return Err(ParseError::BlankLine);
        }
        if !LINE_REGEX.is_match(line) {
            return Err(ParseError::UnrecognizedFormat);
        }

        let mut entry = ErrorLogEntry::default();
        let mut warning = None;

        if let Some(date) = DATE_REGEX.find(line) {
            match parse_ansic(date.as_str().trim_matches(&['[', ']'][..])) {
                Some(timestamp) => entry.timestamp = Some(timestamp),
                None => warning = Some(ParseError::InvalidDateTime),
            }
        }

        // an unparsable client address is left unset without a warning
        entry.client_ip = CLIENT_REGEX
            .captures(line)
            .and_then(|caps| caps[1].parse::<IpAddr>().ok());

        // everything after the last ']' of the line, wherever it sits
        if let Some(cut) = memrchr(b']', line.as_bytes()) {
            entry.message = line[cut + 1..].trim().to_string();
        }

        Ok(ParseResult { entry, warning })
    }
}

/// Parses `Mon Jan _2 15:04:05 2006`. The weekday is checked for syntax only
/// and the day of month may be padded with one extra space.
fn parse_ansic(date: &str) -> Option<NaiveDateTime> {
    let caps = ANSIC_REGEX.captures(date)?;
    caps[1].parse::<Weekday>().ok()?;
    NaiveDateTime::parse_from_str(&format!("{} {}", &caps[2], &caps[3]), DATE_FORMAT).ok()
}
