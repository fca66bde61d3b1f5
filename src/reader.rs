use std::borrow::Cow;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};

pub type LineSource = Box<dyn Iterator<Item = io::Result<String>>>;

/// Opens `filename` for reading, `-` meaning standard input.
pub fn create_line_source(filename: &str) -> io::Result<LineSource> {
    if filename == "-" {
        return Ok(Box::new(Lines::new(BufReader::new(stdin()))));
    }
    open_file_lines(filename)
}

#[cfg(not(feature = "mmap"))]
fn open_file_lines(filename: &str) -> io::Result<LineSource> {
    Ok(Box::new(Lines::new(BufReader::new(File::open(filename)?))))
}

/// Line iterator that tolerates bytes which are not valid UTF-8.
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Lines {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                Some(Ok(decode_line(&self.buf)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn decode_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match String::from_utf8_lossy(line) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            log::trace!("replaced invalid UTF-8 in line: {}", s);
            s
        }
    }
}

#[cfg(feature = "mmap")]
fn open_file_lines(filename: &str) -> io::Result<LineSource> {
    use memchr::memchr;
    use memmap::MmapOptions;

    let file = File::open(filename)?;
    if file.metadata()?.len() == 0 {
        return Ok(Box::new(std::iter::empty()));
    }
    // SAFETY: the log is only read; a writer truncating it underneath us is not guarded against.
    let map = unsafe { MmapOptions::new().map(&file)? };
    let mut start_pos = 0;
    Ok(Box::new(std::iter::from_fn(move || {
        if start_pos >= map.len() {
            return None;
        }
        let rest = &map[start_pos..];
        let line_len = memchr(b'\n', rest).unwrap_or(rest.len());
        start_pos += line_len + 1;
        Some(Ok(decode_line(&rest[..line_len])))
    })))
}
