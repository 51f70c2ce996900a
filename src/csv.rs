// src/csv.rs
//
// Delimited text, RFC 4180 style: fields containing the separator, a quote
// or a line break are quoted, embedded quotes are doubled. Reading accepts
// LF or CRLF, a leading BOM, and skips blank lines.

use std::borrow::Cow;
use std::io::{self, Write};
use std::iter::Peekable;
use std::mem::take;
use std::str::Chars;

/* ---------------- Reading ---------------- */

/// Yields one row at a time from delimited text.
pub struct Rows<'a> {
    chars: Peekable<Chars<'a>>,
    sep: char,
}

impl<'a> Rows<'a> {
    pub fn new(text: &'a str, sep: char) -> Self {
        Self { chars: text.trim_start_matches('\u{feff}').chars().peekable(), sep }
    }

    /// Next physical record, blank or not. `None` at end of input.
    fn record(&mut self) -> Option<Vec<String>> {
        self.chars.peek()?;
        let mut cells = Vec::new();
        let mut cell = s!();
        let mut quoted = false;

        while let Some(ch) = self.chars.next() {
            if quoted {
                match ch {
                    '"' if self.chars.next_if_eq(&'"').is_some() => cell.push('"'),
                    '"' => quoted = false,
                    _ => cell.push(ch),
                }
                continue;
            }
            match ch {
                '"' => quoted = true,
                '\r' | '\n' => {
                    if ch == '\r' {
                        self.chars.next_if_eq(&'\n');
                    }
                    break;
                }
                c if c == self.sep => cells.push(take(&mut cell)),
                _ => cell.push(ch),
            }
        }
        // An unterminated quote runs to end of input; keep what was read.
        cells.push(cell);
        Some(cells)
    }
}

impl Iterator for Rows<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        loop {
            let rec = self.record()?;
            if !(rec.len() == 1 && rec[0].is_empty()) {
                return Some(rec);
            }
        }
    }
}

pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    Rows::new(text, sep).collect()
}

/// First row is the header; the rest are data.
pub fn split_header(rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    let mut it = rows.into_iter();
    let header = it.next();
    (header, it.collect())
}

/* ---------------- Writing ---------------- */

fn quote(cell: &str, sep: char) -> Cow<'_, str> {
    if cell.contains([sep, '"', '\n', '\r']) {
        Cow::Owned(join!("\"", &cell.replace('"', "\"\""), "\""))
    } else {
        Cow::Borrowed(cell)
    }
}

/// One row plus a trailing newline.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        w.write_all(quote(cell.as_ref(), sep).as_bytes())?;
    }
    writeln!(w)
}
