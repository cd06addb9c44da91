// src/mark.rs
//! A single mark as published in one cell of the grades table.
//!
//! Cell bodies come in two shapes:
//!
//! ```text
//! &nbsp;                                               not graded yet
//! [<span class="ocena">]4.5[</span>]<br>[<span class="ocena">]23.01.20[</span>]
//! ```
//!
//! Each bracketed wrapper token is optional on its own. An opening span does not
//! demand a closing one and vice versa, so lopsided markup such as
//! `<span class="ocena">4.5<br>23.01.20</span>` still yields a mark.
//!
//! Only the start of the cell is matched. Anything after the year digits (or
//! after the optional closing span that follows them) is ignored.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::consts::{MARK_WRAPPER_CLOSE, MARK_WRAPPER_OPEN, NO_MARK_SENTINEL};

const LINE_BREAK: &str = "<br>";

/// Years on the portal are two digits; all of them are taken as 20yy.
const CENTURY: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    value: String,
    date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkError {
    #[error("cell content does not match the mark format: {0:?}")]
    Format(String),

    #[error("mark date {day:02}.{month:02}.{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

impl Mark {
    /// Parse the inner HTML of a mark cell.
    ///
    /// Returns `Ok(None)` for the `&nbsp;` placeholder, `Ok(Some(_))` for a
    /// well-formed mark and an error for anything else.
    pub fn parse(cell: &str) -> Result<Option<Mark>, MarkError> {
        if cell == NO_MARK_SENTINEL {
            return Ok(None);
        }

        let fields = scan(cell).ok_or_else(|| MarkError::Format(s!(cell)))?;

        let year = CENTURY + fields.year as i32;
        let date = NaiveDate::from_ymd_opt(year, fields.month, fields.day).ok_or(
            MarkError::InvalidDate {
                day: fields.day,
                month: fields.month,
                year,
            },
        )?;

        Ok(Some(Mark {
            value: s!(fields.value),
            date,
        }))
    }

    /// Grade exactly as it appeared on the page, e.g. `"4.5"`.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:02}.{:02}.{})",
            self.value,
            self.date.day(),
            self.date.month(),
            self.date.year()
        )
    }
}

/* ---------------- Scanner ---------------- */

/// Raw pieces of a matched cell, before date validation.
struct CellFields<'a> {
    value: &'a str,
    day: u32,
    month: u32,
    year: u32,
}

/// Walk the cell grammar token by token:
///
/// ```text
/// open? GRADE close? BR open? DD '.' MM '.' YY close?
/// GRADE := DIGIT+ '.' DIGIT
/// ```
fn scan(cell: &str) -> Option<CellFields<'_>> {
    let mut cur = Cursor::new(cell);

    cur.eat(MARK_WRAPPER_OPEN);
    let value = cur.grade()?;
    cur.eat(MARK_WRAPPER_CLOSE);

    if !cur.eat(LINE_BREAK) {
        return None;
    }

    cur.eat(MARK_WRAPPER_OPEN);
    let day = cur.two_digits()?;
    cur.eat_char('.')?;
    let month = cur.two_digits()?;
    cur.eat_char('.')?;
    let year = cur.two_digits()?;
    // Closing span is optional and nothing after it is inspected
    cur.eat(MARK_WRAPPER_CLOSE);

    Some(CellFields { value, day, month, year })
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Consume `lit` if the input continues with it.
    fn eat(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn eat_char(&mut self, ch: char) -> Option<()> {
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            Some(())
        } else {
            None
        }
    }

    fn digit_run(&self) -> usize {
        self.rest().bytes().take_while(u8::is_ascii_digit).count()
    }

    /// One or more digits, a dot, exactly one digit.
    fn grade(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let whole = self.digit_run();
        if whole == 0 {
            return None;
        }
        self.pos += whole;
        self.eat_char('.')?;
        if self.digit_run() == 0 {
            return None;
        }
        self.pos += 1;
        Some(&self.src[start..self.pos])
    }

    fn two_digits(&mut self) -> Option<u32> {
        let digits = self.rest().get(..2)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.pos += 2;
        digits.parse().ok()
    }
}
