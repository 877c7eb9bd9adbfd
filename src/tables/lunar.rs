//! Lunar year layouts.
//!
//! Each line of the table reads
//!
//! ```text
//! 1984 1984-02-02 10  30 29 30 30 29 29 30 29 29 30 29 30 30
//! ```
//!
//! i.e. the lunar year, the solar date of its first day, the leap month (`0`
//! if none) and the month lengths in order, the leap month right after the
//! common month of the same number.

use std::fmt::{self, Display, Formatter};

use crate::calendar::Month;
use crate::date::Date;
use crate::error::{ParseReason, TableError};

use super::{Field, data_lines, parse_date, parse_int, require_next};

const TABLE: &str = "lunar year table";

/// One month of a lunar year.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunarMonth {
    pub month: Month,
    /// Days from the first day of the year to the first day of this month.
    pub offset: u32,
    /// 29 or 30.
    pub length: u32,
}

/// Layout of one lunar year.
#[derive(Debug, Clone)]
pub struct LunarYear {
    pub year: i32,
    /// Solar date of the first day of the first month.
    pub new_year: Date,
    months: Vec<LunarMonth>,
}

impl LunarYear {
    /// All months in order, 12 or 13 of them.
    pub fn months(&self) -> &[LunarMonth] {
        &self.months
    }

    pub fn leap_month(&self) -> Option<u32> {
        self.months
            .iter()
            .find(|m| m.month.is_leap())
            .map(|m| m.month.num())
    }

    pub fn month(&self, month: Month) -> Option<&LunarMonth> {
        self.months.iter().find(|m| m.month == month)
    }

    pub fn len_days(&self) -> u32 {
        self.months.iter().map(|m| m.length).sum()
    }

    /// First day of the following lunar year.
    pub fn end(&self) -> Date {
        self.new_year + self.len_days() as i32
    }

    /// Month and day of `date`, or `None` if it falls outside this year.
    pub fn locate(&self, date: Date) -> Option<(Month, u32)> {
        if date < self.new_year || date >= self.end() {
            return None;
        }
        let offset = (date - self.new_year) as u32;
        let m = self
            .months
            .iter()
            .take_while(|m| m.offset <= offset)
            .last()?;
        Some((m.month, offset - m.offset + 1))
    }
}

impl Display for LunarYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "lunar year {}", self.year)
    }
}

pub(super) fn parse(raw: &str) -> Result<Vec<LunarYear>, TableError> {
    let mut res: Vec<LunarYear> = Vec::new();
    for (line, text) in data_lines(raw) {
        let at = |field| Field {
            table: TABLE,
            line,
            field,
        };
        let mut it = text.split_whitespace();
        let year: i32 = parse_int(require_next(&mut it, at(1))?, at(1))?;
        let new_year = parse_date(require_next(&mut it, at(2))?, at(2))?;
        let leap: u32 = parse_int(require_next(&mut it, at(3))?, at(3))?;
        if leap > 12 {
            return Err(at(3).inconsistent(format!("leap month {leap} not in 0..=12")));
        }
        let count = if leap == 0 { 12 } else { 13 };

        let mut months = Vec::with_capacity(count);
        let mut num = 0;
        let mut offset = 0;
        let mut leap_seen = false;
        for i in 0..count {
            let field = at(4 + i);
            let length: u32 = parse_int(require_next(&mut it, field)?, field)?;
            if !(29..=30).contains(&length) {
                return Err(field.inconsistent(format!("month length {length} not 29 or 30")));
            }
            let month = if leap != 0 && num == leap && !leap_seen {
                leap_seen = true;
                Month::Leap(num)
            } else {
                num += 1;
                Month::Common(num)
            };
            months.push(LunarMonth {
                month,
                offset,
                length,
            });
            offset += length;
        }
        if it.next().is_some() {
            return Err(at(4 + count).error(ParseReason::TrailingField));
        }

        let rec = LunarYear {
            year,
            new_year,
            months,
        };
        if let Some(prev) = res.last() {
            if prev.year + 1 != year {
                return Err(at(1).inconsistent(format!(
                    "year {year} does not follow {}",
                    prev.year
                )));
            }
            if prev.end() != new_year {
                return Err(at(2).inconsistent(format!(
                    "{} ends on {}, not {}",
                    prev,
                    prev.end().iso_gregorian(),
                    new_year.iso_gregorian()
                )));
            }
        }
        res.push(rec);
    }
    if res.is_empty() {
        return Err(TableError::Inconsistent {
            table: TABLE,
            line: 0,
            message: "no data".to_owned(),
        });
    }
    Ok(res)
}
