//! Solar term instants.
//!
//! Each line holds a solar year and its 24 term instants from 小寒 to 冬至,
//! as `MM-DDTHH:MM` civil time.
//!
//! Terms are numbered `1..=24` from 立春 to 大寒. Odd terms (節) start the
//! months of the sexagenary calendar; even terms (中氣) fall mid-month.

use crate::date::DateTime;
use crate::error::{ParseReason, TableError};
use crate::sexagenary::fmt;

use super::{Field, data_lines, parse_instant, parse_int, require_next};

const TABLE: &str = "solar term table";

/// 立春, the start of the sexagenary year.
pub const START_OF_SPRING: u32 = 1;

/// A solar term and the instant it begins.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SolarTermBoundary {
    /// `1..=24`, 立春 through 大寒.
    pub term: u32,
    pub at: DateTime,
}

impl SolarTermBoundary {
    pub fn name(&self) -> &'static str {
        fmt::solar_term(self.term)
    }
    /// `true` for the twelve terms that start a month.
    pub fn is_month_boundary(&self) -> bool {
        self.term % 2 == 1
    }
    /// Month segment `1..=12` the term belongs to: 1 is the 寅 month opened
    /// by 立春, 12 the 丑 month opened by 小寒.
    pub fn segment(&self) -> u32 {
        self.term.div_ceil(2)
    }
}

/// The 24 solar terms of one solar year.
#[derive(Debug, Clone)]
pub struct SolarTermYear {
    pub year: i32,
    /// In date order, starting with 小寒.
    terms: [DateTime; 24],
}

impl SolarTermYear {
    /// Instant of `term` (`1..=24`) within this solar year.
    pub fn term(&self, term: u32) -> DateTime {
        self.terms[((term + 1) % 24) as usize]
    }

    pub fn start_of_spring(&self) -> DateTime {
        self.term(START_OF_SPRING)
    }

    /// All 24 terms in date order.
    pub fn all(&self) -> impl Iterator<Item = SolarTermBoundary> + '_ {
        (0u32..).zip(self.terms.iter()).map(|(pos, &at)| SolarTermBoundary {
            term: (pos + 22) % 24 + 1,
            at,
        })
    }

    /// The twelve month-starting terms in date order, 小寒 first.
    pub fn boundaries(&self) -> [SolarTermBoundary; 12] {
        std::array::from_fn(|i| SolarTermBoundary {
            term: (2 * i as u32 + 22) % 24 + 1,
            at: self.terms[2 * i],
        })
    }
}

pub(super) fn parse(raw: &str) -> Result<Vec<SolarTermYear>, TableError> {
    let mut res: Vec<SolarTermYear> = Vec::new();
    for (line, text) in data_lines(raw) {
        let at = |field| Field {
            table: TABLE,
            line,
            field,
        };
        let mut it = text.split_whitespace();
        let year: i32 = parse_int(require_next(&mut it, at(1))?, at(1))?;
        let mut terms = Vec::with_capacity(24);
        for i in 0..24 {
            let field = at(2 + i);
            let instant = parse_instant(require_next(&mut it, field)?, year, field)?;
            if terms.last().is_some_and(|prev| *prev >= instant) {
                return Err(
                    field.inconsistent(format!("{instant} is not after the previous term"))
                );
            }
            terms.push(instant);
        }
        if it.next().is_some() {
            return Err(at(26).error(ParseReason::TrailingField));
        }
        if let Some(prev) = res.last()
            && prev.year + 1 != year
        {
            return Err(at(1).inconsistent(format!("year {year} does not follow {}", prev.year)));
        }
        let terms: [DateTime; 24] = terms
            .try_into()
            .map_err(|_| at(2).error(ParseReason::MissingField))?;
        res.push(SolarTermYear { year, terms });
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    const LINE_1984: &str = "1984 01-06T12:41 01-21T06:05 02-05T00:19 02-19T20:16 \
        03-05T18:25 03-20T19:24 04-04T23:22 04-20T06:38 05-05T16:51 \
        05-21T05:58 06-05T21:09 06-21T14:02 07-07T07:29 07-23T00:58 \
        08-07T17:18 08-23T08:00 09-07T20:10 09-23T05:33 10-08T11:42 \
        10-23T14:46 11-07T14:45 11-22T12:11 12-07T07:28 12-22T01:23";

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime {
        DateTime::new(Date::from_ymd(y, m, d).unwrap(), hh, mm).unwrap()
    }

    #[test]
    fn term_numbering() {
        let years = parse(LINE_1984).unwrap();
        let year = &years[0];
        for (std, term) in [
            (at(1984, 2, 5, 0, 19), 1),
            (at(1984, 12, 22, 1, 23), 22),
            (at(1984, 1, 6, 12, 41), 23),
            (at(1984, 1, 21, 6, 5), 24),
        ] {
            assert_eq!(std, year.term(term), "term {term}");
        }
        assert_eq!(at(1984, 2, 5, 0, 19), year.start_of_spring());

        let all: Vec<_> = year.all().collect();
        assert_eq!(24, all.len());
        assert_eq!((23, "小寒"), (all[0].term, all[0].name()));
        assert_eq!((22, "冬至"), (all[23].term, all[23].name()));
        for b in &all {
            assert_eq!(year.term(b.term), b.at);
        }
    }

    #[test]
    fn boundaries() {
        let years = parse(LINE_1984).unwrap();
        let boundaries = years[0].boundaries();
        assert!(boundaries.iter().all(SolarTermBoundary::is_month_boundary));
        let terms: Vec<_> = boundaries.iter().map(|b| b.term).collect();
        assert_eq!(vec![23, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21], terms);
    }

    #[test]
    fn segments() {
        for (segment, term) in [(1, 1), (1, 2), (2, 3), (11, 21), (11, 22), (12, 23), (12, 24)] {
            let b = SolarTermBoundary {
                term,
                at: at(2000, 1, 1, 0, 0),
            };
            assert_eq!(segment, b.segment(), "term {term}");
        }
    }

    #[test]
    fn rejects_bad_lines() {
        let swapped = LINE_1984.replacen("01-06T12:41 01-21T06:05", "01-21T06:05 01-06T12:41", 1);
        let truncated = LINE_1984.rsplit_once(' ').unwrap().0.to_owned();
        let trailing = format!("{LINE_1984} 12-31T00:00");
        for raw in [swapped, truncated, trailing] {
            assert!(parse(&raw).is_err(), "{raw}");
        }
        let gap = format!("{LINE_1984}\n{}", LINE_1984.replacen("1984", "1986", 1));
        assert!(matches!(
            parse(&gap),
            Err(TableError::Inconsistent { line: 2, .. })
        ));
    }
}
