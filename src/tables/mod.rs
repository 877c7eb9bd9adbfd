//! Reference tables: lunar year layouts and solar term instants.
//!
//! Both tables are plain text, shipped in `data/` and embedded at compile
//! time. Instants are civil times in Korea Standard Time (UTC+9); new moons
//! come from Meeus' lunation series, solar longitudes from a truncated VSOP87
//! series, with ΔT after Espenak & Meeus.
//!
//! A [`Tables`] value is immutable once built. [`Tables::install`] freezes
//! one as the process-wide instance returned by [`global`]; if nothing was
//! installed, the embedded tables are loaded on first use.

use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{info, warn};

use crate::date::{Date, DateTime};
use crate::error::{ParseReason, Result, SajuError, TableError};

pub mod lunar;
pub mod solar_terms;

pub use lunar::{LunarMonth, LunarYear};
pub use solar_terms::{SolarTermBoundary, SolarTermYear};

static RAW_LUNAR_YEARS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/lunar_years.txt"));
static RAW_SOLAR_TERMS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/solar_terms.txt"));

static GLOBAL: OnceLock<Tables> = OnceLock::new();

/// Returns the process-wide tables, loading the embedded ones unless
/// [`Tables::install`] ran first.
///
/// # Panics
///
/// If the embedded data fails to parse.
pub fn global() -> &'static Tables {
    GLOBAL.get_or_init(|| {
        Tables::builtin().unwrap_or_else(|e| panic!("error parsing embedded tables: {e}"))
    })
}

/// Lunar year layouts and solar term instants for a contiguous range of
/// years.
#[derive(Debug, Clone)]
pub struct Tables {
    lunar_years: Vec<LunarYear>,
    solar_terms: Vec<SolarTermYear>,
}

impl Tables {
    /// Parses the tables embedded in the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::tables::Tables;
    ///
    /// let tables = Tables::builtin().unwrap();
    /// assert_eq!(1900..=2050, tables.lunar_range());
    /// assert_eq!(1900..=2051, tables.solar_term_range());
    /// ```
    pub fn builtin() -> std::result::Result<Self, TableError> {
        Self::parse(RAW_LUNAR_YEARS, RAW_SOLAR_TERMS)
    }

    /// Parses tables from their text form, see the files in `data/`.
    pub fn parse(lunar_years: &str, solar_terms: &str) -> std::result::Result<Self, TableError> {
        let tables = Tables {
            lunar_years: lunar::parse(lunar_years)?,
            solar_terms: solar_terms::parse(solar_terms)?,
        };
        info!(
            lunar_years = ?tables.lunar_range(),
            solar_terms = ?tables.solar_term_range(),
            "calendar tables loaded"
        );
        Ok(tables)
    }

    pub fn from_files(
        lunar_years: &Path,
        solar_terms: &Path,
    ) -> std::result::Result<Self, TableError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| TableError::Io {
                path: path.to_owned(),
                source,
            })
        };
        Self::parse(&read(lunar_years)?, &read(solar_terms)?)
    }

    /// Freezes `self` as the process-wide tables.
    ///
    /// Only the first installation (or first call to [`global`]) wins; later
    /// attempts hand the tables back in `Err`.
    pub fn install(self) -> std::result::Result<&'static Tables, Tables> {
        match GLOBAL.set(self) {
            Ok(()) => Ok(global()),
            Err(tables) => {
                warn!("calendar tables already installed, keeping the existing ones");
                Err(tables)
            }
        }
    }

    pub fn lunar_range(&self) -> RangeInclusive<i32> {
        year_range(&self.lunar_years, |y| y.year)
    }

    pub fn solar_term_range(&self) -> RangeInclusive<i32> {
        year_range(&self.solar_terms, |y| y.year)
    }

    /// Layout of lunar year `year`.
    pub fn lunar_year(&self, year: i32) -> Result<&LunarYear> {
        self.lunar_years
            .binary_search_by_key(&year, |y| y.year)
            .map(|i| &self.lunar_years[i])
            .map_err(|_| unsupported(year, self.lunar_range()))
    }

    /// Solar term instants of solar year `year`.
    pub fn solar_terms(&self, year: i32) -> Result<&SolarTermYear> {
        self.solar_terms
            .binary_search_by_key(&year, |y| y.year)
            .map(|i| &self.solar_terms[i])
            .map_err(|_| unsupported(year, self.solar_term_range()))
    }

    /// The twelve month-starting terms (節) of solar year `year`, in date
    /// order from 小寒 to 大雪.
    pub fn month_boundaries(&self, year: i32) -> Result<[SolarTermBoundary; 12]> {
        Ok(self.solar_terms(year)?.boundaries())
    }

    /// The latest month boundary at or before `at`. Before 小寒 this is the
    /// previous year's 大雪.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::{Date, DateTime};
    /// use saju::tables;
    ///
    /// let at = DateTime::new(Date::from_ymd(2000, 1, 1).unwrap(), 12, 0).unwrap();
    /// let boundary = tables::global().boundary_before(at).unwrap();
    ///
    /// assert_eq!("大雪", boundary.name());
    /// assert_eq!("1999-12-07T22:48", boundary.at.to_string());
    /// ```
    pub fn boundary_before(&self, at: DateTime) -> Result<SolarTermBoundary> {
        let year = at.date().gregorian().0;
        let boundaries = self.month_boundaries(year)?;
        match boundaries.iter().rev().find(|b| b.at <= at) {
            Some(b) => Ok(*b),
            None => Ok(self.month_boundaries(year - 1)?[11]),
        }
    }

    /// The solar term (any of the 24) in force on `date`, with the number of
    /// days since the day it began; `0` means the term begins that day.
    pub fn solar_term_for(&self, date: Date) -> Result<(SolarTermBoundary, i32)> {
        let year = date.gregorian().0;
        let latest = |terms: &SolarTermYear| terms.all().filter(|t| t.at.date() <= date).last();
        let term = match latest(self.solar_terms(year)?) {
            Some(t) => t,
            None => self.solar_terms(year - 1)?.all().last().ok_or_else(|| {
                unsupported(year - 1, self.solar_term_range())
            })?,
        };
        Ok((term, date - term.at.date()))
    }
}

fn year_range<T>(years: &[T], year: impl Fn(&T) -> i32) -> RangeInclusive<i32> {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => year(first)..=year(last),
        _ => RangeInclusive::new(0, -1),
    }
}

fn unsupported(year: i32, range: RangeInclusive<i32>) -> SajuError {
    SajuError::UnsupportedEra {
        year,
        min: *range.start(),
        max: *range.end(),
    }
}

/// Position of a field while parsing a table line.
#[derive(Debug, Copy, Clone)]
struct Field {
    table: &'static str,
    line: usize,
    field: usize,
}

impl Field {
    fn error(&self, reason: ParseReason) -> TableError {
        TableError::Parse {
            table: self.table,
            line: self.line,
            field: self.field,
            reason,
        }
    }
    fn inconsistent(&self, message: impl Into<String>) -> TableError {
        TableError::Inconsistent {
            table: self.table,
            line: self.line,
            message: message.into(),
        }
    }
}

/// Lines that carry data, numbered from 1, skipping comments and blanks.
fn data_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    (1usize..)
        .zip(raw.lines())
        .map(|(n, line)| (n, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn require_next<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    at: Field,
) -> std::result::Result<&'a str, TableError> {
    it.next().ok_or_else(|| at.error(ParseReason::MissingField))
}

fn parse_int<T: std::str::FromStr>(s: &str, at: Field) -> std::result::Result<T, TableError> {
    s.parse()
        .map_err(|_| at.error(ParseReason::InvalidInt(s.to_owned())))
}

/// `YYYY-MM-DD`
fn parse_date(s: &str, at: Field) -> std::result::Result<Date, TableError> {
    let invalid = || at.error(ParseReason::InvalidDate(s.to_owned()));
    let mut parts = s.splitn(3, '-');
    let mut next = || parts.next().and_then(|p| p.parse::<u32>().ok());
    match (next(), next(), next()) {
        (Some(y), Some(m), Some(d)) => Date::from_ymd(y as i32, m, d).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// `MM-DDTHH:MM` within solar year `year`.
fn parse_instant(s: &str, year: i32, at: Field) -> std::result::Result<DateTime, TableError> {
    let invalid = || at.error(ParseReason::InvalidTime(s.to_owned()));
    let (date, time) = s.split_once('T').ok_or_else(invalid)?;
    let (m, d) = date.split_once('-').ok_or_else(invalid)?;
    let (hh, mm) = time.split_once(':').ok_or_else(invalid)?;
    let num = |p: &str| p.parse::<u32>().map_err(|_| invalid());
    let date = Date::from_ymd(year, num(m)?, num(d)?).ok_or_else(invalid)?;
    DateTime::new(date, num(hh)?, num(mm)?).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime {
        DateTime::new(Date::from_ymd(y, m, d).unwrap(), hh, mm).unwrap()
    }

    #[test]
    fn builtin_ranges() {
        let tables = Tables::builtin().unwrap();
        assert_eq!(1900..=2050, tables.lunar_range());
        assert_eq!(1900..=2051, tables.solar_term_range());
        assert_eq!(
            Err(SajuError::UnsupportedEra {
                year: 1899,
                min: 1900,
                max: 2050
            }),
            tables.lunar_year(1899).map(|y| y.year)
        );
        assert_eq!(
            Err(SajuError::UnsupportedEra {
                year: 2052,
                min: 1900,
                max: 2051
            }),
            tables.solar_terms(2052).map(|y| y.year)
        );
    }

    #[test]
    fn month_boundaries() {
        let boundaries = global().month_boundaries(1984).unwrap();
        let names: Vec<_> = boundaries.iter().map(|b| b.name()).collect();
        assert_eq!(
            vec![
                "小寒", "立春", "驚蟄", "清明", "立夏", "芒種", "小暑", "立秋", "白露", "寒露",
                "立冬", "大雪"
            ],
            names
        );
        let segments: Vec<_> = boundaries.iter().map(|b| b.segment()).collect();
        assert_eq!(vec![12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], segments);
        assert!(boundaries.windows(2).all(|w| w[0].at < w[1].at));
        assert_eq!(at(1984, 2, 5, 0, 19), boundaries[1].at);
    }

    #[test]
    fn boundary_before() {
        let tables = global();
        let dataset = [
            (at(1984, 2, 5, 0, 18), 23, at(1984, 1, 6, 12, 41)),
            (at(1984, 2, 5, 0, 19), 1, at(1984, 2, 5, 0, 19)),
            (at(1984, 1, 6, 12, 40), 21, at(1983, 12, 8, 1, 34)),
            (at(2000, 1, 1, 0, 0), 21, at(1999, 12, 7, 22, 48)),
            (at(1999, 12, 7, 22, 47), 19, at(1999, 11, 8, 5, 58)),
            (at(2024, 12, 31, 23, 59), 21, at(2024, 12, 7, 0, 17)),
        ];
        for (date, term, std) in dataset {
            let b = tables.boundary_before(date).unwrap();
            assert_eq!((term, std), (b.term, b.at), "{date}");
        }
        assert!(matches!(
            tables.boundary_before(at(1900, 1, 1, 0, 0)),
            Err(SajuError::UnsupportedEra { year: 1899, .. })
        ));
    }

    #[test]
    fn solar_term_for() {
        let tables = global();
        let date = |y, m, d| Date::from_ymd(y, m, d).unwrap();
        for (d, (term, days)) in [
            (date(1984, 2, 5), (1, 0)),
            (date(1984, 2, 4), (24, 14)),
            (date(1984, 1, 1), (22, 10)),
            (date(2024, 12, 21), (22, 0)),
        ] {
            let (t, off) = tables.solar_term_for(d).unwrap();
            assert_eq!((term, days), (t.term, off), "{}", d.iso_gregorian());
        }
    }

    #[test]
    fn field_parsers() {
        let f = Field {
            table: "test",
            line: 3,
            field: 2,
        };
        assert_eq!(
            Date::from_ymd(1984, 2, 2),
            parse_date("1984-02-02", f).ok()
        );
        assert!(parse_date("1984-02-30", f).is_err());
        assert!(parse_date("1984-02", f).is_err());
        assert_eq!(
            Some(at(1984, 2, 5, 0, 19)),
            parse_instant("02-05T00:19", 1984, f).ok()
        );
        for bad in ["02-05", "02-05T24:00", "13-01T00:00", "aa-05T00:19"] {
            assert!(parse_instant(bad, 1984, f).is_err(), "{bad}");
        }
        let err = parse_int::<i32>("x1", f).unwrap_err();
        assert_eq!("test, line 3, field 2: invalid integer \"x1\"", err.to_string());
    }

    #[test]
    fn from_files() {
        let dir = tempfile::tempdir().unwrap();
        let lunar = dir.path().join("lunar.txt");
        let terms = dir.path().join("terms.txt");
        std::fs::write(&lunar, RAW_LUNAR_YEARS).unwrap();
        std::fs::write(&terms, RAW_SOLAR_TERMS).unwrap();
        let tables = Tables::from_files(&lunar, &terms).unwrap();
        assert_eq!(1900..=2050, tables.lunar_range());

        let missing = dir.path().join("missing.txt");
        let err = Tables::from_files(&missing, &terms).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
