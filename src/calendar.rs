//! Conversion between lunar and solar (Gregorian) dates.
//!
//! A lunar date is found by adding its day offset within the lunar year to
//! the tabulated solar date of that year's first day; see
//! [`tables::lunar`](crate::tables::lunar).

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{CivilDate, Date};
use crate::error::{Result, SajuError};
use crate::sexagenary::fmt as names;
use crate::tables::Tables;

/// Lunar month name: `Common` for ordinary months, `Leap` for an intercalary
/// month following the common month of the same number.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Month number, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 「正月」 .. 「臘月」, with 「閏」 for leap months.
    pub fn name(&self) -> String {
        names::month(*self)
    }
}

/// A date in the lunar calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    pub fn month_name(&self) -> Month {
        if self.is_leap_month {
            Month::Leap(self.month)
        } else {
            Month::Common(self.month)
        }
    }

    /// Traditional name such as 「1984年 閏十月 初五」.
    ///
    /// # Panics
    ///
    /// If month or day is out of range; use on converted or validated dates.
    pub fn name(&self) -> String {
        format!(
            "{}年 {} {}",
            self.year,
            self.month_name().name(),
            names::day(self.day)
        )
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "閏" } else { "" };
        write!(f, "{:04}-{leap}{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Converts a lunar date into the solar date of the same day, at 00:00.
///
/// # Errors
///
/// [`SajuError::UnsupportedEra`] if the lunar year is not tabulated,
/// [`SajuError::InvalidDate`] if the month does not exist that year or the
/// day exceeds its length.
///
/// # Example
///
/// ```
/// use saju::calendar::{lunar_to_solar, LunarDate};
/// use saju::tables;
///
/// let solar = lunar_to_solar(tables::global(), &LunarDate::new(1984, 1, 1, false)).unwrap();
/// assert_eq!((1984, 2, 2), (solar.year, solar.month, solar.day));
/// assert!(solar.from_lunar);
/// ```
pub fn lunar_to_solar(tables: &Tables, date: &LunarDate) -> Result<CivilDate> {
    if !(1..=12).contains(&date.month) || date.day == 0 {
        return Err(SajuError::InvalidDate(format!(
            "lunar {date} is not a lunar date"
        )));
    }
    let year = tables.lunar_year(date.year)?;
    let month = year.month(date.month_name()).ok_or_else(|| {
        SajuError::InvalidDate(format!(
            "{year} has no {}",
            date.month_name().name()
        ))
    })?;
    if date.day > month.length {
        return Err(SajuError::InvalidDate(format!(
            "{} of {year} has only {} days",
            date.month_name().name(),
            month.length
        )));
    }
    let solar = year.new_year + (month.offset + date.day - 1) as i32;
    debug!(lunar = %date, solar = %solar.iso_gregorian(), "converted lunar date");
    let (y, m, d) = solar.gregorian();
    Ok(CivilDate {
        year: y,
        month: m,
        day: d,
        hour: 0,
        minute: 0,
        from_lunar: true,
    })
}

/// Converts a solar date into the lunar calendar.
///
/// # Example
///
/// ```
/// use saju::calendar::{solar_to_lunar, LunarDate};
/// use saju::{tables, Date};
///
/// let date = Date::from_ymd(2017, 6, 24).unwrap();
/// assert_eq!(
///     LunarDate::new(2017, 5, 1, true),
///     solar_to_lunar(tables::global(), date).unwrap()
/// );
/// ```
pub fn solar_to_lunar(tables: &Tables, date: Date) -> Result<LunarDate> {
    let year = date.gregorian().0;
    for y in [year, year - 1] {
        let Ok(lunar_year) = tables.lunar_year(y) else {
            continue;
        };
        if let Some((month, day)) = lunar_year.locate(date) {
            return Ok(LunarDate::new(y, month.num(), day, month.is_leap()));
        }
    }
    let range = tables.lunar_range();
    Err(SajuError::UnsupportedEra {
        year,
        min: *range.start(),
        max: *range.end(),
    })
}
