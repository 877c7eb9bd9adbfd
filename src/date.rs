//! Calendar-independant date, civil date-time and the birth instant.

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SajuError};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date, without checking that
    /// `month` and `day` exist: out-of-range values roll over into adjacent
    /// months.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (y, m, d) = (year as i64, month as i64, day as i64);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Creates a `Date` with a Gregorian calendar date, returning `None`
    /// unless the date exists (proleptic Gregorian leap-year rules).
    ///
    /// # Example
    ///
    /// ```
    /// use saju::Date;
    ///
    /// assert!(Date::from_ymd(2000, 2, 29).is_some());
    /// assert!(Date::from_ymd(1900, 2, 29).is_none());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Self::from_gregorian(year, month as i32, day as i32)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as u32, day as u32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as u32,
        _ => 0,
    }
}

/// A date with a minute of day, in the civil time zone of the tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DateTime {
    date: Date,
    minute: u32,
}

impl DateTime {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn new(date: Date, hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            date,
            minute: hour * 60 + minute,
        })
    }
    pub fn date(&self) -> Date {
        self.date
    }
    pub fn hour(&self) -> u32 {
        self.minute / 60
    }
    pub fn minute(&self) -> u32 {
        self.minute % 60
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}",
            self.date.iso_gregorian(),
            self.hour(),
            self.minute()
        )
    }
}

/// A solar (Gregorian) date and time of day, remembering whether it was
/// converted from a lunar date.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub from_lunar: bool,
}

impl CivilDate {
    pub fn from_datetime(at: DateTime, from_lunar: bool) -> Self {
        let (year, month, day) = at.date().gregorian();
        Self {
            year,
            month,
            day,
            hour: at.hour(),
            minute: at.minute(),
            from_lunar,
        }
    }

    /// Same date at another time of day.
    pub fn with_time(self, hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            ..self
        }
    }

    /// Validates the time of day, then the date.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::CivilDate;
    ///
    /// let civil = CivilDate {
    ///     year: 1984,
    ///     month: 2,
    ///     day: 2,
    ///     hour: 10,
    ///     minute: 30,
    ///     from_lunar: false,
    /// };
    /// assert_eq!("1984-02-02T10:30", civil.datetime().unwrap().to_string());
    /// ```
    pub fn datetime(&self) -> Result<DateTime> {
        let invalid_time = SajuError::InvalidTime {
            hour: self.hour,
            minute: self.minute,
        };
        if self.hour > 23 || self.minute > 59 {
            return Err(invalid_time);
        }
        let date = Date::from_ymd(self.year, self.month, self.day).ok_or_else(|| {
            SajuError::InvalidDate(format!(
                "{:04}-{:02}-{:02} is not a Gregorian date",
                self.year, self.month, self.day
            ))
        })?;
        DateTime::new(date, self.hour, self.minute).ok_or(invalid_time)
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(1984, 2, 2).unwrap();
        assert_eq!(2445733, date.jdn());
    }

    #[test]
    fn out_of_range() {
        assert_eq!(None, Date::from_gregorian(-5000, 1, 1));
        assert_eq!(None, Date::from_gregorian(i32::MAX, 12, 31));
        assert_eq!(None, Date::from_ymd(i32::MIN, 1, 1));
        let far = Date::from_gregorian(2_000_000, 1, 1).unwrap();
        assert_eq!((2_000_000, 1, 1), far.gregorian());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn from_ymd() {
        for (ok, (y, m, d)) in [
            (true, (2000, 2, 29)),
            (true, (2024, 2, 29)),
            (false, (1900, 2, 29)),
            (false, (2023, 2, 29)),
            (false, (2023, 4, 31)),
            (true, (2023, 12, 31)),
            (false, (2023, 13, 1)),
            (false, (2023, 0, 1)),
            (false, (2023, 1, 0)),
        ] {
            assert_eq!(ok, Date::from_ymd(y, m, d).is_some(), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn arithmetic() {
        let a = Date::from_ymd(1984, 1, 31).unwrap();
        let b = Date::from_ymd(1984, 3, 1).unwrap();
        assert_eq!(30, b - a);
        assert_eq!(b, a + 30);
        assert_eq!(a, b + -30);
        assert_eq!("1984-02-29", (a + 29).iso_gregorian());
    }

    #[test]
    fn datetime_order() {
        let d = Date::from_ymd(1984, 2, 5).unwrap();
        let before = DateTime::new(d, 0, 18).unwrap();
        let at = DateTime::new(d, 0, 19).unwrap();
        let prev_day = DateTime::new(d + -1, 23, 59).unwrap();
        assert!(prev_day < before && before < at);
        assert_eq!((0, 19), (at.hour(), at.minute()));
        assert_eq!("1984-02-05T00:19", at.to_string());
        assert!(DateTime::new(d, 24, 0).is_none());
        assert!(DateTime::new(d, 23, 60).is_none());
    }

    #[test]
    fn civil_validation() {
        let civil = CivilDate {
            year: 2023,
            month: 2,
            day: 29,
            hour: 10,
            minute: 0,
            from_lunar: false,
        };
        assert!(matches!(civil.datetime(), Err(SajuError::InvalidDate(_))));
        assert_eq!(
            Err(SajuError::InvalidTime {
                hour: 24,
                minute: 0
            }),
            civil.with_time(24, 0).datetime()
        );
        let ok = CivilDate { day: 28, ..civil };
        let at = ok.datetime().unwrap();
        assert_eq!(ok, CivilDate::from_datetime(at, false));
        assert_eq!("2023-02-28T10:00", ok.to_string());
    }
}
