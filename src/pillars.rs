//! Year, month, day and hour pillars.
//!
//! Each pillar is a position on the sexagenary cycle counted from a fixed
//! epoch (year, day) or from a starting stem looked up in a traditional
//! table (month, hour).

use crate::date::{Date, DateTime};
use crate::error::{Result, SajuError};
use crate::sexagenary::{Branch, Pillar, Stem, pillar_at};
use crate::tables::Tables;

/// 甲子 year. Years count from here, switching at 立春.
pub const YEAR_EPOCH: i32 = 1984;

/// JDN of 1984-01-31, a 甲子 day.
pub const DAY_EPOCH_JDN: u32 = 2_445_731;

/// Stem of the 寅 month (first month) by year stem mod 5.
///
/// 五虎遁 (年上起月法), as given in 淵海子平 and 三命通會:
/// 甲己之年丙作首，乙庚之歲戊為頭，丙辛必定尋庚起，丁壬壬位順行流，
/// 更有戊癸何方覓，甲寅之上好追求.
pub const MONTH_STEM_START: [Stem; 5] =
    [Stem::Byeong, Stem::Mu, Stem::Gyeong, Stem::Im, Stem::Gap];

/// Stem of the 子 hour by day stem mod 5.
///
/// 五鼠遁 (日上起時法), same sources: 甲己還加甲，乙庚丙作初，丙辛從戊起，
/// 丁壬庚子居，戊癸何方發，壬子是真途.
pub const HOUR_STEM_START: [Stem; 5] =
    [Stem::Gap, Stem::Byeong, Stem::Mu, Stem::Gyeong, Stem::Im];

/// Sexagenary year `year` (not the solar year: the year starts at 立春).
pub fn pillar_of_year(year: i32) -> Pillar {
    pillar_at((year - YEAR_EPOCH) as i64)
}

/// The sexagenary year in force at `at`: the solar year, or the one before
/// if `at` is earlier than that year's 立春.
pub fn effective_year(tables: &Tables, at: DateTime) -> Result<i32> {
    let year = at.date().gregorian().0;
    let spring = tables.solar_terms(year)?.start_of_spring();
    Ok(if at < spring { year - 1 } else { year })
}

/// Year pillar of the birth instant `at`.
///
/// # Example
///
/// ```
/// use saju::{tables, Date, DateTime};
/// use saju::pillars::year_pillar;
///
/// // 立春 1984 fell at 00:19 on February 5.
/// let date = Date::from_ymd(1984, 2, 5).unwrap();
/// let before = DateTime::new(date, 0, 18).unwrap();
/// let after = DateTime::new(date, 0, 19).unwrap();
/// assert_eq!("癸亥", year_pillar(tables::global(), before).unwrap().to_string());
/// assert_eq!("甲子", year_pillar(tables::global(), after).unwrap().to_string());
/// ```
pub fn year_pillar(tables: &Tables, at: DateTime) -> Result<Pillar> {
    Ok(pillar_of_year(effective_year(tables, at)?))
}

/// Month pillar of the birth instant `at` in a year with stem `year_stem`.
///
/// The month runs from one 節 to the next; its branch is fixed by the
/// segment (寅 from 立春) and its stem counts on from [`MONTH_STEM_START`].
pub fn month_pillar(tables: &Tables, year_stem: Stem, at: DateTime) -> Result<Pillar> {
    let segment = tables.boundary_before(at)?.segment();
    let first = Pillar::new(MONTH_STEM_START[year_stem.index() % 5], Branch::In)?;
    first.advance(segment as i64 - 1)
}

/// Day pillar of a solar date.
///
/// # Example
///
/// ```
/// use saju::Date;
/// use saju::pillars::day_pillar;
///
/// assert_eq!("丙寅", day_pillar(Date::from_ymd(1984, 2, 2).unwrap()).to_string());
/// ```
pub fn day_pillar(date: Date) -> Pillar {
    pillar_at(date.jdn() as i64 - DAY_EPOCH_JDN as i64)
}

/// Hour pillar for civil time `hour:minute` on a day with stem `day_stem`.
///
/// Which day's stem to pass for 23:00–23:59 depends on the
/// [`ZiHourRollover`](crate::config::ZiHourRollover) in use.
pub fn hour_pillar(day_stem: Stem, hour: u32, minute: u32) -> Result<Pillar> {
    if hour > 23 || minute > 59 {
        return Err(SajuError::InvalidTime { hour, minute });
    }
    let first = Pillar::new(HOUR_STEM_START[day_stem.index() % 5], Branch::Ja)?;
    first.advance(Branch::from_hour(hour).index() as i64)
}
