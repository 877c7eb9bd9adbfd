//! The four-pillar chart of a birth record.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::calendar::{LunarDate, lunar_to_solar};
use crate::config::{ChartConfig, ZiHourRollover};
use crate::date::{CivilDate, Date, DateTime};
use crate::error::{Result, SajuError};
use crate::pillars::{day_pillar, hour_pillar, month_pillar, year_pillar};
use crate::sexagenary::{Branch, Pillar, Stem};
use crate::tables::{self, Tables};

/// Birth date in either calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthDate {
    Solar { year: i32, month: u32, day: u32 },
    Lunar(LunarDate),
}

/// Date and time of birth as entered, not yet validated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BirthRecord {
    pub date: BirthDate,
    pub hour: u32,
    pub minute: u32,
}

impl BirthRecord {
    pub fn solar(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            date: BirthDate::Solar { year, month, day },
            hour,
            minute,
        }
    }
    pub fn lunar(date: LunarDate, hour: u32, minute: u32) -> Self {
        Self {
            date: BirthDate::Lunar(date),
            hour,
            minute,
        }
    }
    pub fn is_lunar(&self) -> bool {
        matches!(self.date, BirthDate::Lunar(_))
    }
}

/// Year, month, day and hour pillars, with the solar date they were
/// computed from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub solar: CivilDate,
}

impl FourPillars {
    /// Year, month, day, hour.
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn to_flat(&self) -> FlatChart {
        FlatChart {
            year_stem: self.year.stem,
            year_branch: self.year.branch,
            month_stem: self.month.stem,
            month_branch: self.month.branch,
            day_stem: self.day.stem,
            day_branch: self.day.branch,
            hour_stem: self.hour.stem,
            hour_branch: self.hour.branch,
            solar_date: self.solar.to_string(),
            from_lunar: self.solar.from_lunar,
        }
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年 {}月 {}日 {}時",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// [`FourPillars`] flattened to eight symbols and the solar date.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FlatChart {
    pub year_stem: Stem,
    pub year_branch: Branch,
    pub month_stem: Stem,
    pub month_branch: Branch,
    pub day_stem: Stem,
    pub day_branch: Branch,
    pub hour_stem: Stem,
    pub hour_branch: Branch,
    /// `YYYY-MM-DDTHH:MM`
    pub solar_date: String,
    pub from_lunar: bool,
}

/// Computes charts against one set of tables and settings.
///
/// Holds only shared references and copies; any number of calculators may
/// run at once.
#[derive(Debug, Copy, Clone)]
pub struct Calculator<'t> {
    tables: &'t Tables,
    config: ChartConfig,
}

impl<'t> Calculator<'t> {
    pub fn new(tables: &'t Tables, config: ChartConfig) -> Self {
        Self { tables, config }
    }

    /// Computes the chart of `birth`.
    ///
    /// Fails on the first invalid input: time of day, then date, then the
    /// supported range of the tables. Never returns a partial chart.
    pub fn calculate(&self, birth: &BirthRecord) -> Result<FourPillars> {
        self.calculate_inner(birth).inspect_err(|e| {
            if let SajuError::InvalidPillar { .. } = e {
                error!(?birth, "{e}");
            }
        })
    }

    fn calculate_inner(&self, birth: &BirthRecord) -> Result<FourPillars> {
        let solar = self.resolve(birth)?;
        let at = solar.datetime()?;
        let year = year_pillar(self.tables, at)?;
        let month = month_pillar(self.tables, year.stem, at)?;
        let (day, hour) = self.day_and_hour(at)?;
        debug!(
            %solar, %year, %month, %day, %hour,
            zi_hour = %self.config.zi_hour,
            "chart computed"
        );
        Ok(FourPillars {
            year,
            month,
            day,
            hour,
            solar,
        })
    }

    /// The solar date and time of `birth`, converting lunar dates.
    pub fn resolve(&self, birth: &BirthRecord) -> Result<CivilDate> {
        if birth.hour > 23 || birth.minute > 59 {
            return Err(SajuError::InvalidTime {
                hour: birth.hour,
                minute: birth.minute,
            });
        }
        let solar = match birth.date {
            BirthDate::Solar { year, month, day } => {
                let range = self.tables.solar_term_range();
                if !range.contains(&year) {
                    return Err(SajuError::UnsupportedEra {
                        year,
                        min: *range.start(),
                        max: *range.end(),
                    });
                }
                CivilDate {
                    year,
                    month,
                    day,
                    hour: birth.hour,
                    minute: birth.minute,
                    from_lunar: false,
                }
            }
            BirthDate::Lunar(lunar) => {
                lunar_to_solar(self.tables, &lunar)?.with_time(birth.hour, birth.minute)
            }
        };
        solar.datetime()?;
        Ok(solar)
    }

    fn day_and_hour(&self, at: DateTime) -> Result<(Pillar, Pillar)> {
        let date = at.date();
        let (day_date, hour_date): (Date, Date) = if at.hour() < 23 {
            (date, date)
        } else {
            match self.config.zi_hour {
                ZiHourRollover::SameDay => (date, date),
                ZiHourRollover::NextDay => (date + 1, date + 1),
                ZiHourRollover::LateZi => (date, date + 1),
            }
        };
        let day = day_pillar(day_date);
        let hour = hour_pillar(day_pillar(hour_date).stem, at.hour(), at.minute())?;
        Ok((day, hour))
    }
}

/// Computes the chart of `birth` against the process-wide tables.
///
/// # Example
///
/// ```
/// use saju::{calculate_four_pillars, BirthRecord, ChartConfig, ZiHourRollover};
///
/// let birth = BirthRecord::solar(2000, 1, 1, 12, 0);
/// let chart = calculate_four_pillars(&birth, &ChartConfig::new(ZiHourRollover::SameDay)).unwrap();
/// assert_eq!("己卯年 丙子月 戊午日 戊午時", chart.to_string());
/// ```
pub fn calculate_four_pillars(birth: &BirthRecord, config: &ChartConfig) -> Result<FourPillars> {
    Calculator::new(tables::global(), *config).calculate(birth)
}
