//! Four Pillars (사주, 四柱) charts from solar or lunar birth dates.
//!
//! A chart is four positions on the sexagenary cycle: the year, month, day
//! and hour pillars. Year and month follow the solar terms, so the crate
//! ships tabulated solar-term instants and lunar year layouts for 1900–2050
//! in Korea Standard Time, computed from modern astronomical series.
//!
//! # Examples
//!
//! Solar birth date:
//!
//! ```
//! use saju::{calculate_four_pillars, BirthRecord, ChartConfig, ZiHourRollover};
//!
//! let config = ChartConfig::new(ZiHourRollover::LateZi);
//! let chart = calculate_four_pillars(&BirthRecord::solar(1984, 2, 2, 10, 30), &config).unwrap();
//!
//! assert_eq!("丙寅", chart.day.to_string());
//! assert_eq!("癸亥年 乙丑月 丙寅日 癸巳時", chart.to_string());
//! ```
//!
//! Lunar birth date, with the solar date it resolved to:
//!
//! ```
//! use saju::{calculate_four_pillars, BirthRecord, ChartConfig, LunarDate, ZiHourRollover};
//!
//! let config = ChartConfig::new(ZiHourRollover::SameDay);
//! let birth = BirthRecord::lunar(LunarDate::new(2017, 5, 1, true), 9, 0);
//! let chart = calculate_four_pillars(&birth, &config).unwrap();
//!
//! assert_eq!("2017-06-24T09:00", chart.solar.to_string());
//! assert!(chart.solar.from_lunar);
//! ```
//!
//! Calendar conversion on its own:
//!
//! ```
//! use saju::Date;
//! use saju::calendar::{solar_to_lunar, Month::*};
//! use saju::tables;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let lunar = solar_to_lunar(tables::global(), date).unwrap();
//!
//! assert_eq!((1999, Common(11), 25), (lunar.year, lunar.month_name(), lunar.day));
//! ```

pub mod calendar;
pub mod chart;
pub mod config;
pub mod date;
pub mod error;
pub mod pillars;
pub mod sexagenary;
pub mod tables;

pub use calendar::{LunarDate, lunar_to_solar, solar_to_lunar};
pub use chart::{BirthDate, BirthRecord, Calculator, FlatChart, FourPillars, calculate_four_pillars};
pub use config::{ChartConfig, Config, ZiHourRollover};
pub use date::{CivilDate, Date, DateTime, YearType};
pub use error::{ConfigError, Result, SajuError, TableError};
pub use sexagenary::{Branch, Pillar, Stem};
