//! Chart settings, loadable from TOML.
//!
//! ```toml
//! [chart]
//! zi_hour = "late-zi"
//!
//! [tables]
//! lunar_years = "data/lunar_years.txt"
//! solar_terms = "data/solar_terms.txt"
//! ```
//!
//! `[chart]` is required; there is no default [`ZiHourRollover`]. Relative
//! table paths are resolved against the directory of the config file.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::tables::Tables;

/// How the 子 hour starting at 23:00 relates to the day pillar.
///
/// Traditions disagree, so callers must pick one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ZiHourRollover {
    /// The day changes at 23:00: day pillar and hour stem both follow the
    /// next day.
    NextDay,
    /// The day changes at midnight: 23:00–23:59 uses the civil day for both.
    SameDay,
    /// 夜子時: the day pillar stays on the civil day, the hour stem is taken
    /// from the next day.
    LateZi,
}

impl ZiHourRollover {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiHourRollover::NextDay => "next-day",
            ZiHourRollover::SameDay => "same-day",
            ZiHourRollover::LateZi => "late-zi",
        }
    }
}

impl Display for ZiHourRollover {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub zi_hour: ZiHourRollover,
}

impl ChartConfig {
    pub fn new(zi_hour: ZiHourRollover) -> Self {
        Self { zi_hour }
    }
}

/// External table files replacing the embedded ones.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    pub lunar_years: PathBuf,
    pub solar_terms: PathBuf,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub chart: ChartConfig,
    pub tables: Option<TablesConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let (Some(tables), Some(dir)) = (config.tables.as_mut(), path.parent()) {
            tables.lunar_years = dir.join(&tables.lunar_years);
            tables.solar_terms = dir.join(&tables.solar_terms);
        }
        info!(path = %path.display(), zi_hour = %config.chart.zi_hour, "config loaded");
        Ok(config)
    }

    /// # Example
    ///
    /// ```
    /// use saju::config::{Config, ZiHourRollover};
    ///
    /// let config = Config::from_toml_str("[chart]\nzi_hour = \"same-day\"\n").unwrap();
    /// assert_eq!(ZiHourRollover::SameDay, config.chart.zi_hour);
    /// assert!(config.tables.is_none());
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The external tables if configured, otherwise the embedded ones.
    pub fn load_tables(&self) -> Result<Tables, ConfigError> {
        let tables = match &self.tables {
            Some(t) => Tables::from_files(&t.lunar_years, &t.solar_terms)?,
            None => Tables::builtin()?,
        };
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover_names() {
        for (std, rule) in [
            ("next-day", ZiHourRollover::NextDay),
            ("same-day", ZiHourRollover::SameDay),
            ("late-zi", ZiHourRollover::LateZi),
        ] {
            assert_eq!(std, rule.to_string());
            let config = Config::from_toml_str(&format!("[chart]\nzi_hour = \"{std}\"")).unwrap();
            assert_eq!(rule, config.chart.zi_hour);
        }
    }

    #[test]
    fn rejects_bad_config() {
        for raw in [
            "",
            "[chart]\n",
            "[chart]\nzi_hour = \"midnight\"\n",
            "[chart]\nzi_hour = \"late-zi\"\ntimezone = 9\n",
            "[chart]\nzi_hour = \"late-zi\"\n[tables]\nlunar_years = \"a.txt\"\n",
        ] {
            assert!(
                matches!(Config::from_toml_str(raw), Err(ConfigError::Toml(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn from_file_resolves_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saju.toml");
        std::fs::write(
            &path,
            "[chart]\nzi_hour = \"next-day\"\n\n\
             [tables]\nlunar_years = \"lunar.txt\"\nsolar_terms = \"terms.txt\"\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        let tables = config.tables.as_ref().unwrap();
        assert_eq!(dir.path().join("lunar.txt"), tables.lunar_years);
        assert!(matches!(
            config.load_tables(),
            Err(ConfigError::Tables(crate::error::TableError::Io { .. }))
        ));

        std::fs::write(
            dir.path().join("lunar.txt"),
            "1984 1984-02-02 10  30 29 30 30 29 29 30 29 29 30 29 30 30\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("terms.txt"),
            "1984 01-06T12:41 01-21T06:05 02-05T00:19 02-19T20:16 \
                03-05T18:25 03-20T19:24 04-04T23:22 04-20T06:38 05-05T16:51 \
                05-21T05:58 06-05T21:09 06-21T14:02 07-07T07:29 07-23T00:58 \
                08-07T17:18 08-23T08:00 09-07T20:10 09-23T05:33 10-08T11:42 \
                10-23T14:46 11-07T14:45 11-22T12:11 12-07T07:28 12-22T01:23\n",
        )
        .unwrap();
        let tables = config.load_tables().unwrap();
        assert_eq!(1984..=1984, tables.lunar_range());
        assert_eq!(1984..=1984, tables.solar_term_range());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builtin_tables_by_default() {
        let config = Config {
            chart: ChartConfig::new(ZiHourRollover::LateZi),
            tables: None,
        };
        assert_eq!(1900..=2050, config.load_tables().unwrap().lunar_range());
    }
}
