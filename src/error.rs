//! Error types.
//!
//! [`SajuError`] is what chart computation returns; [`TableError`] and
//! [`ConfigError`] only show up while loading reference data or settings.

use std::path::PathBuf;

use thiserror::Error;

use crate::sexagenary::{Branch, Stem};

/// Errors from calendar conversion and pillar derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SajuError {
    /// The date lies outside the range covered by the loaded tables.
    #[error("year {year} is outside the supported range {min}..={max}")]
    UnsupportedEra { year: i32, min: i32, max: i32 },

    /// The date does not exist in its calendar.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid time of day {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// Stem and branch of different polarity. Never produced by the cycle
    /// arithmetic itself; seeing this means a broken invariant.
    #[error("{stem}{branch} is not a sexagenary pillar")]
    InvalidPillar { stem: Stem, branch: Branch },
}

impl SajuError {
    /// Stable code for callers mapping errors onto their own responses.
    pub fn code(&self) -> &'static str {
        match self {
            SajuError::UnsupportedEra { .. } => "UNSUPPORTED_ERA",
            SajuError::InvalidDate(_) => "INVALID_DATE",
            SajuError::InvalidTime { .. } => "INVALID_TIME",
            SajuError::InvalidPillar { .. } => "INTERNAL_ERROR",
        }
    }

    /// `true` if the input was at fault, `false` for internal defects.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SajuError::InvalidPillar { .. })
    }
}

pub type Result<T> = std::result::Result<T, SajuError>;

/// Errors reading the lunar-year or solar-term tables.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("{table}, line {line}, field {field}: {reason}")]
    Parse {
        table: &'static str,
        line: usize,
        field: usize,
        reason: ParseReason,
    },

    #[error("{table}, line {line}: {message}")]
    Inconsistent {
        table: &'static str,
        line: usize,
        message: String,
    },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseReason {
    #[error("missing field")]
    MissingField,
    #[error("unexpected trailing field")]
    TrailingField,
    #[error("invalid integer {0:?}")]
    InvalidInt(String),
    #[error("invalid date {0:?}")]
    InvalidDate(String),
    #[error("invalid time {0:?}")]
    InvalidTime(String),
}

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot load tables: {0}")]
    Tables(#[from] TableError),
}
