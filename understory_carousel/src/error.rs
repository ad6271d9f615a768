// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration validation errors.

use core::fmt;

/// A configuration value the carousel refuses to run with.
///
/// Values are never clamped into range: an out-of-range option is a caller
/// bug and is reported with the field that carried it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `tile_count` was zero.
    EmptyStrip,
    /// A value was NaN or infinite.
    NonFinite {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value that must be positive was zero or negative.
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value that must not be negative was negative.
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value fell outside its allowed closed range.
    OutOfRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Smallest allowed value.
        min: f64,
        /// Largest allowed value.
        max: f64,
    },
}

impl ConfigError {
    /// Dotted path of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyStrip => "layout.tile_count",
            Self::NonFinite { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStrip => write!(f, "layout.tile_count must be at least 1"),
            Self::NonFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}], got {value}"),
        }
    }
}

impl core::error::Error for ConfigError {}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigError> {
    let value = finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
