//! Calendar-aware duration with three independent components.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::parser::parse_interval;
use crate::types::WireType;

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A duration stored as months, days and nanoseconds.
///
/// The components are never normalized into one another: thirteen months
/// stay thirteen months and 25 hours stay 25 hours. Years and weeks have no
/// storage of their own; they are views over months and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    months: i32,
    days: i32,
    nanos: i64,
}

impl Interval {
    pub fn new(months: i32, days: i32, nanos: i64) -> Self {
        Self {
            months,
            days,
            nanos,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_years(years: i32) -> CodecResult<Self> {
        Ok(Self::new(scale_i32(years, 12)?, 0, 0))
    }

    pub fn from_months(months: i32) -> Self {
        Self::new(months, 0, 0)
    }

    pub fn from_weeks(weeks: i32) -> CodecResult<Self> {
        Ok(Self::new(0, scale_i32(weeks, 7)?, 0))
    }

    pub fn from_days(days: i32) -> Self {
        Self::new(0, days, 0)
    }

    pub fn from_hours(hours: i64) -> CodecResult<Self> {
        Ok(Self::new(0, 0, scale_i64(hours, 3600 * NANOS_PER_SECOND)?))
    }

    pub fn from_minutes(minutes: i64) -> CodecResult<Self> {
        Ok(Self::new(0, 0, scale_i64(minutes, 60 * NANOS_PER_SECOND)?))
    }

    pub fn from_seconds(seconds: i64) -> CodecResult<Self> {
        Ok(Self::new(0, 0, scale_i64(seconds, NANOS_PER_SECOND)?))
    }

    pub fn from_milliseconds(milliseconds: i64) -> CodecResult<Self> {
        Ok(Self::new(0, 0, scale_i64(milliseconds, NANOS_PER_MILLI)?))
    }

    pub fn from_microseconds(microseconds: i64) -> CodecResult<Self> {
        Ok(Self::new(0, 0, scale_i64(microseconds, NANOS_PER_MICRO)?))
    }

    pub fn from_nanoseconds(nanoseconds: i64) -> Self {
        Self::new(0, 0, nanoseconds)
    }

    /// Whole years in the months component.
    pub fn years(&self) -> i32 {
        self.months / 12
    }

    pub fn months(&self) -> i32 {
        self.months
    }

    /// Whole weeks in the days component.
    pub fn weeks(&self) -> i32 {
        self.days / 7
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    /// Whole seconds in the nanoseconds component.
    pub fn seconds(&self) -> i64 {
        self.nanos / NANOS_PER_SECOND
    }

    pub fn milliseconds(&self) -> i64 {
        self.nanos / NANOS_PER_MILLI
    }

    pub fn microseconds(&self) -> i64 {
        self.nanos / NANOS_PER_MICRO
    }

    pub fn nanoseconds(&self) -> i64 {
        self.nanos
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.nanos == 0
    }

    /// True when at least one component is positive and none is negative.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.months >= 0 && self.days >= 0 && self.nanos >= 0
    }

    /// True when at least one component is negative and none is positive.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.months <= 0 && self.days <= 0 && self.nanos <= 0
    }

    /// Component-wise absolute value. Fails when a component is at its
    /// storage minimum.
    pub fn abs(&self) -> CodecResult<Self> {
        match (
            self.months.checked_abs(),
            self.days.checked_abs(),
            self.nanos.checked_abs(),
        ) {
            (Some(months), Some(days), Some(nanos)) => Ok(Self::new(months, days, nanos)),
            _ => Err(self.sign_overflow()),
        }
    }

    /// Component-wise negation. Fails when a component is at its storage
    /// minimum.
    pub fn negate(&self) -> CodecResult<Self> {
        match (
            self.months.checked_neg(),
            self.days.checked_neg(),
            self.nanos.checked_neg(),
        ) {
            (Some(months), Some(days), Some(nanos)) => Ok(Self::new(months, days, nanos)),
            _ => Err(self.sign_overflow()),
        }
    }

    fn sign_overflow(&self) -> CodecError {
        CodecError::range(
            WireType::Interval,
            self,
            Self::new(-i32::MAX, -i32::MAX, -i64::MAX),
            Self::new(i32::MAX, i32::MAX, i64::MAX),
        )
    }
}

fn scale_i32(value: i32, factor: i32) -> CodecResult<i32> {
    value
        .checked_mul(factor)
        .ok_or_else(|| CodecError::range(WireType::Interval, value, i32::MIN / factor, i32::MAX / factor))
}

fn scale_i64(value: i64, factor: i64) -> CodecResult<i64> {
    value
        .checked_mul(factor)
        .ok_or_else(|| CodecError::range(WireType::Interval, value, i64::MIN / factor, i64::MAX / factor))
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.months
            .cmp(&other.months)
            .then(self.days.cmp(&other.days))
            .then(self.nanos.cmp(&other.nanos))
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // P[nY][nM][nD][T[nH][nM][n[.f]S]], each section carrying its own sign
        if self.is_zero() {
            return write!(f, "PT0S");
        }

        write!(f, "P")?;

        let years = self.months / 12;
        let months = self.months % 12;
        if years != 0 {
            write!(f, "{}Y", years)?;
        }
        if months != 0 {
            write!(f, "{}M", months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }

        if self.nanos == 0 {
            return Ok(());
        }

        let total_seconds = self.nanos / NANOS_PER_SECOND;
        let fraction = self.nanos % NANOS_PER_SECOND;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        write!(f, "T")?;
        if hours != 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes != 0 {
            write!(f, "{}M", minutes)?;
        }
        if seconds != 0 || fraction != 0 {
            let sign = if self.nanos < 0 { "-" } else { "" };
            write!(f, "{}{}", sign, seconds.abs())?;
            if fraction != 0 {
                let digits = format!("{:09}", fraction.abs());
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            write!(f, "S")?;
        }

        Ok(())
    }
}

impl FromStr for Interval {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_interval(s)
    }
}
