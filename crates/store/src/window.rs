//! Summary window durations
//!
//! Windows arrive as ISO-8601 duration strings (`PT10M`, `PT1H`,
//! `P1DT2H30M`) and are echoed back in canonical form by the summary
//! endpoint. Only the day/hour/minute/second designators are supported -
//! calendar units (years, months) have no fixed length and are rejected.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use crate::{Result, StoreError};

/// An aggregation window over the recent store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window(Duration);

impl Window {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn minutes(minutes: i64) -> Self {
        Self(Duration::minutes(minutes))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for Window {
    /// Ten minutes, the default summary window
    fn default() -> Self {
        Self::minutes(10)
    }
}

impl FromStr for Window {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let src = s.trim().to_uppercase();
        let rest = src
            .strip_prefix('P')
            .ok_or_else(|| StoreError::invalid_window(s, "must start with 'P'"))?;
        if rest.is_empty() {
            return Err(StoreError::invalid_window(s, "no components"));
        }

        let (date_part, time_part) = match rest.split_once('T') {
            Some((d, t)) => (d, t),
            None => (rest, ""),
        };

        let mut seconds: i64 = 0;
        seconds += parse_components(date_part, &[('D', 86_400)])
            .map_err(|reason| StoreError::invalid_window(s, reason))?;
        seconds += parse_components(time_part, &[('H', 3_600), ('M', 60), ('S', 1)])
            .map_err(|reason| StoreError::invalid_window(s, reason))?;

        if rest.contains('T') && time_part.is_empty() {
            return Err(StoreError::invalid_window(s, "'T' with no time components"));
        }

        Ok(Self(Duration::seconds(seconds)))
    }
}

/// Parse consecutive `<digits><designator>` components
///
/// Designators must appear in the given order, each at most once.
fn parse_components(part: &str, units: &[(char, i64)]) -> std::result::Result<i64, &'static str> {
    let mut total: i64 = 0;
    let mut digits = String::new();
    let mut next_unit = 0usize;

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return Err("designator without a value");
        }
        let pos = units[next_unit..]
            .iter()
            .position(|(unit, _)| *unit == c)
            .ok_or("unknown or out-of-order designator")?;
        let (_, factor) = units[next_unit + pos];
        next_unit += pos + 1;

        let value: i64 = digits.parse().map_err(|_| "value out of range")?;
        total = total
            .checked_add(value.checked_mul(factor).ok_or("value out of range")?)
            .ok_or("value out of range")?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err("trailing value without a designator");
    }
    Ok(total)
}

impl fmt::Display for Window {
    /// Canonical ISO-8601 form, e.g. `PT10M`, `P1DT2H`, `PT0S`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds();
        if total == 0 {
            return f.write_str("PT0S");
        }

        let days = total / 86_400;
        let hours = (total % 86_400) / 3_600;
        let minutes = (total % 3_600) / 60;
        let seconds = total % 60;

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if hours > 0 || minutes > 0 || seconds > 0 {
            f.write_str("T")?;
            if hours > 0 {
                write!(f, "{hours}H")?;
            }
            if minutes > 0 {
                write!(f, "{minutes}M")?;
            }
            if seconds > 0 {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}
