//! Trailing time window used to filter which comments count toward the
//! report. A period is written as a day count with a `d` suffix ("30d");
//! a quantity of zero means no lower bound at all.

use chrono::{DateTime, Duration, Utc};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    days: u32,
}

impl Period {
    /// Parse a period specification like "30d" or "0d".
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let spec = spec.trim();
        let Some(quantity) = spec.strip_suffix('d') else {
            return Err(ConfigError::PeriodUnit(spec.to_string()));
        };
        let days = quantity
            .parse::<u32>()
            .map_err(|_| ConfigError::PeriodQuantity(spec.to_string()))?;
        Ok(Self { days })
    }

    /// Whether `timestamp` falls inside the window ending at `now`.
    /// The cutoff comparison is strict: a record exactly `days` old is out.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if self.days == 0 {
            return true;
        }
        timestamp > now - Duration::days(i64::from(self.days))
    }
}
