use std::fmt;

use chrono::{Local, NaiveDateTime};

use crate::error::TypeError;

/// Layout of audit entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of document emission dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of wall-clock time.
///
/// Components never read the system clock directly; they are handed a
/// `Clock` so tests can pin the time.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// `YYYY-MM-DD HH:MM:SS`, as written into audit entries.
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// `YYYY-MM-DD`, as written into `fecha_emision`.
    fn today(&self) -> String {
        self.now().format(DATE_FORMAT).to_string()
    }
}

/// The process-local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` instant.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(Self::new)
            .map_err(|e| TypeError::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

impl fmt::Debug for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedClock({})", self.at.format(TIMESTAMP_FORMAT))
    }
}
