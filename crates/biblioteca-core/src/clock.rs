use chrono::{Local, NaiveDateTime};

/// Format of the `created_at` / `updated_at` stamps written by biblioteca.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current instant for parsing and merging.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// The current instant formatted with [`TIMESTAMP_FORMAT`].
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant (for tests and reproducible imports).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Parse an instant written with [`TIMESTAMP_FORMAT`].
    pub fn parse(s: &str) -> crate::Result<Self> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|e| crate::Error::InvalidData(format!("bad timestamp {s:?}: {e}")))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
