//! Wall clock for pack timestamps, injectable so seeded packs compare
//! equal field-for-field in tests and replays.

use chrono::{DateTime, Utc};

pub trait PackClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl PackClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl PackClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
