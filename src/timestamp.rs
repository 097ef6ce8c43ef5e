use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock time of a loan event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Timestamp {
    /// Seconds since Unix epoch
    pub seconds: u64,
    /// Nanoseconds part
    pub nanos: u32,
}

impl Timestamp {
    /// Read the current system time
    ///
    /// A clock set before the Unix epoch reads as the epoch itself.
    #[must_use]
    pub fn now() -> Self {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self { seconds: since_epoch.as_secs(), nanos: since_epoch.subsec_nanos() }
    }
}
