use serde::{Deserialize, Serialize};

use crate::utils::consts::{BREAK_TIME, MINUTE, PRODUCTIVITY_TIME};

/// Productivity and break intervals, in seconds.
///
/// Values are not range checked; whoever writes them owns validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub productivity: u32,
    #[serde(rename = "break")]
    pub break_time: u32,
}

impl TimerSettings {
    pub fn new(productivity: u32, break_time: u32) -> Self {
        Self {
            productivity,
            break_time,
        }
    }

    /// `None` when either interval does not fit in `u32` seconds.
    pub fn from_minutes(productivity: u32, break_time: u32) -> Option<Self> {
        Some(Self::new(
            productivity.checked_mul(MINUTE)?,
            break_time.checked_mul(MINUTE)?,
        ))
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::new(PRODUCTIVITY_TIME, BREAK_TIME)
    }
}
