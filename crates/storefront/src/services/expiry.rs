//! Human-readable expiry buckets.
//!
//! Buckets are chosen on the unrounded hour difference. Rounding is applied
//! only to the number shown in the hours bucket, so a product 23.6 hours
//! from expiry reads "24 小時後到期" rather than "1 天後到期".

use std::fmt;

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const HOURS_PER_DAY: f64 = 24.0;

/// How close a product is to its expiry time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryStatus {
    /// Already past its expiry time.
    Expired,
    /// Less than half an hour left.
    Imminent,
    /// Under a day left; the rounded number of hours (1..=24).
    Hours(u32),
    /// At least a day left; whole days, truncated.
    Days(u32),
}

impl ExpiryStatus {
    /// Classify `expiry` relative to `now`.
    #[must_use]
    pub fn classify(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        #[allow(clippy::cast_precision_loss)] // millisecond spans far below 2^52
        let hours = (expiry - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;

        if hours < 0.0 {
            return Self::Expired;
        }
        if hours < HOURS_PER_DAY {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0.0..=24.0
            let shown = hours.round() as u32;
            // Under half an hour rounds to 0 and reads as imminent, never "0 小時後到期".
            return if shown == 0 {
                Self::Imminent
            } else {
                Self::Hours(shown)
            };
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // saturating cast
        let days = (hours / HOURS_PER_DAY).floor() as u32;
        Self::Days(days)
    }

    /// Whether the product can no longer be sold.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => f.write_str("已過期"),
            Self::Imminent => f.write_str("即將過期"),
            Self::Hours(n) => write!(f, "{n} 小時後到期"),
            Self::Days(n) => write!(f, "{n} 天後到期"),
        }
    }
}

/// Label for `expiry` as seen at `now`.
#[must_use]
pub fn format_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    ExpiryStatus::classify(expiry, now).to_string()
}
