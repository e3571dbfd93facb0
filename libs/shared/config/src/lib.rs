use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use tracing::warn;

pub const DEFAULT_ACTIVE_HOURS_GRACE_MINUTES: i64 = 20;
pub const DEFAULT_OPENING_GRACE_MINUTES: i64 = 15;
pub const DEFAULT_PORT: u16 = 3000;

/// Grace periods are between one minute and one day.
pub const GRACE_MINUTES_RANGE: RangeInclusive<i64> = 1..=24 * 60;
/// Offsets must stay strictly inside one day either side of UTC.
pub const UTC_OFFSET_MINUTES_RANGE: RangeInclusive<i32> = -(24 * 60 - 1)..=24 * 60 - 1;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Offset of the clinic's wall clock from UTC, in minutes.
    pub clinic_utc_offset_minutes: i32,
    pub active_hours_grace_minutes: i64,
    pub opening_grace_minutes: i64,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            clinic_utc_offset_minutes: 0,
            active_hours_grace_minutes: DEFAULT_ACTIVE_HOURS_GRACE_MINUTES,
            opening_grace_minutes: DEFAULT_OPENING_GRACE_MINUTES,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, falling back to in-memory storage");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            clinic_utc_offset_minutes: parse_env("CLINIC_UTC_OFFSET_MINUTES", 0),
            active_hours_grace_minutes: parse_env(
                "ACTIVE_HOURS_GRACE_MINUTES",
                DEFAULT_ACTIVE_HOURS_GRACE_MINUTES,
            ),
            opening_grace_minutes: parse_env("OPENING_GRACE_MINUTES", DEFAULT_OPENING_GRACE_MINUTES),
            port: parse_env("PORT", DEFAULT_PORT),
        }
        .validated();

        if !config.is_configured() {
            warn!("Supabase not configured - records will not survive a restart");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    /// Replace out-of-range offset and grace values with their defaults.
    pub fn validated(self) -> Self {
        Self {
            clinic_utc_offset_minutes: within(
                "CLINIC_UTC_OFFSET_MINUTES",
                self.clinic_utc_offset_minutes,
                0,
                UTC_OFFSET_MINUTES_RANGE,
            ),
            active_hours_grace_minutes: within(
                "ACTIVE_HOURS_GRACE_MINUTES",
                self.active_hours_grace_minutes,
                DEFAULT_ACTIVE_HOURS_GRACE_MINUTES,
                GRACE_MINUTES_RANGE,
            ),
            opening_grace_minutes: within(
                "OPENING_GRACE_MINUTES",
                self.opening_grace_minutes,
                DEFAULT_OPENING_GRACE_MINUTES,
                GRACE_MINUTES_RANGE,
            ),
            ..self
        }
    }

    /// The clinic's wall-clock offset. Out-of-range values fall back to UTC.
    pub fn clinic_offset(&self) -> FixedOffset {
        self.clinic_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!(
                    "CLINIC_UTC_OFFSET_MINUTES={} is out of range, using UTC",
                    self.clinic_utc_offset_minutes
                );
                Utc.fix()
            })
    }
}

fn within<T>(key: &str, value: T, default: T, range: RangeInclusive<T>) -> T
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        value
    } else {
        warn!(
            "{}={} is outside {}..={}, using default {}",
            key,
            value,
            range.start(),
            range.end(),
            default
        );
        default
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
