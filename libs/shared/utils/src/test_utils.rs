use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use shared_config::AppConfig;

/// Offset used by the test suites: a clinic running on UTC+09:00.
pub const TEST_OFFSET_MINUTES: i32 = 9 * 60;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub clinic_utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            clinic_utc_offset_minutes: TEST_OFFSET_MINUTES,
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            clinic_utc_offset_minutes: self.clinic_utc_offset_minutes,
            ..AppConfig::default()
        }
    }
}

pub fn test_offset() -> FixedOffset {
    TestConfig::default().to_app_config().clinic_offset()
}

/// `HH:MM` on the test clock face. Panics on malformed input.
pub fn hm(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").expect("time must be HH:MM")
}

/// Wall-clock `YYYY-MM-DD HH:MM` in the test clinic's offset.
pub fn local(value: &str) -> DateTime<FixedOffset> {
    let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .expect("datetime must be YYYY-MM-DD HH:MM");
    test_offset()
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offsets are never ambiguous")
}

/// Same as [`local`], as a UTC instant.
pub fn local_utc(value: &str) -> DateTime<Utc> {
    local(value).with_timezone(&Utc)
}

/// 2024-01-01 is a Monday; the test suites anchor their weeks on it.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}
