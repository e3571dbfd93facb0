use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::error::DoctorError;
use crate::models::DayCategory;
use crate::services::hours::OperatingHoursIndex;

/// How long the doctor gets to accept a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Added to `now` when the office is open and not at lunch.
    pub active_grace: Duration,
    /// Added to the end of lunch or the next opening time.
    pub opening_grace: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            active_grace: Duration::minutes(shared_config::DEFAULT_ACTIVE_HOURS_GRACE_MINUTES),
            opening_grace: Duration::minutes(shared_config::DEFAULT_OPENING_GRACE_MINUTES),
        }
    }
}

impl ExpiryPolicy {
    /// Out-of-range grace values in `config` are replaced by the defaults.
    pub fn from_config(config: &AppConfig) -> Self {
        let config = config.clone().validated();
        Self {
            active_grace: Duration::minutes(config.active_hours_grace_minutes),
            opening_grace: Duration::minutes(config.opening_grace_minutes),
        }
    }
}

/// Computes the instant after which a pending request can no longer be accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpiryCalculator {
    policy: ExpiryPolicy,
}

impl ExpiryCalculator {
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self { policy }
    }

    /// The deadline depends only on where `now` falls against today's hours:
    ///
    /// - open and at lunch: end of lunch + opening grace
    /// - open otherwise: `now` + active grace
    /// - before today's opening: today's opening + opening grace
    /// - closed for the rest of today: next day with hours, at opening + opening grace
    ///
    /// At most seven following days are scanned.
    pub fn compute_deadline(
        &self,
        index: &OperatingHoursIndex,
        now: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, DoctorError> {
        if !index.has_weekday_hours() {
            warn!("Doctor {} has no weekday hours to expire against", index.doctor_id());
            return Err(DoctorError::NoAvailability(index.doctor_id()));
        }

        let today = now.date_naive();
        let time = now.time();

        if let Some((opened, closed)) = index.bounds(DayCategory::from_weekday(now.weekday())) {
            if opened <= time && time <= closed {
                if let Some((_, lunch_closed)) = index
                    .lunch()
                    .filter(|lunch| lunch.contains(time))
                    .and_then(|lunch| lunch.bounds())
                {
                    debug!("Doctor {} at lunch, deadline after lunch", index.doctor_id());
                    return Ok(at_wall_clock(now, today, lunch_closed) + self.policy.opening_grace);
                }

                return Ok(now + self.policy.active_grace);
            }

            if time < opened {
                debug!("Doctor {} not open yet, deadline after opening", index.doctor_id());
                return Ok(at_wall_clock(now, today, opened) + self.policy.opening_grace);
            }
        }

        for offset in 1..=7 {
            let date = today + Duration::days(offset);
            if let Some((opened, _)) = index.bounds(DayCategory::from_weekday(date.weekday())) {
                debug!("Doctor {} next opens on {}", index.doctor_id(), date);
                return Ok(at_wall_clock(now, date, opened) + self.policy.opening_grace);
            }
        }

        Err(DoctorError::NoAvailability(index.doctor_id()))
    }
}

/// `date` at `time` on the same clock face as `now`.
fn at_wall_clock(now: DateTime<FixedOffset>, date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
    now + (date.and_time(time) - now.naive_local())
}
