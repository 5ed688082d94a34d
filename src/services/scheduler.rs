use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveTime, TimeZone};
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use crate::utils::eligibility::{claim_zone, now_in_claim_zone};
use crate::utils::logger::Logger;

/// Gap between the start of one pass and the next in cooldown mode.
pub fn cooldown() -> ChronoDuration {
    ChronoDuration::hours(24) + ChronoDuration::minutes(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once,
    /// Next pass starts 24h01m after the previous one started.
    Cooldown,
    /// Next pass starts at this time of day in the claim zone.
    Daily { at: NaiveTime },
}

impl Schedule {
    pub fn is_repeating(&self) -> bool {
        !matches!(self, Schedule::Once)
    }

    /// When to run the first pass if the user declined to run immediately.
    pub fn first_trigger(&self, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Schedule::Once => None,
            Schedule::Cooldown => Some(now + cooldown()),
            Schedule::Daily { at } => Some(next_daily_trigger(*at, now)),
        }
    }

    /// When to run again after a pass that started at `pass_started`.
    pub fn next_trigger(
        &self,
        pass_started: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> Option<DateTime<FixedOffset>> {
        match self {
            Schedule::Once => None,
            Schedule::Cooldown => Some(pass_started + cooldown()),
            Schedule::Daily { at } => Some(next_daily_trigger(*at, now)),
        }
    }
}

/// The first occurrence of `at` (claim zone) strictly after `now`.
pub fn next_daily_trigger(at: NaiveTime, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let zone = claim_zone();
    let local_now = now.with_timezone(&zone);
    let today = local_now.date_naive().and_time(at);
    // A fixed offset has exactly one mapping for every local time.
    let candidate = zone
        .from_local_datetime(&today)
        .single()
        .unwrap_or(local_now);
    if candidate > local_now {
        candidate
    } else {
        candidate + ChronoDuration::days(1)
    }
}

/// Time left until `target`, zero once it has passed.
pub fn time_until(target: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> Duration {
    (*target - *now).to_std().unwrap_or(Duration::ZERO)
}

/// Sleeps until `target`, redrawing the countdown line once a second.
///
/// Dropping the future cancels the wait. The wall clock is re-checked on
/// every tick so a suspended machine does not overshoot the trigger.
pub async fn wait_until(target: DateTime<FixedOffset>) {
    let deadline = Instant::now() + time_until(&target, &now_in_claim_zone());
    let sleep = sleep_until(deadline);
    tokio::pin!(sleep);

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut sleep => break,
            _ = ticker.tick() => {
                let now = now_in_claim_zone();
                if now >= target {
                    break;
                }
                Logger::countdown(time_until(&target, &now).as_secs(), &now, &target);
            }
        }
    }
    Logger::clear_line();
}
