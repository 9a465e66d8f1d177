//! Daily wall-clock scheduling.
//!
//! Each sweep loop computes the next occurrence of its fixed local time
//! (today if still ahead, tomorrow otherwise), sleeps until then, runs
//! once, and repeats. Runs missed while the process was down are not
//! replayed: the contract is at most once per day, not guaranteed
//! delivery.

use chrono::{DateTime, Duration, Local, NaiveDate};
use lotworks_shared::config::JobTime;
use tracing::debug;

/// Computes the next occurrence of `time` strictly after `now`.
#[must_use]
pub fn next_occurrence(now: DateTime<Local>, time: JobTime) -> DateTime<Local> {
    let mut date = now.date_naive();
    loop {
        if let Some(candidate) = at_local(date, time) {
            if candidate > now {
                return candidate;
            }
        }
        // Already past today's target (or the local time does not exist,
        // e.g. inside a DST gap): try the next day.
        date += Duration::days(1);
    }
}

fn at_local(date: NaiveDate, time: JobTime) -> Option<DateTime<Local>> {
    date.and_hms_opt(time.hour, time.minute, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// Runs `job` once per day at the given local time, forever.
///
/// The loop suspends only while sleeping toward the next trigger; a job
/// run is never preempted and the loop never runs concurrently with
/// itself.
pub async fn run_daily<F, Fut>(name: &'static str, time: JobTime, job: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Local::now();
        let target = next_occurrence(now, time);
        let wait = (target - now)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        debug!(job = name, target = %target, "sleeping until next run");
        tokio::time::sleep(wait).await;

        job().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_target_still_ahead_today() {
        let now = local(2026, 8, 7, 8, 15);
        let next = next_occurrence(now, JobTime { hour: 9, minute: 0 });
        assert_eq!(next, local(2026, 8, 7, 9, 0));
    }

    #[test]
    fn test_target_already_past_rolls_to_tomorrow() {
        let now = local(2026, 8, 7, 21, 30);
        let next = next_occurrence(now, JobTime { hour: 21, minute: 0 });
        assert_eq!(next, local(2026, 8, 8, 21, 0));
    }

    #[test]
    fn test_exact_target_time_rolls_to_tomorrow() {
        let now = local(2026, 8, 7, 9, 0);
        let next = next_occurrence(now, JobTime { hour: 9, minute: 0 });
        assert_eq!(next, local(2026, 8, 8, 9, 0));
    }
}
