//! Daily refresh arithmetic.
//!
//! The desktop scheduler sleeps until the next local midnight, re-renders the
//! tray icon and loops. The computation is generic over the time zone so it
//! can be tested against fixed offsets.

use chrono::{DateTime, Days, LocalResult, TimeZone};
use std::time::Duration;

/// The next midnight strictly after `now` in `now`'s time zone.
///
/// On DST transition days midnight can be skipped or ambiguous; the earliest
/// valid instant of the day is used, which keeps the refresh at-least-once.
pub fn next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let tomorrow = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("date within chrono's supported range");

    for hour in 0..=23 {
        let candidate = tomorrow.and_hms_opt(hour, 0, 0).unwrap();
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => continue,
        }
    }
    unreachable!("a day has at least one representable hour");
}

/// How long to sleep before the next refresh. Never zero.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    (next_midnight(now) - now.clone())
        .to_std()
        .unwrap_or(Duration::from_secs(1))
        .max(Duration::from_secs(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn midday_sleeps_until_tomorrow() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap();
        assert_eq!(until_next_midnight(&now), Duration::from_secs(12 * 3600));
    }

    #[test]
    fn just_before_midnight_is_short() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 23, 59, 59).unwrap();
        assert_eq!(until_next_midnight(&now), Duration::from_secs(1));
    }

    #[test]
    fn exactly_midnight_rolls_to_next_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        assert_eq!(until_next_midnight(&now), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn respects_fixed_offset_zones() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 2, 17, 18, 30, 0).unwrap();
        let next = next_midnight(&now);
        assert_eq!(next.to_rfc3339(), "2026-02-18T00:00:00+08:00");
    }

    #[test]
    fn month_and_year_boundaries() {
        let now = Utc.with_ymd_and_hms(2026, 12, 31, 6, 0, 0).unwrap();
        let next = next_midnight(&now);
        assert_eq!(next, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }
}
