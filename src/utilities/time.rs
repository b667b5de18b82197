use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Local hours at which lights switch on and off.
pub const LIGHT_SWITCH_HOURS: [u32; 2] = [7, 19];

/// Every occurrence of the given local `hours` in `zone` within `[start, end]`, ascending.
pub fn hour_ticks(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hours: &[u32],
    zone: Tz,
) -> Vec<DateTime<Utc>> {
    let mut ticks = Vec::new();
    let last_day = end.with_timezone(&zone).date_naive();

    let mut day = start.with_timezone(&zone).date_naive();
    while day <= last_day {
        for &hour in hours {
            let tick = NaiveTime::from_hms_opt(hour, 0, 0)
                .and_then(|time| zone.from_local_datetime(&day.and_time(time)).earliest())
                .map(|local| local.with_timezone(&Utc));

            if let Some(tick) = tick.filter(|tick| (start..=end).contains(tick)) {
                ticks.push(tick);
            }
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    ticks.sort();
    ticks
}

/// Hours from `origin` to `time`, negative if `time` is earlier.
pub fn hours_since(origin: DateTime<Utc>, time: DateTime<Utc>) -> f64 {
    (time - origin).num_milliseconds() as f64 / 3_600_000.0
}

/// Inverse of [`hours_since`], to millisecond precision.
pub fn after_hours(origin: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    origin + TimeDelta::milliseconds((hours * 3_600_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 9, d, h, 0, 0).unwrap()
    }

    #[test]
    fn places_ticks_at_local_hours() {
        // CEST is UTC+2: 07:00 and 19:00 local are 05:00 and 17:00 UTC.
        let ticks = hour_ticks(utc(1, 0), utc(2, 12), &LIGHT_SWITCH_HOURS, chrono_tz::CET);
        assert_eq!(ticks, vec![utc(1, 5), utc(1, 17), utc(2, 5)]);
    }

    #[test]
    fn includes_ticks_on_the_bounds() {
        let ticks = hour_ticks(utc(1, 5), utc(1, 17), &LIGHT_SWITCH_HOURS, chrono_tz::CET);
        assert_eq!(ticks, vec![utc(1, 5), utc(1, 17)]);
    }

    #[test]
    fn converts_between_hours_and_times() {
        assert_eq!(hours_since(utc(1, 0), utc(1, 6)), 6.0);
        assert_eq!(hours_since(utc(1, 6), utc(1, 0)), -6.0);
        assert_eq!(after_hours(utc(1, 0), 1.5), utc(1, 1) + TimeDelta::minutes(30));
    }
}
