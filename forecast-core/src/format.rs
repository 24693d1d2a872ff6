//! Display labels for timestamps and order-preserving grouping.

use chrono::{DateTime, Datelike, TimeZone, Weekday};
use std::num::NonZeroUsize;

/// Weekday initial plus day of month, e.g. `W 17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLabel {
    pub weekday: &'static str,
    pub day_of_month: u32,
}

fn weekday_initial(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Su",
        Weekday::Mon => "M",
        Weekday::Tue => "T",
        Weekday::Wed => "W",
        Weekday::Thu => "R",
        Weekday::Fri => "F",
        Weekday::Sat => "Sa",
    }
}

/// Label for the calendar day of `ts` in its own time zone.
pub fn format_day_label<Tz: TimeZone>(ts: &DateTime<Tz>) -> DayLabel {
    DayLabel {
        weekday: weekday_initial(ts.weekday()),
        day_of_month: ts.day(),
    }
}

/// 24-hour clock time with zero-padded fields, e.g. `07:05`.
pub fn format_clock_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%H:%M").to_string()
}

/// Split `items` into consecutive groups of `size`; the last group holds the remainder.
pub fn chunk<T>(items: &[T], size: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(size.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn parse(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("valid timestamp")
    }

    fn n(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).expect("non-zero")
    }

    #[test]
    fn day_label_for_wednesday() {
        let label = format_day_label(&parse("2024-01-17T07:00:00-05:00"));
        assert_eq!(label, DayLabel { weekday: "W", day_of_month: 17 });
    }

    #[test]
    fn day_label_uses_timestamp_offset() {
        // 23:30 on Saturday locally is already Sunday in UTC.
        let local = parse("2024-03-02T23:30:00-05:00");
        assert_eq!(format_day_label(&local), DayLabel { weekday: "Sa", day_of_month: 2 });

        let utc = local.with_timezone(&Utc);
        assert_eq!(format_day_label(&utc), DayLabel { weekday: "Su", day_of_month: 3 });
    }

    #[test]
    fn weekday_initials_cover_week() {
        let initials: Vec<_> = (14..=20)
            .map(|d| format_day_label(&parse(&format!("2024-01-{d}T12:00:00+00:00"))).weekday)
            .collect();
        assert_eq!(initials, ["Su", "M", "T", "W", "R", "F", "Sa"]);
    }

    #[test]
    fn clock_time_is_24_hour_zero_padded() {
        assert_eq!(format_clock_time(&parse("2024-01-17T07:05:00-05:00")), "07:05");
        assert_eq!(format_clock_time(&parse("2024-01-17T19:00:00-05:00")), "19:00");
        assert_eq!(format_clock_time(&parse("2024-01-17T00:00:00+00:00")), "00:00");
    }

    #[test]
    fn chunk_concatenation_reproduces_input() {
        let input: Vec<u32> = (1..=12).collect();

        for size in 1..=13 {
            let groups = chunk(&input, n(size));
            let flat: Vec<u32> = groups.iter().flat_map(|g| g.iter().copied()).collect();
            assert_eq!(flat, input);

            let (last, full) = groups.split_last().expect("non-empty input");
            assert!(full.iter().all(|g| g.len() == size));
            assert!((1..=size).contains(&last.len()));
        }
    }

    #[test]
    fn chunk_keeps_remainder_in_last_group() {
        let groups = chunk(&["a", "b", "c", "d", "e"], n(2));
        assert_eq!(groups, vec![&["a", "b"][..], &["c", "d"][..], &["e"][..]]);
    }

    #[test]
    fn chunk_of_empty_is_empty() {
        let empty: [u8; 0] = [];
        assert!(chunk(&empty, n(4)).is_empty());
    }
}
