use crate::error::{ExtractError, Result};
use chrono::{DateTime, Duration, Months, Offset, TimeZone};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

impl Unit {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "year" | "years" => Some(Unit::Year),
            "month" | "months" => Some(Unit::Month),
            "week" | "weeks" => Some(Unit::Week),
            "day" | "days" => Some(Unit::Day),
            "hour" | "hours" => Some(Unit::Hour),
            "minute" | "minutes" => Some(Unit::Minute),
            _ => None,
        }
    }
}

/// Elapsed time as rendered by the submission listing, e.g. `2 years, 3 weeks`.
///
/// Segments are optional but must appear in the order years, months, weeks,
/// days, hours, minutes, each at most once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl FromStr for RelativeTime {
    type Err = ExtractError;

    fn from_str(phrase: &str) -> Result<Self> {
        let error = || ExtractError::Parse(format!("relative time `{}`", phrase));

        // Commas and non-breaking spaces separate segments just like whitespace.
        let tokens: Vec<&str> = phrase
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() % 2 != 0 {
            return Err(error());
        }

        let mut parsed = RelativeTime::default();
        let mut previous: Option<Unit> = None;
        for segment in tokens.chunks(2) {
            if !segment[0].bytes().all(|b| b.is_ascii_digit()) {
                return Err(error());
            }
            let amount: u32 = segment[0].parse().map_err(|_| error())?;
            let unit = Unit::parse(segment[1]).ok_or_else(error)?;
            if previous.map_or(false, |previous| previous >= unit) {
                return Err(error());
            }
            previous = Some(unit);

            match unit {
                Unit::Year => parsed.years = amount,
                Unit::Month => parsed.months = amount,
                Unit::Week => parsed.weeks = amount,
                Unit::Day => parsed.days = amount,
                Unit::Hour => parsed.hours = amount,
                Unit::Minute => parsed.minutes = amount,
            }
        }

        Ok(parsed)
    }
}

impl RelativeTime {
    /// Returns the instant this amount of time before `now`.
    ///
    /// Years and months follow the calendar, the remaining units are exact.
    pub fn before<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<DateTime<Tz>> {
        let overflow = || ExtractError::Parse(format!("relative time {:?} out of range", self));

        let months = self
            .years
            .checked_mul(12)
            .and_then(|months| months.checked_add(self.months))
            .ok_or_else(overflow)?;

        let shifted = if months == 0 {
            Some(now)
        } else {
            sub_months(&now, months)
        };

        shifted
            .and_then(|time| time.checked_sub_signed(Duration::weeks(self.weeks.into())))
            .and_then(|time| time.checked_sub_signed(Duration::days(self.days.into())))
            .and_then(|time| time.checked_sub_signed(Duration::hours(self.hours.into())))
            .and_then(|time| time.checked_sub_signed(Duration::minutes(self.minutes.into())))
            .ok_or_else(overflow)
    }
}

/// Moves the wall-clock time of `now` back by `months` calendar months.
///
/// A time falling into a DST fold resolves to the earlier instant, one falling
/// into a DST gap keeps the UTC offset of `now`.
fn sub_months<Tz: TimeZone>(now: &DateTime<Tz>, months: u32) -> Option<DateTime<Tz>> {
    let naive = now.naive_local().checked_sub_months(Months::new(months))?;
    let timezone = now.timezone();

    match timezone.from_local_datetime(&naive).earliest() {
        Some(time) => Some(time),
        None => {
            let offset = Duration::seconds(now.offset().fix().local_minus_utc().into());
            let utc = naive.checked_sub_signed(offset)?;
            Some(timezone.from_utc_datetime(&utc))
        }
    }
}

/// Parses `phrase` and subtracts it from `now`.
pub fn parse_relative_time<Tz: TimeZone>(phrase: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>> {
    phrase.parse::<RelativeTime>()?.before(now)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Utc};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 3, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn empty_phrase_is_now() {
        assert_eq!(parse_relative_time("", anchor()).unwrap(), anchor());
    }

    #[test]
    fn exact_units_are_summed() {
        let time = parse_relative_time("1 week 2 days 3 hours 4 minutes", anchor()).unwrap();
        let expected = anchor()
            - Duration::weeks(1)
            - Duration::days(2)
            - Duration::hours(3)
            - Duration::minutes(4);
        assert_eq!(time, expected);
    }

    #[test]
    fn singular_and_plural_units() {
        assert_eq!(
            parse_relative_time("1 day", anchor()).unwrap(),
            anchor() - Duration::days(1)
        );
        assert_eq!(
            parse_relative_time("2 days", anchor()).unwrap(),
            anchor() - Duration::days(2)
        );
    }

    #[test]
    fn calendar_units() {
        let time = parse_relative_time("2 years 3 months", anchor()).unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2014, 12, 15, 12, 30, 0).unwrap());
    }

    #[test]
    fn separators_as_rendered_by_the_service() {
        let time = parse_relative_time("1 year,\u{a0}2 weeks", anchor()).unwrap();
        let expected = Utc.with_ymd_and_hms(2016, 3, 15, 12, 30, 0).unwrap() - Duration::weeks(2);
        assert_eq!(time, expected);

        let spaced = parse_relative_time("  3   hours   ", anchor()).unwrap();
        assert_eq!(spaced, anchor() - Duration::hours(3));
    }

    #[test]
    fn parsed_segments() {
        let parsed: RelativeTime = "2 years 3 weeks".parse().unwrap();
        assert_eq!(
            parsed,
            RelativeTime {
                years: 2,
                weeks: 3,
                ..Default::default()
            }
        );
    }

    #[test]
    fn malformed_phrases() {
        for phrase in [
            "2",
            "days",
            "2 fortnights",
            "2 days ago",
            "two days",
            "3 days 2 weeks",
            "1 day 1 day",
            "99999999999 days",
        ] {
            assert!(
                matches!(
                    parse_relative_time(phrase, anchor()),
                    Err(ExtractError::Parse(_))
                ),
                "{} should be rejected",
                phrase
            );
        }
    }

    /// Eastern time of 2017: DST starts 03-12 02:00 and ends 11-05 02:00.
    #[derive(Debug, Clone, Copy)]
    struct Eastern;

    impl Eastern {
        fn est() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn edt() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2017, month, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for Eastern {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Eastern
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(Eastern::est())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < Eastern::at(3, 12, 2) {
                LocalResult::Single(Eastern::est())
            } else if *local < Eastern::at(3, 12, 3) {
                LocalResult::None
            } else if *local < Eastern::at(11, 5, 1) {
                LocalResult::Single(Eastern::edt())
            } else if *local < Eastern::at(11, 5, 2) {
                LocalResult::Ambiguous(Eastern::edt(), Eastern::est())
            } else {
                LocalResult::Single(Eastern::est())
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            Eastern::est()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc >= Eastern::at(3, 12, 7) && *utc < Eastern::at(11, 5, 6) {
                Eastern::edt()
            } else {
                Eastern::est()
            }
        }
    }

    #[test]
    fn month_landing_in_dst_gap() {
        let now = Eastern.with_ymd_and_hms(2017, 4, 12, 2, 30, 0).unwrap();
        let time = parse_relative_time("1 month", now).unwrap();

        let expected = Eastern::edt().with_ymd_and_hms(2017, 3, 12, 2, 30, 0).unwrap();
        assert_eq!(time, expected);
    }

    #[test]
    fn month_landing_in_dst_fold() {
        let now = Eastern.with_ymd_and_hms(2017, 12, 5, 1, 30, 0).unwrap();
        let time = parse_relative_time("1 month", now).unwrap();

        let expected = Eastern::edt().with_ymd_and_hms(2017, 11, 5, 1, 30, 0).unwrap();
        assert_eq!(time, expected);
    }

    #[test]
    fn years_across_dst_keep_wall_clock() {
        let now = Eastern.with_ymd_and_hms(2017, 12, 5, 9, 0, 0).unwrap();
        let time = parse_relative_time("0 years 5 months", now).unwrap();

        assert_eq!(time.naive_local(), Eastern::at(7, 5, 9));
        assert_eq!(time.offset(), &Eastern::edt());
    }
}
