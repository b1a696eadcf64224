// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date-precision utilities.
//!
//! Pure functions that truncate, format, parse, offset and clamp a date at a
//! given [`Precision`]. None of them mutate their input; dates are `Copy`
//! and every function returns a new value.

use chrono::{Months, NaiveDateTime, TimeDelta};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::instant::{PreciseDate, TimeInstant};
use crate::precision::{Precision, Step};

/// Format of a fully padded date string; every precision is parsed in this
/// layout after its missing fields are filled in.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Year digits are padded to at least this width before parsing.
const YEAR_WIDTH: usize = 4;

/// Resets every field finer than `precision` to its zero point.
#[inline]
pub fn truncate_at_precision<T: TimeInstant>(date: T, precision: Precision) -> PreciseDate {
    PreciseDate::truncate(date, precision)
}

/// Renders `date` with the display format registered for `precision`.
///
/// `None` renders as the empty string, which widgets use for their
/// "no date" state. Years outside `0..=9999` carry an explicit sign.
///
/// ```
/// use chrono::NaiveDate;
/// use chronoframe::{format_at_precision, Precision};
///
/// let date = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap();
/// assert_eq!(format_at_precision(Some(date), Precision::YEAR), "1000");
/// assert_eq!(format_at_precision(None::<NaiveDate>, Precision::YEAR), "");
/// ```
pub fn format_at_precision<T: TimeInstant>(date: Option<T>, precision: Precision) -> String {
    match date {
        Some(date) => date
            .to_naive()
            .format(precision.display_format())
            .to_string(),
        None => String::new(),
    }
}

/// Parses `input` as a date at `precision`.
///
/// Accepts exactly the layout produced by [`format_at_precision`], except
/// that the year may be written with fewer than four digits and with an
/// optional leading `+` or `-`. Short year magnitudes are zero-padded and the
/// sign made explicit before the string reaches chrono, which otherwise
/// reads at most four unsigned year digits.
///
/// ```
/// use chronoframe::{parse_at_precision, Precision};
///
/// let date = parse_at_precision("-0050", Precision::YEAR).unwrap();
/// assert_eq!(date.year(), -50);
/// ```
pub fn parse_at_precision(input: &str, precision: Precision) -> Result<PreciseDate, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => ('-', &trimmed[1..]),
        b'+' => ('+', &trimmed[1..]),
        _ => ('+', trimmed),
    };
    let digits = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(ParseError::MissingYear {
            input: input.to_owned(),
        });
    }

    let (year, rest) = unsigned.split_at(digits);
    let normalized = format!(
        "{sign}{year:0>width$}{rest}{suffix}",
        width = YEAR_WIDTH,
        suffix = precision.parse_suffix()
    );

    match NaiveDateTime::parse_from_str(&normalized, PARSE_FORMAT) {
        Ok(date) => Ok(PreciseDate::truncate(date, precision)),
        Err(source) => {
            debug!(input, %precision, error = %source, "rejected date text");
            Err(ParseError::Pattern {
                input: input.to_owned(),
                precision,
                source,
            })
        }
    }
}

/// Shifts `date` by `amount` units of `precision`'s resolution.
///
/// Calendar units (years, months) clamp the day to the end of the target
/// month; the result is truncated at `precision` again. No range clamping
/// is applied.
pub fn offset_at_precision<T: TimeInstant>(
    date: T,
    precision: Precision,
    amount: i64,
) -> PreciseDate {
    let shifted = shift(date.to_naive(), precision.unit().step(), amount);
    PreciseDate::truncate(shifted, precision)
}

/// Returns `date` if it lies within `[min, max]`, else the nearer bound.
///
/// `min` must not be after `max`.
#[inline]
pub fn clamp_within_range<T: TimeInstant>(date: T, min: T, max: T) -> T {
    debug_assert!(min <= max, "clamp bounds out of order");
    if date < min {
        min
    } else if date > max {
        max
    } else {
        date
    }
}

/// Moves `date` by `amount` steps, saturating at chrono's representable
/// range.
pub(crate) fn shift(date: NaiveDateTime, step: Step, amount: i64) -> NaiveDateTime {
    let shifted = match step {
        Step::Months(per_unit) => i64::from(per_unit)
            .checked_mul(amount)
            .and_then(|months| {
                let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
                if months >= 0 {
                    date.checked_add_months(magnitude)
                } else {
                    date.checked_sub_months(magnitude)
                }
            }),
        Step::Millis(per_unit) => per_unit
            .checked_mul(amount)
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| date.checked_add_signed(delta)),
    };

    shifted.unwrap_or_else(|| {
        warn!(%date, ?step, amount, "date offset saturated");
        if amount < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn format_per_precision() {
        let date = NaiveDate::from_ymd_opt(2004, 2, 29)
            .unwrap()
            .and_hms_milli_opt(6, 7, 8, 9)
            .unwrap();
        let rendered: Vec<String> = Precision::all()
            .map(|p| format_at_precision(Some(date), p))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "2004",
                "2004-02",
                "2004-02-29",
                "2004-02-29T06",
                "2004-02-29T06:07",
                "2004-02-29T06:07:08",
                "2004-02-29T06:07:08.009",
            ]
        );
    }

    #[test]
    fn format_signs_out_of_range_years() {
        assert_eq!(
            format_at_precision(Some(ymd(-50, 1, 1)), Precision::YEAR),
            "-0050"
        );
        assert_eq!(
            format_at_precision(Some(ymd(10_000, 1, 1)), Precision::YEAR),
            "+10000"
        );
        assert_eq!(format_at_precision(Some(ymd(50, 1, 1)), Precision::YEAR), "0050");
    }

    #[test]
    fn format_none_is_empty() {
        assert_eq!(format_at_precision(None::<PreciseDate>, Precision::DAY), "");
    }

    #[test]
    fn parse_negative_year() {
        let date = parse_at_precision("-0050", Precision::YEAR).unwrap();
        assert_eq!(date.as_naive(), ymd(-50, 1, 1));
    }

    #[test]
    fn parse_pads_short_years() {
        assert_eq!(
            parse_at_precision("50", Precision::YEAR).unwrap().year(),
            50
        );
        assert_eq!(
            parse_at_precision("-5", Precision::YEAR).unwrap().year(),
            -5
        );
        assert_eq!(
            parse_at_precision("+812-03", Precision::MONTH)
                .unwrap()
                .as_naive(),
            ymd(812, 3, 1)
        );
    }

    #[test]
    fn parse_long_years() {
        let date = parse_at_precision("+10000", Precision::YEAR).unwrap();
        assert_eq!(date.year(), 10_000);
        let date = parse_at_precision("12345-06-07", Precision::DAY).unwrap();
        assert_eq!(date.as_naive(), ymd(12_345, 6, 7));
    }

    #[test]
    fn parse_trims_whitespace() {
        let date = parse_at_precision("  2001-05-06 ", Precision::DAY).unwrap();
        assert_eq!(date.as_naive(), ymd(2001, 5, 6));
    }

    #[test]
    fn parse_time_components() {
        let date = parse_at_precision("2001-05-06T07:08", Precision::MINUTE).unwrap();
        assert_eq!(date.as_naive().hour(), 7);
        assert_eq!(date.as_naive().minute(), 8);

        let date = parse_at_precision("2001-05-06T07:08:09.250", Precision::MILLISECOND).unwrap();
        assert_eq!(date.as_naive().nanosecond(), 250_000_000);
    }

    #[test]
    fn parse_rejects_wrong_layout() {
        assert!(matches!(
            parse_at_precision("2001-05", Precision::YEAR),
            Err(ParseError::Pattern { .. })
        ));
        assert!(matches!(
            parse_at_precision("2001", Precision::MONTH),
            Err(ParseError::Pattern { .. })
        ));
        assert!(matches!(
            parse_at_precision("2001-05-06T07", Precision::DAY),
            Err(ParseError::Pattern { .. })
        ));
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        let err = parse_at_precision("2001-02-29", Precision::DAY).unwrap_err();
        match err {
            ParseError::Pattern {
                input, precision, ..
            } => {
                assert_eq!(input, "2001-02-29");
                assert_eq!(precision, Precision::DAY);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(parse_at_precision("2001-13", Precision::MONTH).is_err());
    }

    #[test]
    fn parse_reports_missing_year_and_empty() {
        assert_eq!(parse_at_precision("   ", Precision::YEAR), Err(ParseError::Empty));
        assert_eq!(
            parse_at_precision("-x", Precision::YEAR),
            Err(ParseError::MissingYear { input: "-x".into() })
        );
        assert_eq!(
            parse_at_precision("abc", Precision::YEAR),
            Err(ParseError::MissingYear {
                input: "abc".into()
            })
        );
    }

    #[test]
    fn offset_years_and_months() {
        let date = ymd(2000, 1, 1);
        assert_eq!(
            offset_at_precision(date, Precision::YEAR, 3).as_naive(),
            ymd(2003, 1, 1)
        );
        assert_eq!(
            offset_at_precision(date, Precision::YEAR, -2001).as_naive(),
            ymd(-1, 1, 1)
        );
        assert_eq!(
            offset_at_precision(date, Precision::MONTH, -1).as_naive(),
            ymd(1999, 12, 1)
        );
    }

    #[test]
    fn offset_clamps_day_then_truncates() {
        let jan31 = ymd(2001, 1, 31);
        let shifted = offset_at_precision(jan31, Precision::DAY, 0);
        assert_eq!(shifted.as_naive(), jan31);
        let feb = shift(jan31, Precision::MONTH.unit().step(), 1);
        assert_eq!(feb, ymd(2001, 2, 28));
        assert_eq!(
            offset_at_precision(jan31, Precision::MONTH, 1).as_naive(),
            ymd(2001, 2, 1)
        );
    }

    #[test]
    fn offset_fixed_units() {
        let date = ymd(2000, 2, 28);
        assert_eq!(
            offset_at_precision(date, Precision::DAY, 2).as_naive(),
            ymd(2000, 3, 1)
        );
        let hour = offset_at_precision(date, Precision::HOUR, -1);
        assert_eq!(hour.as_naive().day(), 27);
        assert_eq!(hour.as_naive().hour(), 23);
    }

    #[test]
    fn offset_saturates() {
        let date = ymd(2000, 1, 1);
        let far = offset_at_precision(date, Precision::YEAR, i64::MAX);
        assert_eq!(far, truncate_at_precision(NaiveDateTime::MAX, Precision::YEAR));
        let past = offset_at_precision(date, Precision::DAY, -1_000_000_000_000);
        assert_eq!(past, truncate_at_precision(NaiveDateTime::MIN, Precision::DAY));
    }

    #[test]
    fn clamp_within_range_bounds() {
        let (min, max) = (ymd(2000, 1, 1), ymd(2005, 1, 1));
        assert_eq!(clamp_within_range(ymd(1990, 1, 1), min, max), min);
        assert_eq!(clamp_within_range(ymd(2010, 1, 1), min, max), max);
        assert_eq!(clamp_within_range(ymd(2003, 1, 1), min, max), ymd(2003, 1, 1));
        assert_eq!(clamp_within_range(min, min, min), min);
    }
}
