use chrono::{Duration, Months, NaiveDate, Weekday};

/// Unit of a relative period token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
}

/// A parsed period token describing a date window relative to a reference
/// day ("today" for interactive callers).
///
/// The grammar is `sign digits unit` with `sign` one of `+`/`-`, one or
/// more decimal digits, and a unit of `D`, `W` or `M` (case-insensitive),
/// plus the reserved keywords `ALL`, `WEEK` and `FUTURE`. Callers that
/// handle raw user input screen tokens with [`Period::is_valid`] first;
/// [`Period::parse`] treats a malformed token as a caller bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    CurrentWeek,
    Future,
    Relative {
        forward: bool,
        magnitude: u32,
        unit: PeriodUnit,
    },
}

/// Inclusive date range with optional bounds; `None` means unbounded on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        true
    }
}

impl Period {
    /// Whether `token` conforms to the period grammar. This is the check
    /// the command layer runs on raw input before calling [`Period::parse`].
    pub fn is_valid(token: &str) -> bool {
        let token = token.trim();
        if is_keyword(token) {
            return true;
        }
        match split_signed(token) {
            Some((_, digits, unit)) => {
                digits.parse::<u32>().is_ok() && parse_unit(unit).is_some()
            }
            None => false,
        }
    }

    /// Parse a pre-screened token. Panics on any token outside the grammar,
    /// in particular on units other than D/W/M: an invalid token reaching
    /// this layer is a bug in the caller, not user input.
    pub fn parse(token: &str) -> Period {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("ALL") {
            return Period::All;
        }
        if trimmed.eq_ignore_ascii_case("WEEK") {
            return Period::CurrentWeek;
        }
        if trimmed.eq_ignore_ascii_case("FUTURE") {
            return Period::Future;
        }

        let (forward, digits, unit) = split_signed(trimmed)
            .unwrap_or_else(|| panic!("malformed period token '{token}'"));
        let magnitude: u32 = digits
            .parse()
            .unwrap_or_else(|_| panic!("malformed period magnitude in '{token}'"));
        let unit = parse_unit(unit).unwrap_or_else(|| {
            panic!("invalid period unit '{unit}' in '{token}': expected D, W or M")
        });

        Period::Relative {
            forward,
            magnitude,
            unit,
        }
    }

    /// Resolve the period against a reference day. `+0D` and `-0D` both
    /// collapse to [reference, reference].
    pub fn window(&self, reference: NaiveDate) -> DateWindow {
        match *self {
            Period::All => DateWindow {
                start: None,
                end: None,
            },
            Period::Future => DateWindow {
                start: Some(reference),
                end: None,
            },
            Period::CurrentWeek => {
                let week = reference.week(Weekday::Mon);
                DateWindow {
                    start: Some(week.first_day()),
                    end: Some(week.last_day()),
                }
            }
            Period::Relative {
                forward,
                magnitude,
                unit,
            } => {
                let shifted = shift(reference, forward, magnitude, unit);
                if forward {
                    DateWindow {
                        start: Some(reference),
                        end: Some(shifted),
                    }
                } else {
                    DateWindow {
                        start: Some(shifted),
                        end: Some(reference),
                    }
                }
            }
        }
    }
}

fn is_keyword(token: &str) -> bool {
    token.eq_ignore_ascii_case("ALL")
        || token.eq_ignore_ascii_case("WEEK")
        || token.eq_ignore_ascii_case("FUTURE")
}

/// Split `±<digits><unit>` into its parts. The sign must be the first
/// character; digits must be non-empty.
fn split_signed(token: &str) -> Option<(bool, &str, &str)> {
    let forward = match token.chars().next()? {
        '+' => true,
        '-' => false,
        _ => return None,
    };
    let body = &token[1..];
    let digit_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (digits, unit) = body.split_at(digit_end);
    if digits.is_empty() {
        return None;
    }
    Some((forward, digits, unit))
}

fn parse_unit(unit: &str) -> Option<PeriodUnit> {
    match unit {
        "D" | "d" => Some(PeriodUnit::Day),
        "W" | "w" => Some(PeriodUnit::Week),
        "M" | "m" => Some(PeriodUnit::Month),
        _ => None,
    }
}

fn shift(reference: NaiveDate, forward: bool, magnitude: u32, unit: PeriodUnit) -> NaiveDate {
    match unit {
        PeriodUnit::Day => shift_days(reference, forward, i64::from(magnitude)),
        PeriodUnit::Week => shift_days(reference, forward, i64::from(magnitude) * 7),
        PeriodUnit::Month => {
            // Calendar-month arithmetic: Jan 31 + 1 month clamps to the last
            // valid day of February.
            let months = Months::new(magnitude);
            let shifted = if forward {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            };
            shifted.expect("period month arithmetic out of range")
        }
    }
}

fn shift_days(reference: NaiveDate, forward: bool, days: i64) -> NaiveDate {
    if forward {
        reference + Duration::days(days)
    } else {
        reference - Duration::days(days)
    }
}
