//! DTSTART/DTEND value parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::time::resolve_local;

/// A date or date-time value as written in an .ics property.
///
/// Only two lexical forms are recognised:
/// - `YYYYMMDDTHHMMSS` with an optional trailing `Z`
/// - `YYYYMMDD` (all-day)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcsDateTime {
    /// `20240101T090000Z`
    Utc(NaiveDateTime),
    /// `20240101T090000`, wall-clock time with no offset
    Floating(NaiveDateTime),
    /// `20240101`, midnight local time
    Date(NaiveDate),
}

impl IcsDateTime {
    /// Parse a property value. Returns `None` for any other shape, and for
    /// digit strings that do not name a real date or time.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let bytes = value.as_bytes();

        match bytes.len() {
            8 => parse_date(value).map(IcsDateTime::Date),
            15 | 16 => {
                if bytes[8] != b'T' {
                    return None;
                }
                let is_utc = match bytes.get(15) {
                    None => false,
                    Some(b'Z') => true,
                    Some(_) => return None,
                };

                let date = parse_date(&value[..8])?;
                let time = parse_time(&value[9..15])?;
                let naive = date.and_time(time);

                Some(if is_utc {
                    IcsDateTime::Utc(naive)
                } else {
                    IcsDateTime::Floating(naive)
                })
            }
            _ => None,
        }
    }

    /// Pin the value to an instant. Floating and date-only values are read as
    /// wall-clock time in `tz`.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        match self {
            IcsDateTime::Utc(naive) => naive.and_utc(),
            IcsDateTime::Floating(naive) => resolve_local(tz, *naive).with_timezone(&Utc),
            IcsDateTime::Date(date) => {
                resolve_local(tz, date.and_time(NaiveTime::MIN)).with_timezone(&Utc)
            }
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, IcsDateTime::Date(_))
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = s[0..2].parse().ok()?;
    let minute = s[2..4].parse().ok()?;
    let second = s[4..6].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, second)
}
