// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Human-readable ages for API timestamps.

use crate::strings::Strings;
use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Unit sizes in seconds, in the order of `Strings::time_units`.
const UNITS: [i64; 6] = [MINUTE, HOUR, DAY, WEEK, MONTH, YEAR];

/// Age of an RFC 3339 timestamp relative to `now`, e.g. "3 hours ago".
///
/// Unparseable input is returned unchanged. Timestamps in the future read
/// as "just now".
pub fn relative_age(timestamp: &str, now: DateTime<Utc>, strings: &Strings) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let seconds = (now - then.with_timezone(&Utc)).num_seconds();

    let Some(unit) = UNITS.iter().rposition(|&size| seconds >= size) else {
        return strings.just_now.to_string();
    };
    let amount = seconds / UNITS[unit];
    let (singular, plural) = strings.time_units[unit];
    let label = if amount == 1 { singular } else { plural };
    strings.time_ago.replace("{}", &format!("{amount} {label}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::Language;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_relative_age_english() {
        let en = Language::En.strings();
        assert_eq!(relative_age("2024-03-10T11:59:30Z", now(), en), "just now");
        assert_eq!(relative_age("2024-03-10T11:59:00Z", now(), en), "1 minute ago");
        assert_eq!(relative_age("2024-03-10T09:00:00Z", now(), en), "3 hours ago");
        assert_eq!(relative_age("2024-03-09T12:00:00Z", now(), en), "1 day ago");
        assert_eq!(relative_age("2024-02-25T12:00:00Z", now(), en), "2 weeks ago");
        assert_eq!(relative_age("2023-12-01T12:00:00Z", now(), en), "3 months ago");
        assert_eq!(relative_age("2021-03-01T12:00:00Z", now(), en), "3 years ago");
    }

    #[test]
    fn test_relative_age_french() {
        let fr = Language::Fr.strings();
        assert_eq!(relative_age("2024-03-10T11:59:59Z", now(), fr), "à l'instant");
        assert_eq!(relative_age("2024-03-10T10:00:00Z", now(), fr), "il y a 2 heures");
        assert_eq!(relative_age("2024-01-05T12:00:00Z", now(), fr), "il y a 2 mois");
    }

    #[test]
    fn test_relative_age_offsets_and_future() {
        let en = Language::En.strings();
        assert_eq!(relative_age("2024-03-10T13:00:00+02:00", now(), en), "1 hour ago");
        assert_eq!(relative_age("2024-03-11T12:00:00Z", now(), en), "just now");
    }

    #[test]
    fn test_relative_age_unparseable() {
        assert_eq!(relative_age("yesterday", now(), Language::En.strings()), "yesterday");
    }
}
