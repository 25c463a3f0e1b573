// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RFC 1123 dates with a numeric zone offset, as used by newznab feeds
//! (`Mon, 02 Jan 2006 15:04:05 -0700`).

use chrono::{DateTime, FixedOffset};

use crate::error::FeedError;

/// Wire format of every date in newznab feeds
pub const FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Render a timestamp in the feed date format, keeping its offset
pub fn format(date: &DateTime<FixedOffset>) -> String {
    date.format(FORMAT).to_string()
}

/// The part after `Weekday, `; the weekday name is only checked for syntax
const DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Parse a feed date
///
/// The leading weekday must be a valid abbreviation but need not match the
/// calendar date.
pub fn parse(date_str: &str) -> Result<DateTime<FixedOffset>, FeedError> {
    let invalid = |reason: String| FeedError::InvalidDate {
        date_str: date_str.to_string(),
        reason,
    };

    let (weekday, rest) = date_str
        .trim()
        .split_once(", ")
        .ok_or_else(|| invalid("missing weekday".to_string()))?;
    if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
        return Err(invalid(format!("unknown weekday '{weekday}'")));
    }

    DateTime::parse_from_str(rest, DATE_FORMAT).map_err(|e| invalid(e.to_string()))
}

/// Serde adapter for optional dates in the feed format.
///
/// Use with `#[serde(with = "crate::date::serde_option")]`.
pub mod serde_option {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&super::format(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse(&s).map_err(de::Error::custom))
            .transpose()
    }
}
