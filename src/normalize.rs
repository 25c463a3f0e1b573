// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion of raw feed items into [`Nzb`] records.
//!
//! Source specific metadata arrives as an open list of `name`/`value`
//! attributes. Each known name has its own converter; unknown names are
//! skipped. A converter never fails the item: unparsable dates are logged
//! and left unset, unparsable numbers silently become zero.

use crate::date;
use crate::feed::{Attribute, RawNzb};
use crate::nzb::Nzb;

type Converter = fn(&mut Nzb, &str);

const CONVERTERS: &[(&str, Converter)] = &[
    ("tvairdate", set_air_date),
    ("guid", set_id),
    ("size", set_size),
    ("grabs", set_num_grabs),
    ("comments", set_num_comments),
];

/// Build an [`Nzb`] from a raw feed item
pub fn normalize(raw: &RawNzb) -> Nzb {
    let mut nzb = Nzb {
        title: raw.title.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        pub_date: raw.date,
        ..Default::default()
    };

    for attribute in &raw.attributes {
        apply_attribute(&mut nzb, attribute);
    }

    nzb
}

/// Normalize every item, keeping feed order
pub fn normalize_all(items: &[RawNzb]) -> Vec<Nzb> {
    items.iter().map(normalize).collect()
}

fn apply_attribute(nzb: &mut Nzb, attribute: &Attribute) {
    if let Some((_, convert)) = CONVERTERS
        .iter()
        .find(|(name, _)| *name == attribute.name)
    {
        convert(nzb, &attribute.value);
    }
}

fn set_air_date(nzb: &mut Nzb, value: &str) {
    match date::parse(value) {
        Ok(air_date) => nzb.air_date = Some(air_date),
        Err(e) => tracing::error!(value, error = %e, "failed to parse tvairdate attribute"),
    }
}

fn set_id(nzb: &mut Nzb, value: &str) {
    nzb.id = value.to_string();
}

fn set_size(nzb: &mut Nzb, value: &str) {
    nzb.size = parse_int(value).unwrap_or(0);
}

fn set_num_grabs(nzb: &mut Nzb, value: &str) {
    nzb.num_grabs = parse_int(value)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);
}

fn set_num_comments(nzb: &mut Nzb, value: &str) {
    nzb.num_comments = parse_int(value)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);
}

/// Parse an integer, inferring the base from its prefix
///
/// Accepts an optional sign, then `0x`/`0o`/`0b` or a bare leading `0`
/// (octal), and `_` between digits when a prefix is present.
fn parse_int(value: &str) -> Option<i64> {
    let (negative, unsigned) = match value.as_bytes().first().copied()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    let digits = if radix == 10 {
        if digits.contains('_') {
            return None;
        }
        digits.to_string()
    } else {
        if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
            return None;
        }
        digits.replace('_', "")
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}
