// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// An NZB found on an indexer
///
/// Only a subset of the optional fields is filled by any given indexer;
/// the rest keep their zero value and are left out of JSON output.
/// `id` is only unique within `source_endpoint`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nzb {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub size: i64,
    #[serde(with = "crate::date::serde_option", skip_serializing_if = "Option::is_none")]
    pub air_date: Option<DateTime<FixedOffset>>,
    #[serde(with = "crate::date::serde_option", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<FixedOffset>>,
    #[serde(with = "crate::date::serde_option", skip_serializing_if = "Option::is_none")]
    pub usenet_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_grabs: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_comments: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    pub source_endpoint: String,
    #[serde(rename = "source_apikey")]
    pub source_api_key: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub genre: String,

    // TV
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tvdbid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tvrageid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub season: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub episode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tvtitle: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rating: i32,

    // Movies
    #[serde(rename = "imdb", skip_serializing_if = "String::is_empty")]
    pub imdb_id: String,
    #[serde(rename = "imdbtitle", skip_serializing_if = "String::is_empty")]
    pub imdb_title: String,
    #[serde(rename = "imdbyear", skip_serializing_if = "is_zero")]
    pub imdb_year: i32,
    #[serde(rename = "imdbscore", skip_serializing_if = "is_zero")]
    pub imdb_score: f32,
    #[serde(rename = "coverurl", skip_serializing_if = "String::is_empty")]
    pub cover_url: String,

    // Torznab
    #[serde(skip_serializing_if = "is_zero")]
    pub seeders: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub peers: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub infohash: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub download_url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub is_torrent: bool,
}

/// A user comment left on an NZB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(with = "crate::date::serde_option", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<FixedOffset>>,
}

impl Nzb {
    /// Pretty-printed JSON, for logs and diagnostics
    pub fn json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl Comment {
    /// Pretty-printed JSON, for logs and diagnostics
    pub fn json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
