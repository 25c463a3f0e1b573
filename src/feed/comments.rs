// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::FeedError;

use super::schema::read_channel;

/// A decoded comments feed
#[derive(Debug, Clone, Default)]
pub struct CommentResponse {
    pub items: Vec<RawComment>,
}

/// A comment as sent by the indexer; the date is left as text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawComment {
    pub title: String,
    pub description: String,
    pub pub_date: String,
}

/// Parse a comments feed from raw XML bytes
pub fn parse_comment_response(xml_bytes: &[u8]) -> Result<CommentResponse, FeedError> {
    let channel = read_channel(xml_bytes)?;

    let items = channel
        .items()
        .iter()
        .map(|item| RawComment {
            title: item.title().unwrap_or_default().to_string(),
            description: item.description().unwrap_or_default().to_string(),
            pub_date: item.pub_date().unwrap_or_default().to_string(),
        })
        .collect();

    Ok(CommentResponse { items })
}
