// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rss::extension::{Extension, ExtensionMap};
use serde::Deserialize;

use crate::date;
use crate::error::FeedError;

/// A decoded newznab search response
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub channel: Channel,
}

/// Channel header of a search response plus its items
#[derive(Debug, Clone, Default)]
pub struct Channel {
    pub title: String,
    pub link: AtomLink,
    pub description: String,
    pub language: Option<String>,
    pub webmaster: Option<String>,
    pub category: Option<String>,
    pub image: Option<Image>,
    pub response: Option<ResponseInfo>,
    pub items: Vec<RawNzb>,
}

/// The `atom:link` self reference of a channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomLink {
    pub href: String,
    pub rel: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Paging information from `newznab:response`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseInfo {
    pub offset: u64,
    pub total: u64,
}

/// A single search result exactly as the indexer sent it
#[derive(Debug, Clone, Default)]
pub struct RawNzb {
    pub title: Option<String>,
    pub link: Option<String>,
    pub size: i64,
    pub category: Category,
    pub guid: Guid,
    pub comments: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub source: Source,
    pub date: Option<DateTime<FixedOffset>>,
    pub enclosure: Enclosure,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub domain: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guid {
    pub value: String,
    pub is_permalink: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub url: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enclosure {
    pub url: String,
    pub length: String,
    pub mime_type: String,
}

/// A `name`/`value` pair from an `<newznab:attr>` (or `<torznab:attr>`) element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Root element of a newznab error document, e.g.
/// `<error code="100" description="Incorrect user credentials"/>`
#[derive(Debug, Deserialize)]
struct ApiErrorDocument {
    #[serde(rename = "@code")]
    code: u32,
    #[serde(rename = "@description")]
    description: String,
}

/// Parse a search response from raw XML bytes
///
/// Decoding is all-or-nothing: malformed XML, an error document from the
/// indexer or an unparsable item `pubDate` fail the whole response.
pub fn parse_search_response(xml_bytes: &[u8]) -> Result<SearchResponse, FeedError> {
    let channel = read_channel(xml_bytes)?;
    let mut attributes = item_attributes(xml_bytes)?.into_iter();

    let items = channel
        .items()
        .iter()
        .map(|item| parse_item(item, attributes.next().unwrap_or_default()))
        .collect::<Result<Vec<_>, _>>()?;

    let link = extensions_named(channel.extensions(), "link")
        .next()
        .map(|ext| AtomLink {
            href: attr(ext, "href"),
            rel: attr(ext, "rel"),
            kind: attr(ext, "type"),
        })
        .unwrap_or_default();

    let response = extensions_named(channel.extensions(), "response")
        .next()
        .map(|ext| ResponseInfo {
            offset: attr(ext, "offset").parse().unwrap_or(0),
            total: attr(ext, "total").parse().unwrap_or(0),
        });

    let image = channel.image().map(|img| Image {
        url: img.url().to_string(),
        title: img.title().to_string(),
        link: img.link().to_string(),
        description: img.description().map(String::from),
        width: img.width().and_then(|w| w.parse().ok()),
        height: img.height().and_then(|h| h.parse().ok()),
    });

    Ok(SearchResponse {
        channel: Channel {
            title: channel.title().to_string(),
            link,
            description: channel.description().to_string(),
            language: channel.language().map(String::from),
            webmaster: channel.webmaster().map(String::from),
            category: channel.categories().first().map(|c| c.name().to_string()),
            image,
            response,
            items,
        },
    })
}

/// Read an RSS channel, surfacing indexer error documents as [`FeedError::Api`]
pub(crate) fn read_channel(xml_bytes: &[u8]) -> Result<rss::Channel, FeedError> {
    rss::Channel::read_from(xml_bytes).map_err(|err| {
        match std::str::from_utf8(xml_bytes)
            .ok()
            .and_then(|text| quick_xml::de::from_str::<ApiErrorDocument>(text).ok())
        {
            Some(doc) => FeedError::Api {
                code: doc.code,
                description: doc.description,
            },
            None => FeedError::ParseFailed(err),
        }
    })
}

fn parse_item(item: &rss::Item, attributes: Vec<Attribute>) -> Result<RawNzb, FeedError> {
    let date = item.pub_date().map(date::parse).transpose()?;

    let enclosure = item
        .enclosure()
        .map(|e| Enclosure {
            url: e.url().to_string(),
            length: e.length().to_string(),
            mime_type: e.mime_type().to_string(),
        })
        .unwrap_or_default();

    Ok(RawNzb {
        title: item.title().map(String::from),
        link: item.link().map(String::from),
        size: enclosure.length.parse().unwrap_or(0),
        category: item
            .categories()
            .first()
            .map(|c| Category {
                domain: c.domain().map(String::from),
                value: c.name().to_string(),
            })
            .unwrap_or_default(),
        guid: item
            .guid()
            .map(|g| Guid {
                value: g.value().to_string(),
                is_permalink: g.is_permalink(),
            })
            .unwrap_or_default(),
        comments: item.comments().map(String::from),
        description: item.description().map(String::from),
        author: item.author().map(String::from),
        source: item
            .source()
            .map(|s| Source {
                url: s.url().to_string(),
                value: s.title().map(String::from),
            })
            .unwrap_or_default(),
        date,
        enclosure,
        attributes,
    })
}

/// The `attr` children of every item, in document order
///
/// rss groups extensions by namespace prefix and loses the relative order of
/// `newznab:attr` and `torznab:attr`. Any prefix (or none) is accepted.
fn item_attributes(xml_bytes: &[u8]) -> Result<Vec<Vec<Attribute>>, FeedError> {
    let mut reader = Reader::from_reader(xml_bytes);
    let mut buf = Vec::new();
    let mut items: Vec<Vec<Attribute>> = Vec::new();
    let mut depth = 0usize;
    let mut item_depth: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                depth += 1;
                let name = element.local_name();
                if item_depth.is_none() && name.as_ref() == b"item" {
                    item_depth = Some(depth);
                    items.push(Vec::new());
                } else if item_depth == Some(depth - 1) && name.as_ref() == b"attr" {
                    if let Some(attributes) = items.last_mut() {
                        attributes.push(read_attribute(&element)?);
                    }
                }
            }
            Event::Empty(element) => {
                let name = element.local_name();
                if item_depth.is_none() && name.as_ref() == b"item" {
                    items.push(Vec::new());
                } else if item_depth == Some(depth) && name.as_ref() == b"attr" {
                    if let Some(attributes) = items.last_mut() {
                        attributes.push(read_attribute(&element)?);
                    }
                }
            }
            Event::End(_) => {
                if item_depth == Some(depth) {
                    item_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn read_attribute(element: &BytesStart<'_>) -> Result<Attribute, FeedError> {
    let mut attribute = Attribute::default();
    for xml_attr in element.attributes() {
        let xml_attr = xml_attr.map_err(quick_xml::Error::from)?;
        let value = xml_attr.unescape_value()?.into_owned();
        match xml_attr.key.local_name().as_ref() {
            b"name" => attribute.name = value,
            b"value" => attribute.value = value,
            _ => {}
        }
    }
    Ok(attribute)
}

/// All extension elements with the given local name, whatever their prefix
fn extensions_named<'a>(
    extensions: &'a ExtensionMap,
    name: &'a str,
) -> impl Iterator<Item = &'a Extension> + 'a {
    extensions
        .values()
        .filter_map(move |by_name| by_name.get(name))
        .flatten()
}

fn attr(ext: &Extension, key: &str) -> String {
    ext.attrs().get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fixtures::SAMPLE_SEARCH;

    #[test]
    fn parse_search_response_reads_channel_header() {
        let response = parse_search_response(SAMPLE_SEARCH.as_bytes()).unwrap();
        let channel = &response.channel;

        assert_eq!(channel.title, "usenet-crawler");
        assert_eq!(channel.description, "usenet-crawler API results");
        assert_eq!(channel.language.as_deref(), Some("en-gb"));
        assert_eq!(channel.link.href, "https://www.usenet-crawler.com/api");
        assert_eq!(channel.link.rel, "self");
        assert_eq!(channel.response, Some(ResponseInfo { offset: 0, total: 2 }));

        let image = channel.image.as_ref().unwrap();
        assert_eq!(image.width, Some(468));
        assert_eq!(image.height, Some(60));
    }

    #[test]
    fn parse_search_response_reads_items_in_order() {
        let response = parse_search_response(SAMPLE_SEARCH.as_bytes()).unwrap();
        let items = &response.channel.items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("Show.S01E02.720p.HDTV.x264-GROUP"));
        assert_eq!(items[1].title.as_deref(), Some("Show.S01E02.HDTV.x264-OTHER"));
    }

    #[test]
    fn parse_search_response_reads_item_structure() {
        let response = parse_search_response(SAMPLE_SEARCH.as_bytes()).unwrap();
        let item = &response.channel.items[0];

        assert!(item.guid.is_permalink);
        assert_eq!(item.guid.value, "https://www.usenet-crawler.com/details/abc123");
        assert_eq!(item.category.value, "TV > HD");
        assert_eq!(item.enclosure.mime_type, "application/x-nzb");
        assert_eq!(item.size, 1_234_567_890);
        assert_eq!(item.date, Some(date::parse("Tue, 15 Mar 2016 20:00:00 -0400").unwrap()));

        assert_eq!(item.attributes.len(), 7);
        assert_eq!(
            item.attributes[3],
            Attribute {
                name: "guid".to_string(),
                value: "abc123".to_string()
            }
        );
    }

    #[test]
    fn missing_pub_date_is_left_unset() {
        let response = parse_search_response(SAMPLE_SEARCH.as_bytes()).unwrap();
        let item = &response.channel.items[1];
        assert!(item.date.is_none());
        assert!(!item.guid.is_permalink);
    }

    #[test]
    fn malformed_pub_date_fails_whole_response() {
        let feed = r#"<rss version="2.0"><channel><title>t</title>
            <item><title>ok</title><pubDate>Tue, 15 Mar 2016 20:00:00 -0400</pubDate></item>
            <item><title>bad</title><pubDate>2016-03-15</pubDate></item>
        </channel></rss>"#;

        match parse_search_response(feed.as_bytes()) {
            Err(FeedError::InvalidDate { date_str, .. }) => assert_eq!(date_str, "2016-03-15"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn malformed_xml_fails() {
        let result = parse_search_response(b"<rss version=\"2.0\"><channel><title>x</title><item><title");
        assert!(matches!(result, Err(FeedError::ParseFailed(_))));
    }

    #[test]
    fn error_document_becomes_api_error() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<error code="100" description="Incorrect user credentials"/>"#;

        match parse_search_response(doc.as_bytes()) {
            Err(FeedError::Api { code, description }) => {
                assert_eq!(code, 100);
                assert_eq!(description, "Incorrect user credentials");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_weekday_in_pub_date_is_accepted() {
        let feed = r#"<rss version="2.0"><channel><title>t</title>
            <item><title>a</title><pubDate>Mon, 15 Mar 2016 20:00:00 -0400</pubDate></item>
            <item><title>b</title></item>
        </channel></rss>"#;

        let response = parse_search_response(feed.as_bytes()).unwrap();
        assert_eq!(response.channel.items.len(), 2);
        assert_eq!(
            response.channel.items[0].date,
            Some(date::parse("Tue, 15 Mar 2016 20:00:00 -0400").unwrap())
        );
    }

    #[test]
    fn attributes_keep_document_order_across_namespaces() {
        let feed = r#"<rss version="2.0" xmlns:newznab="http://www.newznab.com/DTD/2010/feeds/attributes/" xmlns:torznab="http://torznab.com/schemas/2015/feed">
<channel><title>t</title>
  <item>
    <title>x</title>
    <torznab:attr name="guid" value="first"/>
    <newznab:attr name="size" value="10"/>
    <newznab:attr name="guid" value="second"/>
  </item>
  <item><title>empty</title></item>
  <item><title>y</title><newznab:attr name="guid" value="third"/></item>
</channel></rss>"#;

        let response = parse_search_response(feed.as_bytes()).unwrap();
        let items = &response.channel.items;

        let values: Vec<_> = items[0].attributes.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(values, ["first", "10", "second"]);
        assert!(items[1].attributes.is_empty());
        assert_eq!(items[2].attributes[0].value, "third");

        assert_eq!(crate::normalize::normalize(&items[0]).id, "second");
    }

    #[test]
    fn torznab_attributes_are_collected() {
        let feed = r#"<rss version="2.0" xmlns:torznab="http://torznab.com/schemas/2015/feed">
<channel><title>t</title>
  <item><title>x</title><torznab:attr name="seeders" value="12"/></item>
</channel></rss>"#;

        let response = parse_search_response(feed.as_bytes()).unwrap();
        assert_eq!(response.channel.items[0].attributes[0].name, "seeders");
        assert_eq!(response.channel.items[0].attributes[0].value, "12");
    }
}
