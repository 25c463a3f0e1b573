// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::date;
use crate::error::ClientError;
use crate::feed::{parse_comment_response, parse_search_response};
use crate::http::HttpClient;
use crate::normalize::normalize_all;
use crate::nzb::{Comment, Nzb};

/// API endpoint of usenet-crawler
pub const USENET_CRAWLER_API: &str = "https://www.usenet-crawler.com/api";

/// Category for high-definition TV shows
pub const CATEGORY_TV_HD: i32 = 5040;
/// Category for standard-definition TV shows
pub const CATEGORY_TV_SD: i32 = 5030;

/// Operations every indexer client offers
///
/// Results from several indexers can be merged; [`Nzb::source_endpoint`]
/// tells them apart.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Search for episodes of a TV show
    async fn search(
        &self,
        category: i32,
        rage_id: i64,
        season: i32,
        episode: i32,
    ) -> Result<Vec<Nzb>, ClientError>;

    /// Fetch the comments of `nzb` and append them to its comment list
    async fn populate_comments(&self, nzb: &mut Nzb) -> Result<(), ClientError>;

    /// URL the NZB file can be downloaded from
    fn download_url(&self, nzb: &Nzb) -> String;

    /// Download the NZB file itself
    async fn download(&self, nzb: &Nzb) -> Result<Bytes, ClientError>;
}

/// Client for a newznab compatible indexer
#[derive(Clone)]
pub struct NewznabClient<C> {
    http: C,
    base_url: Url,
    api_key: String,
}

impl<C: HttpClient> NewznabClient<C> {
    /// Create a client for usenet-crawler
    pub fn new(http: C, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: Url::parse(USENET_CRAWLER_API).expect("valid usenet-crawler URL"),
            api_key: api_key.into(),
        }
    }

    /// Create a client for another newznab indexer, e.g. `https://indexer.example/api`
    pub fn with_base_url(
        http: C,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Endpoint this client talks to; also recorded as each result's `source_endpoint`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an API URL from query parameters, adding the API key if set
    ///
    /// Query pairs already present in the base URL are kept in front.
    fn api_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(params);
            if !self.api_key.is_empty() {
                query.append_pair("apikey", &self.api_key);
            }
        }
        url
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, ClientError> {
        tracing::debug!(url, "fetching");
        let bytes = self
            .http
            .get_bytes(url)
            .await
            .map_err(|e| ClientError::FetchFailed {
                url: url.to_string(),
                source: e,
            })?;
        tracing::debug!(num_bytes = bytes.len(), "retrieved");
        Ok(bytes)
    }
}

#[async_trait]
impl<C: HttpClient> Indexer for NewznabClient<C> {
    async fn search(
        &self,
        category: i32,
        rage_id: i64,
        season: i32,
        episode: i32,
    ) -> Result<Vec<Nzb>, ClientError> {
        tracing::debug!(category, rage_id, season, episode, "searching");
        let (rid, cat) = (rage_id.to_string(), category.to_string());
        let (season, ep) = (season.to_string(), episode.to_string());
        let url = self.api_url(&[
            ("t", "tvsearch"),
            ("rid", rid.as_str()),
            ("cat", cat.as_str()),
            ("season", season.as_str()),
            ("ep", ep.as_str()),
            ("extended", "1"),
        ]);

        let bytes = self.fetch(url.as_str()).await?;
        let response = parse_search_response(&bytes)?;
        tracing::info!(num = response.channel.items.len(), "found NZBs");

        let mut nzbs = normalize_all(&response.channel.items);
        for nzb in &mut nzbs {
            nzb.source_endpoint = self.base_url.to_string();
            nzb.source_api_key = self.api_key.clone();
            tracing::trace!("{}", nzb.json_string());
        }
        Ok(nzbs)
    }

    async fn populate_comments(&self, nzb: &mut Nzb) -> Result<(), ClientError> {
        tracing::debug!(id = %nzb.id, "getting comments");
        let url = self.api_url(&[("t", "comments"), ("id", nzb.id.as_str())]);

        let bytes = self.fetch(url.as_str()).await?;
        let response = parse_comment_response(&bytes)?;

        nzb.comments.extend(response.items.into_iter().map(|raw| {
            let pub_date = match date::parse(&raw.pub_date) {
                Ok(pub_date) => Some(pub_date),
                Err(e) => {
                    tracing::error!(pub_date = %raw.pub_date, error = %e, "failed to parse comment date");
                    None
                }
            };
            Comment {
                title: raw.title,
                content: raw.description,
                pub_date,
            }
        }));
        Ok(())
    }

    fn download_url(&self, nzb: &Nzb) -> String {
        self.api_url(&[("t", "get"), ("id", nzb.id.as_str())]).into()
    }

    async fn download(&self, nzb: &Nzb) -> Result<Bytes, ClientError> {
        self.fetch(&self.download_url(nzb)).await
    }
}
