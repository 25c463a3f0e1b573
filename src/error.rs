use thiserror::Error;

/// Errors that can occur when decoding newznab feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to parse feed: {0}")]
    ParseFailed(#[from] rss::Error),

    #[error("Failed to read feed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to parse date '{date_str}': {reason}")]
    InvalidDate { date_str: String, reason: String },

    #[error("Indexer returned error {code}: {description}")]
    Api { code: u32, description: String },
}

/// Errors returned by indexer client operations
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Invalid indexer URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
