//! Client for newznab-style Usenet indexers.
//!
//! [`NewznabClient`] searches an indexer, fetches comments and downloads NZB
//! files. Search results are decoded from the indexer's RSS feed and mapped
//! into [`Nzb`] records.
//!
//! ```no_run
//! use newznab::{CATEGORY_TV_HD, Indexer, NewznabClient, ReqwestClient};
//!
//! # async fn run() -> Result<(), newznab::ClientError> {
//! let client = NewznabClient::new(ReqwestClient::new(), "my-api-key");
//! for nzb in client.search(CATEGORY_TV_HD, 18164, 1, 2).await? {
//!     println!("{}", nzb.json_string());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod date;
pub mod error;
pub mod feed;
pub mod http;
pub mod normalize;
pub mod nzb;

// Re-export main types for convenience
pub use client::{CATEGORY_TV_HD, CATEGORY_TV_SD, Indexer, NewznabClient, USENET_CRAWLER_API};
pub use error::{ClientError, FeedError};
pub use feed::{CommentResponse, RawNzb, SearchResponse, parse_comment_response, parse_search_response};
pub use http::{HttpClient, ReqwestClient};
pub use normalize::{normalize, normalize_all};
pub use nzb::{Comment, Nzb};
