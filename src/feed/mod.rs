mod comments;
mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use comments::{CommentResponse, RawComment, parse_comment_response};
pub use schema::{
    AtomLink, Attribute, Category, Channel, Enclosure, Guid, Image, RawNzb, ResponseInfo,
    SearchResponse, Source, parse_search_response,
};
