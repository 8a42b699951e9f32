use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::ParseError;
use crate::front_matter::{self, FrontMatter};
use crate::read_time::ReadTime;

/// Header fields of a post plus its slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    pub title: String,
    pub date: NaiveDateTime,
    pub summary: String,
    pub tools: Vec<String>,
    pub draft: bool,
    pub slug: String,
}

impl PostMetadata {
    fn new(slug: &str, front_matter: FrontMatter) -> Self {
        Self {
            title: front_matter.title,
            date: front_matter.date,
            summary: front_matter.summary,
            tools: front_matter.tools,
            draft: front_matter.draft,
            slug: slug.to_string(),
        }
    }
}

/// A fully parsed post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub metadata: PostMetadata,
    /// Markdown body with the header removed.
    pub content: String,
    pub read_time: ReadTime,
}

impl Post {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            metadata: self.metadata.clone(),
            read_time: self.read_time,
        }
    }
}

/// Index entry for a post: everything but the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub metadata: PostMetadata,
    pub read_time: ReadTime,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            metadata: post.metadata,
            read_time: post.read_time,
        }
    }
}

/// Parse a raw document stored under `slug`.
pub fn parse_document(slug: &str, raw: &str) -> Result<Post, ParseError> {
    let (front_matter, body) = front_matter::parse(raw)?;
    Ok(Post {
        metadata: PostMetadata::new(slug, front_matter),
        content: body.to_string(),
        read_time: ReadTime::estimate(body),
    })
}
