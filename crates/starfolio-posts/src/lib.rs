//! Markdown posts with front matter: parsing, reading time, listing and
//! lookup.

mod collection;
mod error;
pub mod front_matter;
mod post;
mod read_time;
mod store;

pub use collection::PostCollection;
pub use error::{LookupError, ParseError, StoreError};
pub use front_matter::FrontMatter;
pub use post::{Post, PostMetadata, PostSummary, parse_document};
pub use read_time::{ReadTime, WORDS_PER_MINUTE, count_words};
pub use store::{DOCUMENT_EXTENSION, DocumentStore, FsDocumentStore, MemoryDocumentStore};
