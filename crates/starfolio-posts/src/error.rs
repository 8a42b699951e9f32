use std::io;
use std::path::PathBuf;

/// A document whose header could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document has no front matter")]
    MissingHeader,

    #[error("front matter opened with `{0}` is never closed")]
    UnclosedHeader(&'static str),

    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid front matter: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The document store could not be read.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of looking up a single post that has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Post not found")]
    NotFound { slug: String },

    #[error("This post is not available yet.")]
    NotAvailable { slug: String },
}

impl LookupError {
    pub fn slug(&self) -> &str {
        match self {
            Self::NotFound { slug } | Self::NotAvailable { slug } => slug,
        }
    }
}
