//! Reading time estimation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Average reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Markdown punctuation that isn't part of any word.
const MARKUP_CHARS: &[char] = &['#', '*', '`', '_', '~', '[', ']'];

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Estimated time to read a post, in whole minutes rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadTime {
    minutes: usize,
}

impl ReadTime {
    /// Estimate the reading time of a markdown body.
    pub fn estimate(body: &str) -> Self {
        Self::from_words(count_words(body))
    }

    pub fn from_words(words: usize) -> Self {
        Self {
            minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }

    pub fn minutes(self) -> usize {
        self.minutes
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes {
            0 => f.write_str("Less than a minute"),
            1 => f.write_str("1 minute"),
            n => write!(f, "{n} minutes"),
        }
    }
}

impl Serialize for ReadTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Count words once tags and markdown punctuation are removed.
pub fn count_words(body: &str) -> usize {
    let text = TAG.replace_all(body, "");
    let text: String = text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect();
    text.split_whitespace().count()
}
