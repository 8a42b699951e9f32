//! Front matter: the metadata block at the top of a post.
//!
//! Two fences are recognised:
//!
//! ```text
//! ---                          +++
//! title: "Hello"               title = "Hello"
//! date: 2024-01-01             date = 2024-01-01
//! summary: First post          summary = "First post"
//! tools: [rust, ratatui]       tools = ["rust", "ratatui"]
//! draft: false                 draft = false
//! ---                          +++
//! ```
//!
//! The `---` block is YAML and the `+++` block is TOML. Both deserialize
//! into the same [`FrontMatter`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, de};
use toml::Value;

use crate::error::ParseError;

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

/// Typed header fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDateTime,
    pub summary: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Split a raw document into its header and body and parse the header.
pub fn parse(raw: &str) -> Result<(FrontMatter, &str), ParseError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (fence, header, body) = split(raw)?;

    let front_matter = if fence == TOML_FENCE {
        toml::from_str(header)?
    } else {
        serde_yaml::from_str(header)?
    };
    Ok((front_matter, body))
}

/// Locate the fenced header. Returns the fence, the header text and the body.
fn split(raw: &str) -> Result<(&'static str, &str, &str), ParseError> {
    let mut lines = raw.split_inclusive('\n');

    let first = lines.next().ok_or(ParseError::MissingHeader)?;
    let fence = match first.trim_end() {
        YAML_FENCE => YAML_FENCE,
        TOML_FENCE => TOML_FENCE,
        _ => return Err(ParseError::MissingHeader),
    };

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == fence {
            let header = &raw[header_start..offset];
            let body = &raw[offset + line.len()..];
            return Ok((fence, header, body));
        }
        offset += line.len();
    }
    Err(ParseError::UnclosedHeader(fence))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Datetime(dt) => dt.to_string(),
        other => {
            return Err(de::Error::custom(format!(
                "expected a date, found {}",
                other.type_str()
            )));
        }
    };
    parse_date(&text).ok_or_else(|| de::Error::custom(format!("invalid date `{text}`")))
}

/// Parse a header date. Date-only values resolve to midnight; values with an
/// offset are converted to UTC.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
