//! Tag filter strings
//!
//! A view cell's ore filter is a comma separated list of tag names. A name may
//! contain `*` wildcards (`ingot*`, `*copper*`), which are compiled to anchored
//! regular expressions once when the filter is parsed.

use regex::Regex;

/// Errors raised while parsing a tag filter string
#[derive(Debug, thiserror::Error)]
pub enum TagFilterError {
    #[error("Invalid character '{character}' in tag '{token}'")]
    InvalidCharacter { token: String, character: char },

    #[error("Invalid wildcard pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },
}

/// One entry of a tag filter
#[derive(Debug, Clone)]
pub enum TagPattern {
    /// Looked up directly in the tag registry
    Exact(String),
    /// Tested against the tags an identity carries
    Wildcard(Regex),
}

impl TagPattern {
    pub fn matches_name(&self, tag: &str) -> bool {
        match self {
            TagPattern::Exact(name) => name == tag,
            TagPattern::Wildcard(re) => re.is_match(tag),
        }
    }
}

/// Parsed tag filter string
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    source: String,
    patterns: Vec<TagPattern>,
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '/' | '-' | '*')
}

impl TagFilter {
    /// Parse a filter string. Empty tokens (`"a,,b"`, trailing commas) are
    /// skipped; any other malformed token rejects the whole filter.
    pub fn parse(filter: &str) -> Result<Self, TagFilterError> {
        let mut patterns = Vec::new();

        for token in filter.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(character) = token.chars().find(|c| !is_tag_char(*c)) {
                return Err(TagFilterError::InvalidCharacter {
                    token: token.to_string(),
                    character,
                });
            }

            if token.contains('*') {
                let body = token
                    .split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*");
                let re = Regex::new(&format!("^{}$", body)).map_err(|e| {
                    TagFilterError::InvalidPattern {
                        pattern: token.to_string(),
                        error: e.to_string(),
                    }
                })?;
                patterns.push(TagPattern::Wildcard(re));
            } else {
                patterns.push(TagPattern::Exact(token.to_string()));
            }
        }

        Ok(Self {
            source: filter.to_string(),
            patterns,
        })
    }

    /// Parse, degrading any error to the empty filter
    pub fn parse_lenient(filter: &str) -> Self {
        match Self::parse(filter) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Ignoring tag filter '{}': {}", filter, e);
                Self {
                    source: filter.to_string(),
                    patterns: Vec::new(),
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn patterns(&self) -> &[TagPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn has_wildcards(&self) -> bool {
        self.patterns
            .iter()
            .any(|p| matches!(p, TagPattern::Wildcard(_)))
    }

    /// Exact tag names, in filter order
    pub fn exact_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().filter_map(|p| match p {
            TagPattern::Exact(name) => Some(name.as_str()),
            TagPattern::Wildcard(_) => None,
        })
    }

    /// Whether any wildcard pattern accepts one of `tags`
    pub fn any_wildcard_matches<'a>(&self, mut tags: impl Iterator<Item = &'a str>) -> bool {
        if !self.has_wildcards() {
            return false;
        }
        tags.any(|tag| {
            self.patterns
                .iter()
                .any(|p| matches!(p, TagPattern::Wildcard(_)) && p.matches_name(tag))
        })
    }
}
