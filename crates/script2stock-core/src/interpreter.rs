//! Result line interpretation
//!
//! The keyword service answers with newline-separated lines, conventionally
//! shaped as `[<timestamp-or-tag>] <keywords>`. For each line this module
//! derives the keyword phrase (everything after the first `]`, trimmed), its
//! URL-encoded form, and the search URL for a platform.
//!
//! Interpretation is pure and total: a line without `]` simply yields an
//! empty keyword phrase.

use crate::platform::Platform;
use crate::selection::PlatformSelections;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Characters left untouched when encoding a query component.
///
/// Matches the unreserved set of ECMAScript `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One line of a keyword response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLine {
    /// Line text as displayed
    pub text: String,
    /// Keyword phrase used for searching
    pub keywords: String,
    /// URL-encoded keyword phrase
    pub encoded: String,
}

impl ResultLine {
    /// Interpret a single response line
    pub fn parse(line: &str) -> Self {
        let text = line.strip_suffix('\r').unwrap_or(line);
        let keywords = keyword_phrase(text);
        let encoded = encode_query(keywords);

        Self {
            text: text.to_string(),
            keywords: keywords.to_string(),
            encoded,
        }
    }

    /// Search URL on the given platform
    pub fn url(&self, platform: Platform) -> String {
        platform.search_url(&self.encoded)
    }

    /// Search URLs for every supported platform
    pub fn urls(&self) -> Vec<(Platform, String)> {
        Platform::ALL
            .into_iter()
            .map(|p| (p, self.url(p)))
            .collect()
    }

    /// Pair this line with a platform and its URL
    pub fn resolve(&self, platform: Platform) -> ResolvedLine {
        ResolvedLine {
            text: self.text.clone(),
            keywords: self.keywords.clone(),
            encoded: self.encoded.clone(),
            platform,
            url: self.url(platform),
        }
    }
}

/// A result line with its currently selected platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLine {
    pub text: String,
    pub keywords: String,
    pub encoded: String,
    pub platform: Platform,
    pub url: String,
}

/// Keyword phrase of a line: text after the first `]`, trimmed.
///
/// Returns an empty string when the line has no `]`.
pub fn keyword_phrase(line: &str) -> &str {
    line.split_once(']')
        .map_or("", |(_, rest)| rest.trim_matches(is_trimmed_space))
}

/// Whitespace as browsers trim it: Unicode `White_Space` minus NEL, plus the BOM
fn is_trimmed_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// Percent-encode a phrase for use as a URL path or query component
pub fn encode_query(phrase: &str) -> String {
    utf8_percent_encode(phrase, QUERY_COMPONENT).to_string()
}

/// Number of lines in a raw response.
///
/// An empty response still counts as one (empty) line.
pub fn line_count(raw: &str) -> usize {
    raw.split('\n').count()
}

/// Interpret every line of a raw response
pub fn interpret(raw: &str) -> Vec<ResultLine> {
    raw.split('\n').map(ResultLine::parse).collect()
}

/// Interpret every line and resolve it against the per-line selections
pub fn resolve(raw: &str, selections: &PlatformSelections) -> Vec<ResolvedLine> {
    interpret(raw)
        .iter()
        .enumerate()
        .map(|(idx, line)| line.resolve(selections.get(idx)))
        .collect()
}
