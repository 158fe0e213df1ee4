//! Stock-footage search platforms and their search URL templates

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stock-footage search destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Storyblocks (default)
    #[default]
    Storyblocks,
    /// Pexels videos
    Pexels,
    /// Pixabay videos
    Pixabay,
}

impl Platform {
    /// Every supported platform, in display order
    pub const ALL: [Platform; 3] = [Self::Storyblocks, Self::Pexels, Self::Pixabay];

    /// Stable identifier used in requests, settings and commands
    pub fn id(self) -> &'static str {
        match self {
            Self::Storyblocks => "storyblocks",
            Self::Pexels => "pexels",
            Self::Pixabay => "pixabay",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Self::Storyblocks => "Storyblocks",
            Self::Pexels => "Pexels",
            Self::Pixabay => "Pixabay",
        }
    }

    /// URL template, `%s` marks where the encoded query goes
    pub fn template(self) -> &'static str {
        match self {
            Self::Storyblocks => {
                "https://www.storyblocks.com/all-video/search/%s?search-origin=search_bar"
            }
            Self::Pexels => "https://www.pexels.com/search/videos/%s/",
            Self::Pixabay => "https://pixabay.com/videos/search/%s/",
        }
    }

    /// Build the search URL for an already-encoded query
    pub fn search_url(self, encoded_query: &str) -> String {
        self.template().replacen("%s", encoded_query, 1)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPlatform(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_storyblocks() {
        assert_eq!(Platform::default(), Platform::Storyblocks);
    }

    #[test]
    fn test_search_urls() {
        assert_eq!(
            Platform::Storyblocks.search_url("cat%20dog"),
            "https://www.storyblocks.com/all-video/search/cat%20dog?search-origin=search_bar"
        );
        assert_eq!(
            Platform::Pexels.search_url("cat%20dog"),
            "https://www.pexels.com/search/videos/cat%20dog/"
        );
        assert_eq!(
            Platform::Pixabay.search_url("cat%20dog"),
            "https://pixabay.com/videos/search/cat%20dog/"
        );
    }

    #[test]
    fn test_empty_query_segment() {
        assert_eq!(
            Platform::Pexels.search_url(""),
            "https://www.pexels.com/search/videos//"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("pexels".parse::<Platform>().unwrap(), Platform::Pexels);
        assert_eq!(" PixaBay ".parse::<Platform>().unwrap(), Platform::Pixabay);
        assert!(matches!(
            "shutterstock".parse::<Platform>(),
            Err(Error::UnknownPlatform(name)) if name == "shutterstock"
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Platform::Storyblocks).unwrap();
        assert_eq!(json, "\"storyblocks\"");
        let parsed: Platform = serde_json::from_str("\"pixabay\"").unwrap();
        assert_eq!(parsed, Platform::Pixabay);
    }
}
