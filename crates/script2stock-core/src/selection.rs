//! Per-line platform selections

use crate::error::{Error, Result};
use crate::platform::Platform;
use serde::Serialize;

/// Platform chosen for each result line
///
/// Sized to the line count of the latest response and reset on every new
/// generation. Entries are independent of one another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformSelections {
    entries: Vec<Platform>,
}

impl PlatformSelections {
    /// Create empty selections
    pub fn new() -> Self {
        Self::default()
    }

    /// Selections for `count` lines, all on the default platform
    pub fn for_lines(count: usize) -> Self {
        Self::filled(count, Platform::default())
    }

    /// Selections for `count` lines, all on `platform`
    pub fn filled(count: usize, platform: Platform) -> Self {
        Self {
            entries: vec![platform; count],
        }
    }

    /// Discard all entries and start over with `count` default entries
    pub fn reset(&mut self, count: usize) {
        self.entries.clear();
        self.entries.resize(count, Platform::default());
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Platform for a line, falling back to the default when out of range
    pub fn get(&self, index: usize) -> Platform {
        self.entries.get(index).copied().unwrap_or_default()
    }

    /// Change the platform for a single line
    pub fn set(&mut self, index: usize, platform: Platform) -> Result<()> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(Error::LineOutOfRange { index, len })?;
        *slot = platform;
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in line order
    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.entries.iter().copied()
    }
}
