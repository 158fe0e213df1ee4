//! Generation session
//!
//! Owns everything the user sees between generations: the raw keyword text,
//! the per-line platform selections, and the `generating` / `results_visible`
//! flags. Only one request can be in flight per session.

use crate::error::{Error, Result};
use crate::interpreter::{self, ResolvedLine, ResultLine};
use crate::platform::Platform;
use crate::selection::PlatformSelections;
use crate::service::{KeywordRequest, KeywordService, OverlayFrequency};
use tracing::{Span, debug, error, info, instrument, warn};

/// Results shown to the user
#[derive(Debug, Clone, Default)]
struct SessionState {
    results: String,
    selections: PlatformSelections,
    results_visible: bool,
}

impl SessionState {
    fn hide_results(&mut self) {
        self.results.clear();
        self.selections.clear();
        self.results_visible = false;
    }

    fn show_results(&mut self, keywords: String) {
        self.selections.reset(interpreter::line_count(&keywords));
        self.results = keywords;
        self.results_visible = true;
    }
}

/// Marks a request as in flight and clears the mark when dropped,
/// including when the request future is cancelled.
struct InFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlight<'a> {
    fn enter(flag: &'a mut bool) -> Result<Self> {
        if *flag {
            return Err(Error::Busy);
        }
        *flag = true;
        Ok(Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// A keyword generation session bound to a service
pub struct GenerationSession<S> {
    service: S,
    state: SessionState,
    generating: bool,
}

impl<S: KeywordService> GenerationSession<S> {
    /// Create a new session
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: SessionState::default(),
            generating: false,
        }
    }

    /// The underlying service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Submit a script and replace the current results
    ///
    /// # Arguments
    ///
    /// * `script` - The video script; must contain non-whitespace text
    /// * `overlay_frequency` - Optional hint forwarded to the service
    ///
    /// # Returns
    ///
    /// The number of result lines now shown
    #[instrument(skip(self, script), fields(service = tracing::field::Empty, script_len = script.len()))]
    pub async fn generate(
        &mut self,
        script: &str,
        overlay_frequency: Option<OverlayFrequency>,
    ) -> Result<usize> {
        Span::current().record("service", self.service.name());

        if script.trim().is_empty() {
            warn!("Refusing to generate keywords for an empty script");
            return Err(Error::EmptyInput);
        }

        let _in_flight = InFlight::enter(&mut self.generating)?;
        self.state.hide_results();

        let mut request = KeywordRequest::new(script);
        if let Some(frequency) = overlay_frequency {
            request = request.with_overlay_frequency(frequency);
        }

        debug!("Sending script to keyword service");
        match self.service.generate(request).await {
            Ok(keywords) => {
                self.state.show_results(keywords);
                let lines = self.state.selections.len();
                info!(lines, "Keywords generated");
                Ok(lines)
            }
            Err(e) => {
                error!("Error generating keywords: {e}");
                Err(e)
            }
        }
    }

    /// Show an already-obtained keyword response without contacting the service
    pub fn load_results(&mut self, keywords: impl Into<String>) -> Result<usize> {
        if self.generating {
            return Err(Error::Busy);
        }
        self.state.show_results(keywords.into());
        Ok(self.state.selections.len())
    }

    /// Whether a request is in flight
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Whether results are currently shown
    pub fn results_visible(&self) -> bool {
        self.state.results_visible
    }

    /// Raw keyword text of the latest successful generation
    pub fn raw_results(&self) -> Option<&str> {
        self.state
            .results_visible
            .then_some(self.state.results.as_str())
    }

    /// Current per-line selections
    pub fn selections(&self) -> &PlatformSelections {
        &self.state.selections
    }

    /// Number of result lines shown
    pub fn line_count(&self) -> usize {
        self.state.selections.len()
    }

    /// All shown lines resolved against their selected platforms
    pub fn lines(&self) -> Vec<ResolvedLine> {
        match self.raw_results() {
            Some(raw) => interpreter::resolve(raw, &self.state.selections),
            None => Vec::new(),
        }
    }

    /// A single shown line
    pub fn line(&self, index: usize) -> Result<ResultLine> {
        let len = self.line_count();
        self.raw_results()
            .and_then(|raw| raw.split('\n').nth(index))
            .map(ResultLine::parse)
            .ok_or(Error::LineOutOfRange { index, len })
    }

    /// Keyword phrase of a line, as copied to the clipboard
    pub fn keyword_phrase(&self, index: usize) -> Result<String> {
        Ok(self.line(index)?.keywords)
    }

    /// Search URL of a line on its selected platform
    pub fn search_url(&self, index: usize) -> Result<String> {
        let line = self.line(index)?;
        Ok(line.url(self.state.selections.get(index)))
    }

    /// Choose the platform for one line
    pub fn select_platform(&mut self, index: usize, platform: Platform) -> Result<()> {
        self.state.selections.set(index, platform)?;
        debug!(index, %platform, "Platform selected");
        Ok(())
    }

    /// Choose the same platform for every line
    pub fn select_platform_for_all(&mut self, platform: Platform) {
        let count = self.state.selections.len();
        self.state.selections = PlatformSelections::filled(count, platform);
    }
}
