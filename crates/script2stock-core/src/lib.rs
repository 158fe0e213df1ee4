//! Core types for script2stock
//!
//! This crate turns the text answer of a keyword-generation service into
//! browsable stock-footage searches. It includes:
//!
//! - The result line interpreter (keyword phrase, encoding, search URLs)
//! - The supported stock platforms and their URL templates
//! - Per-line platform selections
//! - The [`KeywordService`] trait implemented by service clients
//! - [`GenerationSession`], which runs one request at a time and holds the
//!   results shown to the user
//!
//! # Example
//!
//! ```
//! use script2stock_core::{Platform, ResultLine};
//!
//! let line = ResultLine::parse("[00:01] cat dog");
//! assert_eq!(line.keywords, "cat dog");
//! assert_eq!(
//!     line.url(Platform::Pexels),
//!     "https://www.pexels.com/search/videos/cat%20dog/"
//! );
//! ```

pub mod error;
pub mod interpreter;
pub mod platform;
pub mod selection;
pub mod service;
pub mod session;

pub use error::{Error, Result};
pub use interpreter::{ResolvedLine, ResultLine};
pub use platform::Platform;
pub use selection::PlatformSelections;
pub use service::{KeywordRequest, KeywordService, OverlayFrequency};
pub use session::GenerationSession;
