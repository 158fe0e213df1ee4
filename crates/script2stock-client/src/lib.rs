//! HTTP client for the script2stock keyword-generation service
//!
//! [`HttpKeywordClient`] implements [`script2stock_core::KeywordService`]
//! on top of reqwest.
//!
//! ```no_run
//! use script2stock_client::{ClientConfig, HttpKeywordClient};
//! use script2stock_core::GenerationSession;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = HttpKeywordClient::with_config(ClientConfig::default().with_timeout(60))?;
//! let mut session = GenerationSession::new(client);
//! session.generate("Drone shot over a foggy forest at dawn.", None).await?;
//! for line in session.lines() {
//!     println!("{} -> {}", line.text, line.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{ClientError, Result};
pub use http::HttpKeywordClient;
