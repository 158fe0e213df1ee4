//! Interactive mode
//!
//! A small REPL over a [`GenerationSession`]: browse the result lines, pick a
//! platform per line, copy keyword phrases and print search links.

use crate::clipboard::Clipboard;
use crate::commands::{Command, CommandError};
use crate::formatter::Formatter;
use crate::user_alert;
use script2stock_core::{Error, GenerationSession, KeywordService, OverlayFrequency, Platform};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Result of handling one command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Exit,
}

pub struct Interactive<S, C> {
    session: GenerationSession<S>,
    formatter: Box<dyn Formatter>,
    clipboard: C,
    overlay_frequency: Option<OverlayFrequency>,
    platform: Platform,
}

impl<S: KeywordService, C: Clipboard> Interactive<S, C> {
    pub fn new(
        session: GenerationSession<S>,
        formatter: Box<dyn Formatter>,
        clipboard: C,
    ) -> Self {
        Self {
            session,
            formatter,
            clipboard,
            overlay_frequency: None,
            platform: Platform::default(),
        }
    }

    /// Overlay frequency sent with scripts entered interactively
    pub fn with_overlay_frequency(mut self, frequency: Option<OverlayFrequency>) -> Self {
        self.overlay_frequency = frequency;
        self
    }

    /// Platform initially selected for every line of a new result
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &GenerationSession<S> {
        &self.session
    }

    /// Handle a single parsed command
    pub async fn handle(&mut self, command: Command) -> Reply {
        let result = match command {
            Command::Exit => return Reply::Exit,
            Command::Help => Ok(Command::help().to_string()),
            Command::Platforms => Ok(self.formatter.format_platforms()),
            Command::List => Ok(self.list()),
            Command::Generate { script } => self.generate(&script).await,
            Command::Platform { line, platform } => self
                .session
                .select_platform(line, platform)
                .and_then(|()| self.session.search_url(line))
                .map(|url| format!("Line {} now searches {}: {url}", line + 1, platform.label())),
            Command::Url { line } => self.session.search_url(line),
            Command::Urls { line } => self
                .session
                .line(line)
                .map(|l| self.formatter.format_urls(line + 1, &l)),
            Command::Copy { line } => self.copy(line),
        };

        Reply::Output(match result {
            Ok(output) => output,
            Err(e) => self.formatter.format_error(&self.describe(&e)),
        })
    }

    fn list(&self) -> String {
        if self.session.results_visible() {
            self.formatter.format_results(&self.session.lines())
        } else {
            "No results yet. Paste a script to generate keywords.".to_string()
        }
    }

    async fn generate(&mut self, script: &str) -> Result<String, Error> {
        self.session.generate(script, self.overlay_frequency).await?;
        if self.platform != Platform::default() {
            self.session.select_platform_for_all(self.platform);
        }
        Ok(self.list())
    }

    fn copy(&mut self, line: usize) -> Result<String, Error> {
        let phrase = self.session.keyword_phrase(line)?;
        match self.clipboard.copy(&phrase) {
            Ok(()) => {
                info!(line = line + 1, "Copied keywords to clipboard");
                Ok(format!("Copied: {phrase}"))
            }
            Err(e) => {
                warn!("Clipboard copy failed: {e:#}");
                Ok(format!("Could not copy to clipboard ({e}). Keywords: {phrase}"))
            }
        }
    }

    fn describe(&self, err: &Error) -> String {
        match err {
            Error::LineOutOfRange { .. } if !self.session.results_visible() => {
                "No results yet. Paste a script to generate keywords.".to_string()
            }
            Error::LineOutOfRange { index, len } => {
                format!("There is no line {} (results have {len} lines)", index + 1)
            }
            other => user_alert(other),
        }
    }

    /// Read commands from stdin until `/exit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("{}\n", Command::help());

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("script2stock> ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!();
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    continue;
                }
            }

            let command = match Command::parse(&input) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    eprintln!("{}", self.formatter.format_error(&e.to_string()));
                    continue;
                }
            };

            if matches!(command, Command::Generate { .. }) {
                eprintln!("Generating...");
            }

            match self.handle(command).await {
                Reply::Output(output) => println!("{output}\n"),
                Reply::Exit => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::PlainFormatter;
    use async_trait::async_trait;
    use script2stock_core::KeywordRequest;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Service answering from a fixed queue of results
    struct ScriptedService {
        responses: Mutex<VecDeque<script2stock_core::Result<String>>>,
        requests: Mutex<Vec<KeywordRequest>>,
    }

    impl ScriptedService {
        fn new(responses: Vec<script2stock_core::Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl KeywordService for ScriptedService {
        async fn generate(&self, request: KeywordRequest) -> script2stock_core::Result<String> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::RequestFailed("no scripted response".to_string())))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("no display");
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn interactive(
        responses: Vec<script2stock_core::Result<String>>,
        clipboard: RecordingClipboard,
    ) -> Interactive<ScriptedService, RecordingClipboard> {
        Interactive::new(
            GenerationSession::new(ScriptedService::new(responses)),
            Box::new(PlainFormatter),
            clipboard,
        )
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Exit => panic!("unexpected exit"),
        }
    }

    #[tokio::test]
    async fn test_generate_then_browse() {
        let mut repl = interactive(
            vec![Ok("[00:01] cat dog\n[00:02] city lights".to_string())],
            RecordingClipboard::default(),
        );

        let listing = output(repl.handle(Command::parse("A short script").unwrap()).await);
        assert!(listing.contains("1. [00:01] cat dog"));
        assert!(listing.contains("2. [00:02] city lights"));

        let url = output(repl.handle(Command::Url { line: 1 }).await);
        assert_eq!(
            url,
            "https://www.storyblocks.com/all-video/search/city%20lights?search-origin=search_bar"
        );

        let changed = output(
            repl.handle(Command::Platform {
                line: 1,
                platform: Platform::Pixabay,
            })
            .await,
        );
        assert!(changed.contains("https://pixabay.com/videos/search/city%20lights/"));

        let first = output(repl.handle(Command::Url { line: 0 }).await);
        assert!(first.starts_with("https://www.storyblocks.com/"));
    }

    #[tokio::test]
    async fn test_copy_uses_keyword_phrase() {
        let mut repl = interactive(
            vec![Ok("[0:10] misty forest".to_string())],
            RecordingClipboard::default(),
        );
        repl.handle(Command::parse("/generate script").unwrap()).await;

        let reply = output(repl.handle(Command::Copy { line: 0 }).await);
        assert_eq!(reply, "Copied: misty forest");
        assert_eq!(repl.clipboard.copied, vec!["misty forest".to_string()]);
    }

    #[tokio::test]
    async fn test_copy_failure_is_not_fatal() {
        let mut repl = interactive(
            vec![Ok("[0:10] misty forest".to_string())],
            RecordingClipboard {
                fail: true,
                ..RecordingClipboard::default()
            },
        );
        repl.handle(Command::parse("script").unwrap()).await;

        let reply = output(repl.handle(Command::Copy { line: 0 }).await);
        assert!(reply.contains("Could not copy to clipboard"));
        assert!(reply.contains("misty forest"));
    }

    #[tokio::test]
    async fn test_failed_generation_shows_alert() {
        let mut repl = interactive(
            vec![Err(Error::Service("overloaded".to_string()))],
            RecordingClipboard::default(),
        );

        let reply = output(repl.handle(Command::parse("script").unwrap()).await);
        assert_eq!(reply, "❌ Something went wrong.");
        assert!(!repl.session().results_visible());
        assert!(!repl.session().is_generating());

        let reply = output(repl.handle(Command::Url { line: 0 }).await);
        assert!(reply.contains("No results yet"));
    }

    #[tokio::test]
    async fn test_line_out_of_range_uses_line_numbers() {
        let mut repl = interactive(vec![Ok("[1] one".to_string())], RecordingClipboard::default());
        repl.handle(Command::parse("script").unwrap()).await;

        let reply = output(repl.handle(Command::Copy { line: 4 }).await);
        assert_eq!(reply, "❌ There is no line 5 (results have 1 lines)");
    }

    #[tokio::test]
    async fn test_overlay_and_platform_defaults() {
        let mut repl = interactive(
            vec![Ok("[1] one\n[2] two".to_string())],
            RecordingClipboard::default(),
        )
        .with_overlay_frequency(Some(OverlayFrequency::High))
        .with_platform(Platform::Pexels);

        repl.handle(Command::parse("script").unwrap()).await;

        let requests = repl.session().service().requests.lock().unwrap().clone();
        assert_eq!(requests[0].overlay_frequency, Some(OverlayFrequency::High));
        assert!(
            repl.session()
                .lines()
                .iter()
                .all(|line| line.platform == Platform::Pexels)
        );
    }

    #[tokio::test]
    async fn test_exit() {
        let mut repl = interactive(Vec::new(), RecordingClipboard::default());
        assert_eq!(repl.handle(Command::Exit).await, Reply::Exit);
    }
}
