//! Command parsing for the interactive mode
//!
//! Input starting with `/` is a command; anything else is treated as a new
//! script to generate keywords for. Lines are numbered from 1.

use script2stock_core::Platform;
use thiserror::Error;

/// Errors produced while parsing interactive input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid line number: {0}")]
    InvalidLine(String),

    #[error("{0}")]
    InvalidPlatform(String),
}

/// Parsed interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current results
    List,
    /// Choose the platform for one line
    Platform { line: usize, platform: Platform },
    /// Copy a line's keyword phrase to the clipboard
    Copy { line: usize },
    /// Print the search URL of a line on its selected platform
    Url { line: usize },
    /// Print the search URLs of a line on every platform
    Urls { line: usize },
    /// Show supported platforms
    Platforms,
    /// Generate keywords for a new script
    Generate { script: String },
    /// Show help
    Help,
    /// Leave interactive mode
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Generate {
                script: input.to_string(),
            });
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(CommandError::Unknown(String::new()));
        };

        match cmd.to_lowercase().as_str() {
            "list" | "ls" | "l" => Ok(Command::List),
            "platform" | "p" => {
                let line = parse_line(args.first().copied())?;
                let platform = args
                    .get(1)
                    .ok_or(CommandError::MissingArgument("platform name"))?
                    .parse::<Platform>()
                    .map_err(|e| CommandError::InvalidPlatform(e.to_string()))?;
                Ok(Command::Platform { line, platform })
            }
            "copy" | "c" => Ok(Command::Copy {
                line: parse_line(args.first().copied())?,
            }),
            "url" | "u" | "open" | "o" => Ok(Command::Url {
                line: parse_line(args.first().copied())?,
            }),
            "urls" => Ok(Command::Urls {
                line: parse_line(args.first().copied())?,
            }),
            "platforms" => Ok(Command::Platforms),
            "generate" | "g" => {
                let script = rest
                    .trim_start()
                    .split_once(char::is_whitespace)
                    .map(|(_, script)| script.trim())
                    .filter(|script| !script.is_empty())
                    .ok_or(CommandError::MissingArgument("script text"))?;
                Ok(Command::Generate {
                    script: script.to_string(),
                })
            }
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Help text for interactive mode
    pub fn help() -> &'static str {
        "Commands:\n\
        \x20 /list                    - Show results\n\
        \x20 /platform <n> <name>     - Use storyblocks, pexels or pixabay for line n\n\
        \x20 /copy <n>                - Copy the keywords of line n\n\
        \x20 /url <n>                 - Show the search link of line n\n\
        \x20 /urls <n>                - Show line n's search links on every platform\n\
        \x20 /platforms               - List supported platforms\n\
        \x20 /generate <script>       - Generate keywords for a new script\n\
        \x20 /help                    - Show this help\n\
        \x20 /exit                    - Leave\n\
        Any other text is sent as a new script."
    }
}

/// Parse a 1-based line number into a 0-based index
fn parse_line(arg: Option<&str>) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument("line number"))?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidLine(arg.to_string())),
    }
}
