//! Command-line interface for script2stock
//!
//! Turn video scripts into stock footage keywords.
//!
//! # Usage
//!
//! ```bash
//! # Generate keywords for a script file and print a table of search links
//! script2stock generate --file script.txt
//!
//! # Ask for dense overlays and keep browsing the results interactively
//! script2stock generate --file script.txt --overlay-frequency high --interactive
//!
//! # Re-render a saved response without contacting the service
//! script2stock links response.txt --platform pexels --format json
//! ```

mod clipboard;
mod commands;
mod formatter;
mod interactive;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clipboard::SystemClipboard;
use formatter::{Formatter, FormatterFactory, OutputFormat};
use interactive::Interactive;
use script2stock_client::{ClientConfig, HttpKeywordClient};
use script2stock_core::{Error, GenerationSession, KeywordService, OverlayFrequency, Platform};
use script2stock_utils::{LogFormat, Settings};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "script2stock", version)]
#[command(about = "Turn video scripts into stock footage keywords", long_about = None)]
struct Cli {
    /// Settings file to use instead of the user and project files
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a script to the keyword service and show the results
    Generate(GenerateArgs),
    /// Show search links for an already-saved keyword response
    Links(LinksArgs),
    /// List supported stock platforms
    Platforms {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Script text; read from --file or stdin when omitted
    script: Option<String>,

    /// Read the script from a file
    #[arg(short, long, conflicts_with = "script")]
    file: Option<PathBuf>,

    /// Overlay frequency hint (low, medium, high)
    #[arg(short = 'o', long, value_parser = parse_overlay_frequency)]
    overlay_frequency: Option<OverlayFrequency>,

    /// Keyword service endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    timeout: Option<u64>,

    /// Keep browsing the results interactively
    #[arg(short, long)]
    interactive: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args, Debug)]
struct LinksArgs {
    /// File holding the raw keyword response; stdin when omitted
    file: Option<PathBuf>,

    /// Keep browsing the results interactively
    #[arg(short, long)]
    interactive: bool,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Platform selected for every line (storyblocks, pexels, pixabay)
    #[arg(short, long, value_parser = parse_platform)]
    platform: Option<Platform>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse().map_err(|e: Error| e.to_string())
}

fn parse_overlay_frequency(value: &str) -> Result<OverlayFrequency, String> {
    value.parse().map_err(|e: Error| e.to_string())
}

/// Message shown to the user for a failed operation
pub(crate) fn user_alert(err: &Error) -> String {
    match err {
        Error::EmptyInput => "Please paste a script first.".to_string(),
        err if err.is_request_failure() => "Something went wrong.".to_string(),
        other => other.to_string(),
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => {
            let mut settings = Settings::from_file(path)?;
            settings.merge(Settings::from_env()?);
            settings
        }
        None => Settings::load_merged()?,
    };
    Ok(settings)
}

/// Platform from the command line, else from settings, else the default
fn resolve_platform(flag: Option<Platform>, settings: &Settings) -> anyhow::Result<Platform> {
    if let Some(platform) = flag {
        return Ok(platform);
    }
    match settings.default_platform.as_deref() {
        Some(name) => Ok(name.parse::<Platform>().context("Invalid defaultPlatform setting")?),
        None => Ok(Platform::default()),
    }
}

fn resolve_overlay_frequency(
    flag: Option<OverlayFrequency>,
    settings: &Settings,
) -> anyhow::Result<Option<OverlayFrequency>> {
    if flag.is_some() {
        return Ok(flag);
    }
    settings
        .overlay_frequency
        .as_deref()
        .map(|value| value.parse::<OverlayFrequency>().context("Invalid overlayFrequency setting"))
        .transpose()
}

/// Client settings: command-line flags first, then the merged settings
fn client_config(
    endpoint: Option<&String>,
    timeout: Option<u64>,
    settings: &Settings,
) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(endpoint) = endpoint.or(settings.endpoint.as_ref()) {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(timeout) = timeout.or(settings.timeout_secs) {
        config = config.with_timeout(timeout);
    }
    config
}

/// Read text from a file, or from stdin when no file is given
fn read_input(file: Option<&PathBuf>, prompt: &str) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("{prompt}");
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

fn show_results<S: KeywordService>(session: &GenerationSession<S>, formatter: &dyn Formatter) {
    println!("{}", formatter.format_results(&session.lines()));
}

async fn run_generate(args: GenerateArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let formatter = FormatterFactory::create(args.view.format);
    let platform = resolve_platform(args.view.platform, settings)?;
    let overlay_frequency = resolve_overlay_frequency(args.overlay_frequency, settings)?;

    let script = match &args.script {
        Some(script) => script.clone(),
        None => read_input(
            args.file.as_ref(),
            "Paste your video script, then press Ctrl-D:",
        )?,
    };

    let client = HttpKeywordClient::with_config(client_config(
        args.endpoint.as_ref(),
        args.timeout,
        settings,
    ))?;
    info!(endpoint = %client.config().endpoint, "Using keyword service");
    let mut session = GenerationSession::new(client);

    if std::io::stderr().is_terminal() && !script.trim().is_empty() {
        eprintln!("Generating...");
    }

    if let Err(e) = session.generate(&script, overlay_frequency).await {
        if e.is_request_failure() {
            error!("Keyword generation failed: {e}");
        }
        eprintln!("{}", formatter.format_error(&user_alert(&e)));
        return Ok(ExitCode::FAILURE);
    }
    session.select_platform_for_all(platform);
    show_results(&session, formatter.as_ref());

    if args.interactive {
        Interactive::new(session, formatter, SystemClipboard::default())
            .with_overlay_frequency(overlay_frequency)
            .with_platform(platform)
            .run()
            .await?;
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_links(args: LinksArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let formatter = FormatterFactory::create(args.view.format);
    let platform = resolve_platform(args.view.platform, settings)?;
    let overlay_frequency = resolve_overlay_frequency(None, settings)?;
    let raw = read_input(
        args.file.as_ref(),
        "Paste the keyword response, then press Ctrl-D:",
    )?;
    let raw = raw.strip_suffix('\n').unwrap_or(&raw);

    // Links mode never contacts the service, the client only backs
    // scripts typed in interactive mode.
    let client = HttpKeywordClient::with_config(client_config(None, None, settings))?;
    let mut session = GenerationSession::new(client);
    let lines = session.load_results(raw)?;
    debug!(lines, "Loaded saved response");
    session.select_platform_for_all(platform);
    show_results(&session, formatter.as_ref());

    if args.interactive {
        Interactive::new(session, formatter, SystemClipboard::default())
            .with_overlay_frequency(overlay_frequency)
            .with_platform(platform)
            .run()
            .await?;
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;

    script2stock_utils::init_tracing_with(
        cli.log_format.or(settings.log_format).unwrap_or_default(),
    );

    match cli.command {
        Commands::Generate(args) => run_generate(args, &settings).await,
        Commands::Links(args) => run_links(args, &settings).await,
        Commands::Platforms { format } => {
            println!("{}", FormatterFactory::create(format).format_platforms());
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::parse_from([
            "script2stock",
            "generate",
            "--file",
            "script.txt",
            "-o",
            "HIGH",
            "--platform",
            "pexels",
            "--format",
            "json",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("Expected generate command");
        };
        assert_eq!(args.file, Some(PathBuf::from("script.txt")));
        assert_eq!(args.overlay_frequency, Some(OverlayFrequency::High));
        assert_eq!(args.view.platform, Some(Platform::Pexels));
        assert_eq!(args.view.format, OutputFormat::Json);
        assert!(!args.interactive);
    }

    #[test]
    fn test_rejects_unknown_platform() {
        let result = Cli::try_parse_from(["script2stock", "links", "--platform", "vimeo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_alerts() {
        assert_eq!(user_alert(&Error::EmptyInput), "Please paste a script first.");
        assert_eq!(
            user_alert(&Error::RequestFailed("HTTP 500".to_string())),
            "Something went wrong."
        );
        assert_eq!(
            user_alert(&Error::Service("quota".to_string())),
            "Something went wrong."
        );
    }

    #[test]
    fn test_resolution_order() {
        let settings = Settings {
            endpoint: Some("http://localhost:4000/generate-keywords".to_string()),
            timeout_secs: Some(30),
            overlay_frequency: Some("low".to_string()),
            default_platform: Some("pixabay".to_string()),
            ..Settings::default()
        };

        assert_eq!(resolve_platform(None, &settings).unwrap(), Platform::Pixabay);
        assert_eq!(
            resolve_platform(Some(Platform::Pexels), &settings).unwrap(),
            Platform::Pexels
        );
        assert_eq!(
            resolve_overlay_frequency(None, &settings).unwrap(),
            Some(OverlayFrequency::Low)
        );
        assert_eq!(
            resolve_overlay_frequency(None, &Settings::default()).unwrap(),
            None
        );

        let cli = Cli::parse_from(["script2stock", "generate", "hello", "--timeout", "5"]);
        let Commands::Generate(args) = cli.command else {
            panic!("Expected generate command");
        };
        let config = client_config(args.endpoint.as_ref(), args.timeout, &settings);
        assert_eq!(config.endpoint, "http://localhost:4000/generate-keywords");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_links_client_uses_settings() {
        let settings = Settings {
            endpoint: Some("http://127.0.0.1:9/generate-keywords".to_string()),
            timeout_secs: Some(7),
            overlay_frequency: Some("high".to_string()),
            ..Settings::default()
        };

        let config = client_config(None, None, &settings);
        assert_eq!(config.endpoint, "http://127.0.0.1:9/generate-keywords");
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(
            resolve_overlay_frequency(None, &settings).unwrap(),
            Some(OverlayFrequency::High)
        );

        let defaults = client_config(None, None, &Settings::default());
        assert_eq!(defaults, ClientConfig::default());
    }

    #[test]
    fn test_endpoint_flag_beats_settings() {
        let settings = Settings {
            endpoint: Some("http://settings.example/generate-keywords".to_string()),
            ..Settings::default()
        };
        let flag = "http://flag.example/generate-keywords".to_string();

        let config = client_config(Some(&flag), None, &settings);
        assert_eq!(config.endpoint, flag);
    }

    #[test]
    fn test_invalid_platform_setting() {
        let settings = Settings {
            default_platform: Some("youtube".to_string()),
            ..Settings::default()
        };
        assert!(resolve_platform(None, &settings).is_err());
    }
}
