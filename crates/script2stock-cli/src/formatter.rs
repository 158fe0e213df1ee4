//! Output formatting for results

use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use script2stock_core::{Platform, ResolvedLine, ResultLine};
use serde_json::json;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// One block of text per line
    Plain,
    /// Machine-readable JSON
    Json,
}

pub trait Formatter: Send + Sync {
    fn format_results(&self, lines: &[ResolvedLine]) -> String;
    fn format_urls(&self, number: usize, line: &ResultLine) -> String;
    fn format_platforms(&self) -> String;
    fn format_error(&self, error: &str) -> String;
}

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format_results(&self, lines: &[ResolvedLine]) -> String {
        let mut output = String::new();
        for (idx, line) in lines.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}\n", idx + 1, line.text));
            output.push_str(&format!("     {}: {}\n", line.platform.label(), line.url));
        }
        output
    }

    fn format_urls(&self, number: usize, line: &ResultLine) -> String {
        let mut output = format!("{number}. {}\n", line.text);
        for (platform, url) in line.urls() {
            output.push_str(&format!("   {:<12} {url}\n", platform.label()));
        }
        output
    }

    fn format_platforms(&self) -> String {
        Platform::ALL
            .iter()
            .map(|p| format!("{:<12} {}\n", p.id(), p.template()))
            .collect()
    }

    fn format_error(&self, error: &str) -> String {
        format!("❌ {error}")
    }
}

pub struct TableFormatter;

impl TableFormatter {
    fn table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Formatter for TableFormatter {
    fn format_results(&self, lines: &[ResolvedLine]) -> String {
        let mut table = Self::table();
        table.set_header(vec!["#", "Line", "Keywords", "Platform", "Search"]);
        for (idx, line) in lines.iter().enumerate() {
            table.add_row(vec![
                (idx + 1).to_string(),
                line.text.clone(),
                line.keywords.clone(),
                line.platform.label().to_string(),
                line.url.clone(),
            ]);
        }
        table.to_string()
    }

    fn format_urls(&self, number: usize, line: &ResultLine) -> String {
        let mut table = Self::table();
        table.set_header(vec!["Platform", "Search"]);
        for (platform, url) in line.urls() {
            table.add_row(vec![platform.label().to_string(), url]);
        }
        format!("{number}. {}\n{table}", line.text)
    }

    fn format_platforms(&self) -> String {
        let mut table = Self::table();
        table.set_header(vec!["Id", "Name", "URL template"]);
        for platform in Platform::ALL {
            table.add_row(vec![platform.id(), platform.label(), platform.template()]);
        }
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("❌ {error}")
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_results(&self, lines: &[ResolvedLine]) -> String {
        let value: Vec<_> = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                json!({
                    "line": idx + 1,
                    "text": line.text,
                    "keywords": line.keywords,
                    "platform": line.platform,
                    "url": line.url,
                })
            })
            .collect();
        serde_json::Value::Array(value).to_string()
    }

    fn format_urls(&self, number: usize, line: &ResultLine) -> String {
        let urls: serde_json::Map<String, serde_json::Value> = line
            .urls()
            .into_iter()
            .map(|(platform, url)| (platform.id().to_string(), serde_json::Value::String(url)))
            .collect();
        json!({
            "line": number,
            "text": line.text,
            "keywords": line.keywords,
            "urls": urls,
        })
        .to_string()
    }

    fn format_platforms(&self) -> String {
        let value: Vec<_> = Platform::ALL
            .iter()
            .map(|p| json!({ "id": p.id(), "name": p.label(), "template": p.template() }))
            .collect();
        serde_json::Value::Array(value).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat) -> Box<dyn Formatter> {
        match format {
            OutputFormat::Table => Box::new(TableFormatter),
            OutputFormat::Plain => Box::new(PlainFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use script2stock_core::{PlatformSelections, interpreter};

    fn sample() -> Vec<ResolvedLine> {
        let mut selections = PlatformSelections::for_lines(2);
        selections.set(1, Platform::Pexels).unwrap();
        interpreter::resolve("[00:01] cat dog\n[00:03] rainy street", &selections)
    }

    #[test]
    fn test_plain_results() {
        let output = PlainFormatter.format_results(&sample());
        assert!(output.contains("  1. [00:01] cat dog"));
        assert!(output.contains(
            "Storyblocks: https://www.storyblocks.com/all-video/search/cat%20dog?search-origin=search_bar"
        ));
        assert!(output.contains("Pexels: https://www.pexels.com/search/videos/rainy%20street/"));
    }

    #[test]
    fn test_table_results_contain_urls() {
        let output = TableFormatter.format_results(&sample());
        assert!(output.contains("Keywords"));
        assert!(output.contains("rainy street"));
    }

    #[test]
    fn test_json_results() {
        let output = JsonFormatter.format_results(&sample());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["line"], 1);
        assert_eq!(parsed[0]["keywords"], "cat dog");
        assert_eq!(parsed[1]["platform"], "pexels");
        assert_eq!(
            parsed[1]["url"],
            "https://www.pexels.com/search/videos/rainy%20street/"
        );
    }

    #[test]
    fn test_json_urls() {
        let line = ResultLine::parse("[9] snow");
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_urls(4, &line)).unwrap();
        assert_eq!(parsed["line"], 4);
        assert_eq!(parsed["urls"]["pixabay"], "https://pixabay.com/videos/search/snow/");
    }

    #[test]
    fn test_platform_listing() {
        let output = PlainFormatter.format_platforms();
        for platform in Platform::ALL {
            assert!(output.contains(platform.template()));
        }
    }

    #[test]
    fn test_error_formats() {
        assert_eq!(PlainFormatter.format_error("Something went wrong."), "❌ Something went wrong.");
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_error("boom")).unwrap();
        assert_eq!(parsed["error"], "boom");
    }
}
