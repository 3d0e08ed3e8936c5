//! Report rendering
//!
//! In debug mode the resolved URLs are printed instead of opened; this module
//! turns the dispatch report into jsonl (default), a json array, a markdown
//! table, or bare URLs.

use crate::core::model::{DispatchRecord, DispatchReport, LaunchStatus};
use std::io::Write;

/// How the dispatch report is printed (`--format`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// `--format` plus `--pretty`
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Prints dispatch records in the configured format
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Records in receive order, formatted
    pub fn render(&self, report: &DispatchReport) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
            OutputFormat::Raw => self.render_raw(report),
        }
    }

    /// Write the rendered report; nothing at all for an empty report
    pub fn render_to<W: Write>(
        &self,
        report: &DispatchReport,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(report);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    /// One record per line, ready for `jq`
    fn render_jsonl(&self, report: &DispatchReport) -> String {
        report
            .records
            .iter()
            .filter_map(|record| {
                if self.config.pretty {
                    serde_json::to_string_pretty(record).ok()
                } else {
                    serde_json::to_string(record).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// All records as one JSON array
    fn render_json(&self, report: &DispatchReport) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&report.records).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&report.records).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Table of records, then one bullet per failed token
    fn render_markdown(&self, report: &DispatchReport) -> String {
        if report.is_empty() {
            return String::new();
        }

        let mut output = String::from("| # | Token | Kind | URL | Status |\n");
        output.push_str("|---|-------|------|-----|--------|\n");
        for record in &report.records {
            output.push_str(&format!(
                "| {} | `{}` | {} | <{}> | {} |\n",
                record.index,
                record.token,
                record.kind,
                record.url,
                status_label(record)
            ));
        }

        let failures: Vec<_> = report.failures().collect();
        if !failures.is_empty() {
            output.push_str("\n## Errors\n\n");
            for record in failures {
                output.push_str(&format!(
                    "- **{}**: {}\n",
                    record.token,
                    record.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        output.trim_end().to_string()
    }

    /// Bare URLs, one per line
    fn render_raw(&self, report: &DispatchReport) -> String {
        report
            .records
            .iter()
            .map(|record| record.url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn status_label(record: &DispatchRecord) -> &'static str {
    match record.status {
        LaunchStatus::Opened => "opened",
        LaunchStatus::Printed => "printed",
        LaunchStatus::Failed => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::ClassKind;
    use crate::core::model::DispatchResult;

    fn sample_report() -> DispatchReport {
        let mut report = DispatchReport::new();
        report.push(DispatchRecord::new(
            DispatchResult {
                index: 1,
                token: "UT-2".to_string(),
                kind: ClassKind::Tracker,
                url: "https://jira.nutanix.com/browse/UT-2".to_string(),
            },
            LaunchStatus::Printed,
        ));
        report.push(DispatchRecord::new(
            DispatchResult {
                index: 0,
                token: "KB-1".to_string(),
                kind: ClassKind::KnowledgeBase,
                url: "https://portal.nutanix.com/kb/1".to_string(),
            },
            LaunchStatus::Printed,
        ));
        report
    }

    fn renderer(format: OutputFormat, pretty: bool) -> Renderer {
        Renderer::with_config(RenderConfig::with_pretty(format, pretty))
    }

    #[test]
    fn test_render_jsonl() {
        let output = renderer(OutputFormat::Jsonl, false).render(&sample_report());

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["url"], "https://jira.nutanix.com/browse/UT-2");
        assert_eq!(first["index"], 1);
    }

    #[test]
    fn test_render_json() {
        let output = renderer(OutputFormat::Json, false).render(&sample_report());

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_render_json_pretty() {
        let output = renderer(OutputFormat::Json, true).render(&sample_report());
        assert!(output.contains("  \"token\""));
    }

    #[test]
    fn test_render_markdown() {
        let output = renderer(OutputFormat::Markdown, false).render(&sample_report());

        assert!(output.starts_with("| # | Token"));
        assert!(output.contains("<https://portal.nutanix.com/kb/1>"));
        assert!(!output.contains("## Errors"));
    }

    #[test]
    fn test_render_markdown_errors() {
        let mut report = sample_report();
        report.push(DispatchRecord::failed(
            DispatchResult {
                index: 2,
                token: "TH-3".to_string(),
                kind: ClassKind::Tracker,
                url: "https://jira.nutanix.com/browse/TH-3".to_string(),
            },
            "unsupported platform: plan9",
        ));

        let output = renderer(OutputFormat::Markdown, false).render(&report);
        assert!(output.contains("| failed |"));
        assert!(output.contains("- **TH-3**: unsupported platform: plan9"));
    }

    #[test]
    fn test_render_markdown_empty() {
        let output = renderer(OutputFormat::Markdown, false).render(&DispatchReport::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_raw() {
        let output = renderer(OutputFormat::Raw, false).render(&sample_report());
        assert_eq!(
            output,
            "https://jira.nutanix.com/browse/UT-2\nhttps://portal.nutanix.com/kb/1"
        );
    }

    #[test]
    fn test_render_to_writer() {
        let mut buffer = Vec::new();
        renderer(OutputFormat::Raw, false)
            .render_to(&sample_report(), &mut buffer)
            .unwrap();
        assert!(String::from_utf8(buffer).unwrap().ends_with("kb/1\n"));

        let mut empty = Vec::new();
        renderer(OutputFormat::Jsonl, false)
            .render_to(&DispatchReport::new(), &mut empty)
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("raw".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "yaml".parse::<OutputFormat>();
        assert!(result.unwrap_err().contains("Unknown format"));
    }
}
