//! Parse command

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use almanac_changelog::{parse, ParsedCommitMessage};
use almanac_core::config::load_config_or_default;
use almanac_core::ParserMode;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Parse a single commit message
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Parse strictly regardless of configuration
    #[arg(long)]
    pub strict: bool,

    /// File holding the message, `-` or nothing to read stdin
    pub file: Option<PathBuf>,
}

impl ParseCommand {
    fn read_message(&self) -> anyhow::Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    fn mode(&self) -> anyhow::Result<ParserMode> {
        if self.strict {
            return Ok(ParserMode::Strict);
        }
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;
        Ok(config.parser.mode)
    }

    /// Execute the parse command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, file = ?self.file, "executing parse command");
        let text = self.read_message()?;
        let mode = self.mode()?;

        match parse(&text, mode) {
            Ok(message) => {
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&message)?);
                    }
                    OutputFormat::Text => {
                        if !cli.quiet {
                            print!("{}", render_text(&message));
                        }
                    }
                }
                Ok(())
            }
            Err(e) => {
                if cli.format == OutputFormat::Json {
                    let (line, column) = e.position();
                    let json = serde_json::json!({
                        "error": e.message,
                        "line": line,
                        "column": column,
                    });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                Err(e.into())
            }
        }
    }
}

fn render_text(message: &ParsedCommitMessage) -> String {
    let header = &message.header;
    let mut lines = vec![
        output::header("Commit message"),
        output::key_value("Type", header.commit_type.as_str()),
    ];
    if let Some(scope) = &header.scope {
        lines.push(output::key_value("Scope", scope));
    }
    lines.push(output::key_value("Description", &header.description));
    lines.push(output::key_value(
        "Breaking",
        if message.is_breaking_change() { "yes" } else { "no" },
    ));

    if !message.body.is_empty() {
        lines.push(String::new());
        lines.push(output::header("Body"));
        for paragraph in &message.body {
            for line in paragraph.lines() {
                lines.push(format!("  {}", line));
            }
            lines.push(String::new());
        }
        lines.pop();
    }

    if !message.footers.is_empty() {
        lines.push(String::new());
        lines.push(output::header("Footers"));
        for footer in &message.footers {
            lines.push(output::key_value(footer.name.as_str(), &footer.value));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_flag_wins() {
        let command = ParseCommand {
            strict: true,
            file: None,
        };
        assert_eq!(command.mode().unwrap(), ParserMode::Strict);
    }

    #[test]
    fn test_reads_message_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("MSG");
        std::fs::write(&path, "fix: a\n").unwrap();

        let command = ParseCommand {
            strict: false,
            file: Some(path),
        };
        assert_eq!(command.read_message().unwrap(), "fix: a\n");
    }

    #[test]
    fn test_render_text_lists_sections() {
        let message = parse("feat(api)!: drop v1\n\nOld clients break.\n\nRefs #9", true).unwrap();
        let text = console::strip_ansi_codes(&render_text(&message)).to_string();

        assert!(text.contains("Type: feat"));
        assert!(text.contains("Scope: api"));
        assert!(text.contains("Breaking: yes"));
        assert!(text.contains("  Old clients break."));
        assert!(text.contains("Refs: #9"));
    }
}
