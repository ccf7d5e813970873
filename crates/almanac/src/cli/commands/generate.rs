//! Generate command

use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use almanac_changelog::{Changelog, ChangelogEntry, ChangelogGenerator, CommitType, VersionChangelog};
use almanac_core::config::{load_config_or_default, validate_config};
use almanac_core::{Config, ParserMode};
use almanac_git::GitRepo;
use almanac_tasks::TaskReporterRegistry;

use crate::cli::output::{self, ConsoleReporter};
use crate::cli::{Cli, OutputFormat};

/// Generate a changelog from the repository history
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Parse commit messages strictly
    #[arg(long, conflicts_with = "loose")]
    pub strict: bool,

    /// Tolerate blank-line irregularities in commit messages
    #[arg(long)]
    pub loose: bool,

    /// Version for commits after the latest tag
    #[arg(long, value_name = "VERSION")]
    pub current_version: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Layer command-line flags over the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if self.strict {
            config.parser.mode = ParserMode::Strict;
        } else if self.loose {
            config.parser.mode = ParserMode::Loose;
        }
        if let Some(version) = &self.current_version {
            config.changelog.current_version = Some(version.clone());
        }
    }

    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            strict = self.strict,
            loose = self.loose,
            current_version = ?self.current_version,
            "executing generate command"
        );
        let cwd = std::env::current_dir()?;
        let (mut config, _) = load_config_or_default(&cwd)?;
        self.apply_overrides(&mut config);
        validate_config(&config)?;

        let repo = GitRepo::discover(&cwd)?;

        let mut reporters = TaskReporterRegistry::new();
        if cli.verbose && !cli.quiet {
            reporters.register(Arc::new(ConsoleReporter));
        }

        let generator = ChangelogGenerator::new(config, Rc::new(repo), Arc::new(reporters));
        let changelog = generator.generate()?;

        let rendered = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&changelog)?,
            OutputFormat::Text => render_text(&changelog),
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Changelog written to {}",
                        style(path.display()).cyan()
                    ));
                }
            }
            None => {
                if changelog.is_empty() && !cli.quiet {
                    output::warning("No versions found. Tag a release or pass --current-version.");
                }
                print!("{}", rendered);
            }
        }

        Ok(())
    }
}

/// Plain text summary, newest version first
pub fn render_text(changelog: &Changelog) -> String {
    let mut out = String::new();
    for version in changelog.versions.iter().rev() {
        render_version(&mut out, version);
    }
    out
}

fn render_version(out: &mut String, version: &VersionChangelog) {
    let info = &version.version;
    let _ = match &info.tag {
        Some(tag) => writeln!(out, "{} ({})", info.version, tag),
        None => writeln!(out, "{} (unreleased)", info.version),
    };

    if version.entries.is_empty() {
        let _ = writeln!(out, "  No changes");
    }

    for (kind, entries) in group_by_kind(&version.entries) {
        let _ = writeln!(out, "  {}", kind);
        for entry in entries {
            let _ = writeln!(out, "    - {}", entry_line(entry));
        }
    }

    let breaking: Vec<&ChangelogEntry> = version.breaking_entries().collect();
    if !breaking.is_empty() {
        let _ = writeln!(out, "  Breaking changes");
        for entry in breaking {
            if entry.breaking_changes.is_empty() {
                let _ = writeln!(out, "    - {}", entry.summary);
            }
            for description in &entry.breaking_changes {
                let _ = writeln!(out, "    - {}", description);
            }
        }
    }

    out.push('\n');
}

/// Entries grouped by type, groups in order of first appearance
fn group_by_kind(entries: &[ChangelogEntry]) -> Vec<(&CommitType, Vec<&ChangelogEntry>)> {
    let mut groups: Vec<(&CommitType, Vec<&ChangelogEntry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(kind, _)| *kind == &entry.kind) {
            Some((_, group)) => group.push(entry),
            None => groups.push((&entry.kind, vec![entry])),
        }
    }
    groups
}

fn entry_line(entry: &ChangelogEntry) -> String {
    let short_hash: String = entry.hash.chars().take(7).collect();
    match &entry.scope {
        Some(scope) => format!("{}: {} ({})", scope, entry.summary, short_hash),
        None => format!("{} ({})", entry.summary, short_hash),
    }
}
