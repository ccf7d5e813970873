//! Plan command

use std::rc::Rc;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use almanac_changelog::{ChangelogGenerator, InMemorySource};
use almanac_core::config::load_config_or_default;
use almanac_tasks::{TaskKind, TracingReporter};

use crate::cli::{output, Cli, OutputFormat};

/// Show the order the changelog tasks run in
#[derive(Debug, Args)]
pub struct PlanCommand {}

impl PlanCommand {
    /// Execute the plan command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing plan command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        // Planning never reads history
        let generator = ChangelogGenerator::new(
            config,
            Rc::new(InMemorySource::new()),
            Arc::new(TracingReporter),
        );
        let plan = generator.plan()?;

        match cli.format {
            OutputFormat::Json => {
                let names: Vec<&str> = plan.iter().map(TaskKind::name).collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Execution order"));
                }
                print!("{}", render_text(&plan));
            }
        }

        Ok(())
    }
}

fn render_text(plan: &[TaskKind]) -> String {
    plan.iter()
        .enumerate()
        .map(|(i, kind)| format!("  {} {}\n", style(format!("{}.", i + 1)).dim(), kind))
        .collect()
}
