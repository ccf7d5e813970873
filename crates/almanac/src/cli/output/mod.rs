//! Output formatting utilities

use console::style;

use almanac_tasks::{TaskEvent, TaskReporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Reporter that prints task progress to stderr
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl TaskReporter for ConsoleReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Started { task } => {
                eprintln!("{} {}", style("→").blue(), task);
            }
            TaskEvent::Completed { task, duration } => {
                eprintln!(
                    "{} {} {}",
                    style("✓").green(),
                    task,
                    style(format!("({}ms)", duration.as_millis())).dim()
                );
            }
            TaskEvent::Skipped { task, reason } => {
                eprintln!("{} {} {}", style("-").yellow(), task, style(reason).dim());
            }
            TaskEvent::Failed { task, error, .. } => {
                eprintln!("{} {}: {}", style("✗").red(), task, error);
            }
            TaskEvent::Scheduled { .. } | TaskEvent::AllCompleted { .. } => {}
        }
    }
}
