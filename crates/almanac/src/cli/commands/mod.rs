//! CLI commands

mod generate;
mod init;
mod parse;
mod plan;

pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use parse::ParseCommand;
pub use plan::PlanCommand;
