use clap::{Parser, Subcommand};
use vitrine_app::config::LoggingConfig;

mod revalidate;

#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Vitrine CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Invalidate cached storefront reads
    Revalidate(revalidate::RevalidateCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Revalidate(command) => revalidate::run(command).await,
        }
    }
}
