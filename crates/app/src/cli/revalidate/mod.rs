use std::sync::Arc;

use clap::{Args, Subcommand};
use vitrine::{locale::Locale, tags::TagSet};
use vitrine_app::{
    cache::PurgeClient, config::PurgeArgs, domain::revalidation::CacheRevalidationService,
};

mod catalog;
mod category;
mod home;

#[derive(Debug, Args)]
pub(crate) struct RevalidateCommand {
    #[command(subcommand)]
    command: RevalidateSubcommand,
}

#[derive(Debug, Subcommand)]
enum RevalidateSubcommand {
    /// Products and categories changed
    Catalog(catalog::CatalogArgs),

    /// The home page entry changed
    Home(home::HomeArgs),

    /// Category copy changed
    Category(category::CategoryArgs),
}

/// Options shared by every revalidation.
#[derive(Debug, Args)]
pub(crate) struct DispatchArgs {
    /// Print the planned tags without purging anything
    #[arg(long)]
    dry_run: bool,

    /// Locales to revalidate; every supported locale when omitted
    #[arg(long = "locale")]
    locales: Vec<Locale>,

    #[command(flatten)]
    purge: PurgeArgs,
}

impl DispatchArgs {
    pub(crate) fn locales(&self) -> Vec<Locale> {
        if self.locales.is_empty() {
            Locale::ALL.to_vec()
        } else {
            self.locales.clone()
        }
    }
}

pub(crate) async fn run(command: RevalidateCommand) -> Result<(), String> {
    match command.command {
        RevalidateSubcommand::Catalog(args) => catalog::run(args).await,
        RevalidateSubcommand::Home(args) => home::run(args).await,
        RevalidateSubcommand::Category(args) => category::run(args).await,
    }
}

/// Print or purge `tags`.
pub(crate) async fn dispatch(tags: TagSet, args: &DispatchArgs) -> Result<(), String> {
    if args.dry_run {
        for tag in &tags {
            println!("{tag}");
        }

        println!("{} tag(s) planned", tags.len());

        return Ok(());
    }

    let purge = args.purge.purge_config().ok_or_else(|| {
        "no purge endpoint configured; pass --purge-endpoint or --dry-run".to_string()
    })?;

    let store = Arc::new(PurgeClient::new(purge));
    let service = CacheRevalidationService::new(store, args.locales());
    let report = service.dispatch(tags).await;

    println!("report_id: {}", report.id);

    for tag in &report.invalidated {
        println!("purged: {tag}");
    }

    for tag in &report.failed {
        println!("failed: {tag}");
    }

    if !report.is_complete() {
        return Err(format!("{} tag(s) could not be purged", report.failed.len()));
    }

    Ok(())
}
