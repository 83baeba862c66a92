use clap::Args;
use vitrine::revalidation::{ContentChange, plan_content_change};

use super::DispatchArgs;

#[derive(Debug, Args)]
pub(crate) struct HomeArgs {
    /// Featured category slugs, comma separated
    #[arg(long, value_delimiter = ',')]
    featured: Vec<String>,

    #[command(flatten)]
    dispatch: DispatchArgs,
}

pub(crate) async fn run(args: HomeArgs) -> Result<(), String> {
    let change = ContentChange::home_with_featured(&args.featured);

    let tags = plan_content_change(&change, &args.dispatch.locales());

    super::dispatch(tags, &args.dispatch).await
}
