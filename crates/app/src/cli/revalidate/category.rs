use clap::Args;
use vitrine::revalidation::{ContentChange, ContentType, plan_content_change};

use super::DispatchArgs;

#[derive(Debug, Args)]
pub(crate) struct CategoryArgs {
    /// Category slug whose copy changed
    #[arg(long)]
    slug: String,

    #[command(flatten)]
    dispatch: DispatchArgs,
}

pub(crate) async fn run(args: CategoryArgs) -> Result<(), String> {
    let slug = args.slug.trim();

    if slug.is_empty() {
        return Err("slug cannot be empty".to_string());
    }

    let locales = args.dispatch.locales();

    let change = locales.iter().fold(
        ContentChange::new(ContentType::Category),
        |change, &locale| change.with_slugs(locale, vec![slug.to_string()]),
    );

    let tags = plan_content_change(&change, &locales);

    super::dispatch(tags, &args.dispatch).await
}
