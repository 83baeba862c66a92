use clap::Args;
use vitrine::revalidation::{CatalogChange, plan_catalog_change};

use super::DispatchArgs;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Changed product id
    #[arg(long)]
    product_id: Option<String>,

    /// Changed category slug
    #[arg(long)]
    category_slug: Option<String>,

    #[command(flatten)]
    dispatch: DispatchArgs,
}

pub(crate) async fn run(args: CatalogArgs) -> Result<(), String> {
    let change = CatalogChange {
        product_id: args.product_id,
        category_slug: args.category_slug,
    };

    let tags = plan_catalog_change(&change, &args.dispatch.locales());

    super::dispatch(tags, &args.dispatch).await
}
