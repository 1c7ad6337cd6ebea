mod ingest;
mod transaction;
mod transform;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Transform(args) => transform::handle(&args, ctx, flags),
        Commands::Ingest(args) => ingest::handle(&args, ctx, flags).await,
        Commands::Transaction(args) => transaction::handle(&args, ctx, flags),
    }
}
