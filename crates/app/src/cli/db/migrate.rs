use clap::Args;
use surecrm_app::database;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    database::migrate(db.pool())
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
