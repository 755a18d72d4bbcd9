use clap::Args;
use surecrm_app::domain::profiles::{PgProfilesService, ProfilesService, records::ProfileUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeactivateProfileArgs {
    #[arg(long)]
    uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: DeactivateProfileArgs) -> Result<(), String> {
    let service = PgProfilesService::new(args.database.connect().await?);

    service
        .deactivate_profile(ProfileUuid::from_uuid(args.uuid))
        .await
        .map_err(|error| format!("failed to deactivate profile: {error}"))?;

    println!("deactivated: {}", args.uuid);

    Ok(())
}
