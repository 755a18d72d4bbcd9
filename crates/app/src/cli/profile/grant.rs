use clap::Args;
use surecrm_app::domain::profiles::{PgProfilesService, ProfilesService, records::ProfileUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct GrantInvitationsArgs {
    #[arg(long)]
    uuid: Uuid,

    /// Invitations to add
    #[arg(long)]
    count: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: GrantInvitationsArgs) -> Result<(), String> {
    let service = PgProfilesService::new(args.database.connect().await?);

    let profile = service
        .grant_invitations(ProfileUuid::from_uuid(args.uuid), args.count)
        .await
        .map_err(|error| format!("failed to grant invitations: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("invitations_left: {}", profile.invitations_left);

    Ok(())
}
