use clap::Args;
use surecrm_app::domain::invitations::{
    InvitationsService, PgInvitationsService, policy::InvitationPolicy,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ExpireInvitationsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ExpireInvitationsArgs) -> Result<(), String> {
    let service =
        PgInvitationsService::new(args.database.connect().await?, InvitationPolicy::default());

    let expired = service
        .expire_invitations()
        .await
        .map_err(|error| format!("failed to expire invitations: {error}"))?;

    println!("expired: {expired}");

    Ok(())
}
