use clap::Args;
use jiff::SignedDuration;
use surecrm_app::domain::{
    invitations::{
        InvitationsService, PgInvitationsService,
        data::NewInvitation,
        policy::{InvitationPolicy, MAX_TTL_HOURS},
    },
    profiles::records::ProfileUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct IssueInvitationArgs {
    #[arg(long)]
    inviter_uuid: Uuid,

    #[arg(long)]
    invitee_email: Option<String>,

    /// Hours until the code expires; codes never expire when omitted
    #[arg(
        long,
        env = "INVITATION_TTL_HOURS",
        value_parser = clap::value_parser!(i64).range(1..=MAX_TTL_HOURS)
    )]
    ttl_hours: Option<i64>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: IssueInvitationArgs) -> Result<(), String> {
    let policy = InvitationPolicy {
        ttl: args.ttl_hours.map(SignedDuration::from_hours),
        ..InvitationPolicy::default()
    };

    let service = PgInvitationsService::new(args.database.connect().await?, policy);

    let invitation = service
        .issue_invitation(
            ProfileUuid::from_uuid(args.inviter_uuid),
            NewInvitation {
                invitee_email: args.invitee_email,
            },
        )
        .await
        .map_err(|error| format!("failed to issue invitation: {error}"))?;

    println!("invitation_uuid: {}", invitation.uuid);
    println!("code: {}", invitation.code);

    if let Some(expires_at) = invitation.expires_at {
        println!("expires_at: {expires_at}");
    }

    Ok(())
}
