use clap::Args;
use surecrm_app::domain::invitations::{
    InvitationsService, PgInvitationsService, data::InvitationValidation, policy::InvitationPolicy,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ValidateInvitationArgs {
    #[arg(long)]
    code: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ValidateInvitationArgs) -> Result<(), String> {
    let service =
        PgInvitationsService::new(args.database.connect().await?, InvitationPolicy::default());

    let validation = service
        .validate_code(&args.code)
        .await
        .map_err(|error| format!("failed to validate invitation: {error}"))?;

    match validation {
        InvitationValidation::Valid(invitation) => {
            println!("valid: true");
            println!("code: {}", invitation.code);
            println!("inviter_uuid: {}", invitation.inviter);
        }
        InvitationValidation::Invalid(rejection) => {
            println!("valid: false");
            println!("reason: {}", rejection.reason());
        }
    }

    Ok(())
}
