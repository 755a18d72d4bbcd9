use clap::{Args, Subcommand};

mod create;
mod deactivate;
mod grant;

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Create a profile outside the invitation flow
    Create(create::CreateProfileArgs),

    /// Soft-deactivate a profile
    Deactivate(deactivate::DeactivateProfileArgs),

    /// Add invitations to a profile's allotment
    Grant(grant::GrantInvitationsArgs),
}

pub(crate) async fn run(command: ProfileCommand) -> Result<(), String> {
    match command.command {
        ProfileSubcommand::Create(args) => create::run(args).await,
        ProfileSubcommand::Deactivate(args) => deactivate::run(args).await,
        ProfileSubcommand::Grant(args) => grant::run(args).await,
    }
}
