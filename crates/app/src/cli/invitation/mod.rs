use clap::{Args, Subcommand};

mod expire;
mod issue;
mod validate;

#[derive(Debug, Args)]
pub(crate) struct InvitationCommand {
    #[command(subcommand)]
    command: InvitationSubcommand,
}

#[derive(Debug, Subcommand)]
enum InvitationSubcommand {
    /// Spend one of a profile's invitations on a new code
    Issue(issue::IssueInvitationArgs),

    /// Check whether a code can be redeemed
    Validate(validate::ValidateInvitationArgs),

    /// Mark past-due pending invitations as expired
    Expire(expire::ExpireInvitationsArgs),
}

pub(crate) async fn run(command: InvitationCommand) -> Result<(), String> {
    match command.command {
        InvitationSubcommand::Issue(args) => issue::run(args).await,
        InvitationSubcommand::Validate(args) => validate::run(args).await,
        InvitationSubcommand::Expire(args) => expire::run(args).await,
    }
}
