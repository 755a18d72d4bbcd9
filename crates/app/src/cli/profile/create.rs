use clap::Args;
use surecrm_app::domain::{
    emails::normalize_email,
    invitations::policy::DEFAULT_STARTING_ALLOTMENT,
    profiles::{
        PgProfilesService, ProfilesService,
        data::NewProfile,
        records::{ProfileRole, ProfileUuid},
    },
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// Identity provider user id; generated when omitted
    #[arg(long)]
    uuid: Option<Uuid>,

    /// Display name
    #[arg(long)]
    full_name: String,

    #[arg(long)]
    email: Option<String>,

    /// One of agent, team_admin, system_admin
    #[arg(long, default_value = "agent")]
    role: ProfileRole,

    /// Starting invitation allotment
    #[arg(long, default_value_t = DEFAULT_STARTING_ALLOTMENT)]
    invitations: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    if args.full_name.trim().is_empty() {
        return Err("full_name cannot be empty".to_string());
    }

    let email = normalize_email(args.email.as_deref()).map_err(|error| error.to_string())?;

    let service = PgProfilesService::new(args.database.connect().await?);

    let profile = service
        .create_profile(NewProfile {
            uuid: args
                .uuid
                .map_or_else(ProfileUuid::new, ProfileUuid::from_uuid),
            full_name: args.full_name.trim().to_string(),
            email,
            role: args.role,
            invitations_left: args.invitations,
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("full_name: {}", profile.full_name);
    println!("role: {}", profile.role);
    println!("invitations_left: {}", profile.invitations_left);

    Ok(())
}
