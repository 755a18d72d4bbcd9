use clap::{Args, Parser, Subcommand};
use surecrm_app::database::{self, Db};

mod db;
mod invitation;
mod profile;

#[derive(Debug, Parser)]
#[command(name = "surecrm-app", about = "SureCRM invitations CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Profile(profile::ProfileCommand),
    Invitation(invitation::InvitationCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Profile(command) => profile::run(command).await,
            Commands::Invitation(command) => invitation::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(Db::new(pool))
    }
}
