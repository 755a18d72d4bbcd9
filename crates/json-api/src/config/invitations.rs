//! Invitations Config

use clap::Args;
use jiff::SignedDuration;
use surecrm_app::domain::invitations::policy::{
    DEFAULT_INVITER_BONUS, DEFAULT_STARTING_ALLOTMENT, InvitationPolicy, MAX_TTL_HOURS,
};

/// Invitation ledger settings.
#[derive(Debug, Args)]
pub struct InvitationsConfig {
    /// Invitations credited to an inviter per successful referral
    #[arg(long, env = "INVITER_BONUS", default_value_t = DEFAULT_INVITER_BONUS)]
    pub inviter_bonus: u32,

    /// Invitations granted to a newly registered profile
    #[arg(long, env = "STARTING_ALLOTMENT", default_value_t = DEFAULT_STARTING_ALLOTMENT)]
    pub starting_allotment: u32,

    /// Hours until an issued code expires; codes never expire when unset
    #[arg(
        long = "invitation-ttl-hours",
        env = "INVITATION_TTL_HOURS",
        value_parser = clap::value_parser!(i64).range(1..=MAX_TTL_HOURS)
    )]
    pub ttl_hours: Option<i64>,
}

impl InvitationsConfig {
    /// Ledger policy built from these settings.
    #[must_use]
    pub fn policy(&self) -> InvitationPolicy {
        InvitationPolicy {
            inviter_bonus: self.inviter_bonus,
            starting_allotment: self.starting_allotment,
            ttl: self.ttl_hours.map(SignedDuration::from_hours),
        }
    }
}
