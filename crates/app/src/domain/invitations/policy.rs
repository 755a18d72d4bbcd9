//! Invitation ledger policy.

use jiff::{SignedDuration, Timestamp};

/// Invitations credited to an inviter when their code is redeemed.
pub const DEFAULT_INVITER_BONUS: u32 = 1;

/// Invitations granted to a newly registered profile.
pub const DEFAULT_STARTING_ALLOTMENT: u32 = 2;

/// Longest accepted code lifetime, in hours (one year).
pub const MAX_TTL_HOURS: i64 = 24 * 366;

/// Tunable numbers of the invitation ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvitationPolicy {
    /// Added to the inviter's allotment on a successful referral.
    pub inviter_bonus: u32,

    /// Allotment a new profile starts with.
    pub starting_allotment: u32,

    /// Lifetime of an issued code; `None` means codes never expire.
    pub ttl: Option<SignedDuration>,
}

impl Default for InvitationPolicy {
    fn default() -> Self {
        Self {
            inviter_bonus: DEFAULT_INVITER_BONUS,
            starting_allotment: DEFAULT_STARTING_ALLOTMENT,
            ttl: None,
        }
    }
}

impl InvitationPolicy {
    /// Expiry for a code issued at `issued_at`, if codes expire at all.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry falls outside the representable
    /// timestamp range.
    pub fn expires_at(&self, issued_at: Timestamp) -> Result<Option<Timestamp>, jiff::Error> {
        self.ttl.map(|ttl| issued_at.checked_add(ttl)).transpose()
    }
}
