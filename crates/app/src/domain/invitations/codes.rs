//! Invitation code generation and normalisation.
//!
//! Codes are three dash-separated groups of three characters drawn from
//! `A-Z0-9`, e.g. `ABC-123-XYZ`. When repeated collisions exhaust the retry
//! budget, a code derived from a random UUID is used instead.

use std::fmt::Debug;

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

/// Characters a generated code group may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of dash-separated groups in a generated code.
pub const CODE_GROUPS: usize = 3;

/// Characters per group.
pub const CODE_GROUP_LEN: usize = 3;

/// Insert attempts with random codes before falling back to a UUID code.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Longest code accepted from clients.
pub const MAX_CODE_LEN: usize = 64;

const FALLBACK_PREFIX: &str = "INV";

/// Source of candidate invitation codes.
pub trait CodeGenerator: Debug + Send + Sync {
    /// Produce the next candidate code.
    fn generate(&self) -> String;
}

/// Random `XXX-XXX-XXX` codes from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(&mut rand::thread_rng())
    }
}

/// Generate a random `XXX-XXX-XXX` code.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    let mut code = String::with_capacity(CODE_GROUPS * (CODE_GROUP_LEN + 1));

    for group in 0..CODE_GROUPS {
        if group > 0 {
            code.push('-');
        }

        for _ in 0..CODE_GROUP_LEN {
            let index = rng.gen_range(0..CODE_ALPHABET.len());

            if let Some(byte) = CODE_ALPHABET.get(index) {
                code.push(char::from(*byte));
            }
        }
    }

    code
}

/// Code used once random attempts are exhausted.
///
/// Carries the full 128 bits of a v4 UUID, so it cannot realistically collide.
#[must_use]
pub fn fallback_code() -> String {
    format!(
        "{FALLBACK_PREFIX}-{}",
        Uuid::new_v4().simple().to_string().to_ascii_uppercase()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCode {
    #[error("invitation code is required")]
    Missing,

    #[error("invitation code is too long")]
    TooLong,

    #[error("invitation code contains invalid characters")]
    InvalidCharacters,
}

/// Canonicalise a code submitted by a user.
///
/// Surrounding whitespace is dropped and letters are upper-cased, so
/// ` abc-123-xyz ` and `ABC-123-XYZ` refer to the same invitation.
pub fn normalize_code(raw: &str) -> Result<String, InvalidCode> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(InvalidCode::Missing);
    }

    if trimmed.len() > MAX_CODE_LEN {
        return Err(InvalidCode::TooLong);
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(InvalidCode::InvalidCharacters);
    }

    Ok(trimmed.to_ascii_uppercase())
}
