//! Email address normalisation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid email address")]
pub struct InvalidEmail;

/// Trim and lower-case an optional email address.
///
/// Blank input is treated as absent. Only the basic `local@domain.tld` shape is
/// checked; deliverability is the mail provider's concern.
pub fn normalize_email(raw: Option<&str>) -> Result<Option<String>, InvalidEmail> {
    let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    let (local, domain) = trimmed.split_once('@').ok_or(InvalidEmail)?;

    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || trimmed.chars().any(char::is_whitespace)
    {
        return Err(InvalidEmail);
    }

    Ok(Some(trimmed.to_lowercase()))
}
