//! Invitation Handlers

pub(crate) mod allowance;
pub(crate) mod create;
pub(crate) mod expire;
pub(crate) mod index;
pub(crate) mod validate;
