//! Shared fixtures for service integration tests.

mod helpers;

pub(crate) use context::TestContext;
