//! Test support for synchronizer tests.

mod context;
mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::*;
