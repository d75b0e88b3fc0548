//! Shared test harness modules for the Convoy CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod feature_flags;
mod helpers;
mod plan_unit;
