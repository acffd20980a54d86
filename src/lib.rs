//! Match-three (workspace facade crate).
//!
//! This package exposes `match_three::{core,session,types}` as one API while the
//! implementation lives in dedicated crates under `crates/`, plus the [`cli`]
//! module behind the `match-three` binary.

pub mod cli;

pub use match_three_core as core;
pub use match_three_session as session;
pub use match_three_types as types;
