//! Blockout pit (workspace facade crate).
//!
//! Re-exports the engine crates under `blockout_pit::{core, types}` and adds
//! the placement planner used by the `pit-sim` runner.

pub use blockout_pit_core as core;
pub use blockout_pit_types as types;

pub mod place;
