//! Melody Memory (workspace facade crate).
//!
//! This package exposes `melody_memory::{types,core,ranking,console}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use melody_memory_console as console;
pub use melody_memory_core as core;
pub use melody_memory_ranking as ranking;
pub use melody_memory_types as types;
