//! One execute function per verb family.
//!
//! Each command is a linear composition of the subsystems: resolve config
//! and identity, obtain the contract interface (compile or load), submit
//! one request, print the result. No state survives the invocation.

pub mod deploy;
pub mod invoke;
pub mod upload;
