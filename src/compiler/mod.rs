//! Contract compilation subsystem.
//!
//! # Data Flow
//! ```text
//! contracts/<name>.sol
//!     → imports.rs (transitive import collection from the dependency store)
//!     → solc.rs (standard-JSON input → `solc` process → parsed output)
//!     → ContractArtifact per requested name
//! ```
//!
//! # Design Decisions
//! - The compiler toolchain is opaque: source text in, interface description
//!   plus bytecode out; diagnostics are logged verbatim, never parsed
//! - An unresolved import is left in place for solc to diagnose, so the
//!   operator sees the compiler's own message for it

pub mod imports;
pub mod solc;

pub use solc::{compile, CompileError};
