//! Shared primitives for the ksdssp workspace.
//!
//! `ksdssp-core` provides the foundation the other ksdssp crates build on:
//!
//! - **Error types** — [`KsdsspError`] and [`Result`] for structured error handling
//! - **Traits** — [`Annotated`] and [`Summarizable`] for display and reporting

pub mod error;
pub mod traits;

pub use error::{KsdsspError, Result};
pub use traits::*;
