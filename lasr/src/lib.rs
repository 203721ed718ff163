//! LASR program SDK
//!
//! This crate re-exports all the components of the SDK.

pub use lasr_core::*;
pub use lasr_instructions::*;
pub use lasr_programs::*;
