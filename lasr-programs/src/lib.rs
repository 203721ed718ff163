pub mod base;
pub mod program;

// Re-export the main types for convenience
pub use program::{Program, ProgramError, ProgramMethod};
