/*!
 * Core Module
 * Fundamental types, limits, error handling and sync primitives
 */

pub mod errors;
pub mod limits;
pub mod sync;

// Re-export for convenience
pub use errors::*;
