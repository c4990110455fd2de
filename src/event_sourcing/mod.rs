// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic, reusable pieces: the aggregate trait, event envelopes and the
// in-memory journal. Domain-specific code is in src/domain/
//
// ============================================================================

pub mod core;
pub mod store;

pub use self::core::*;
pub use self::store::*;
