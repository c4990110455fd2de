// ============================================================================
// Event Sourcing Store - Generic In-Memory Journal
// ============================================================================

pub mod journal;

pub use journal::{EventJournal, JournalError};
