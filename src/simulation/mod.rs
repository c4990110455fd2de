// ============================================================================
// Simulated integrations
// ============================================================================
//
// Bulk uploads and API tests never leave the process. The outcome comes
// from an injected `OutcomeDecider`; the result lands in the activity log
// and as a toast.
//
// ============================================================================

pub mod api;
pub mod outcome;
pub mod upload;

pub use api::{sample_payload, ApiField, ApiTemplate};
pub use outcome::{FixedOutcome, Outcome, OutcomeDecider, RandomOutcome};
pub use upload::{SimulationError, UploadFile, UploadPolicy};
