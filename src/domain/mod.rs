// ============================================================================
// Domain Layer
// ============================================================================
//
// - order: the order-lifecycle simulator
// - catalog: learning modules, scenarios and progress
//
// Separate from the event sourcing infrastructure in src/event_sourcing/
//
// ============================================================================

pub mod order;
pub mod catalog;
