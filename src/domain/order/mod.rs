// ============================================================================
// Order Domain - Mock order lifecycle
// ============================================================================
//
// Everything order-specific lives here:
// - Value objects (OrderId, OrderStatus, OrderTemplate)
// - Events and commands
// - Errors (OrderError enum)
// - OrderRecord with the transition rules
// - OrderStore, the single source of truth
// - Derived views over the store
// - Command handler tying store, sink and metrics together
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod store;
pub mod views;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use store::*;
pub use command_handler::*;
