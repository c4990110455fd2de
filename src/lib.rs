// ============================================================================
// portal_sim - Integration training portal simulator
// ============================================================================
//
// - domain: order lifecycle and learning-module catalog
// - event_sourcing: aggregate trait, envelopes, in-memory journal
// - presenter: scenario → panels, tables and buttons
// - simulation: bulk upload and API test outcomes
// - portal: one session wiring it all together
//
// ============================================================================

pub mod activity;
pub mod auth;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;
pub mod notifications;
pub mod portal;
pub mod presenter;
pub mod simulation;

pub use portal::Portal;
