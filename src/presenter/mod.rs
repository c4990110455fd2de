// ============================================================================
// Scenario Presenter
// ============================================================================
//
// Maps a scenario to the panels it shows: which derived view feeds each
// table, the column layout, the empty-state text and the buttons. Holds no
// state; every call re-reads the order store.
//
// ============================================================================

pub mod model;
pub mod render;
pub mod scenarios;

pub use model::{Action, ActionKind, Panel, Presentation, Row};
pub use scenarios::{present, present_by_key};
