// ============================================================================
// Catalog Domain - Learning modules, scenarios and progress
// ============================================================================

pub mod model;
pub mod fixtures;
pub mod summary;
pub mod timer;

pub use model::*;
pub use fixtures::Catalog;
pub use summary::{summarize, Badge, KeyMetric, ModuleSummary, ScenarioBadge};
pub use timer::ModuleTimer;
