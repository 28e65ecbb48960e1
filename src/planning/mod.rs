pub mod collision;
pub mod engine;

pub use collision::{Occupancy, StepPurpose};
pub use engine::{MovePlanner, PlannedMove, TurnPlan, DEFAULT_PERSISTENCE};
