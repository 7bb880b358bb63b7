//! Subnet calculation logic.
//!
//! - [`engine`] - validated subnet report, the pure core
//! - [`vlsm`] - optimal prefix and sub-block decomposition
//! - [`security`] - heuristic security score
//! - [`tiers`] - multi-tier VLSM allocation
//! - [`scenarios`] - built-in reference architectures

mod engine;
mod scenarios;
mod security;
mod tiers;
mod vlsm;

// Re-export public functions
pub use engine::{calculate, compute_subnet, compute_subnet_from_text, SubnetQuery};
pub use scenarios::{builtin_scenarios, find_scenario, plan_scenario, Scenario, ScenarioPlan, ScenarioTier};
pub use security::{security_score, MAX_SCORE};
pub use tiers::{allocate_tiers, TierAllocation, TierRequest};
pub use vlsm::{decompose_blocks, optimal_prefix, recommend, OffsetArithmetic, MAX_VLSM_BLOCKS};
