//! IPv4 subnet calculator with VLSM advice, security scoring and cloud
//! networking cost estimates.
//!
//! The subnet engine ([`compute_subnet`]) is a pure function. Everything that
//! logs, reads files or records analytics sits around it: [`Calculator`],
//! [`config`] and the binary.

mod calculator;
pub mod config;
pub mod cost;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod telemetry;
pub mod validation;

pub use calculator::Calculator;
pub use error::{CostError, ErrorReport, SubnetError};
pub use processing::{calculate, compute_subnet, compute_subnet_from_text, SubnetQuery};
