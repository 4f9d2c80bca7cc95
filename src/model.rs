//! Core data model for rota.
//!
//! These types describe one simulated roster: the daily statuses, the cadence
//! that drives every supervisor, the state of a filling agent, and the
//! schedule record handed to rendering, export, and analytics.

mod agent;
mod cadence;
mod schedule;
mod status;

pub use agent::{AgentState, Directive, Phase};
pub use cadence::{Cadence, CadenceError};
pub use schedule::{Schedule, Supervisor, Violation, ViolationKind};
pub use status::{Status, Timeline};
