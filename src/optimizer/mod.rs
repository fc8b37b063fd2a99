//! The scheduling optimization core.
//!
//! Data flows strictly forward: request validation, appliance demand
//! aggregation, MILP formulation, a single solver invocation, result
//! extraction. Infeasibility and solver failures surface as errors; a
//! partial schedule is never returned.

pub mod demand;
pub mod model;
pub mod request;
pub mod result;
pub mod types;

pub use demand::*;
pub use model::solve;
pub use request::*;
pub use result::*;
pub use types::*;
