//! Community EV charge/discharge scheduling.
//!
//! Computes optimal per-slot charging schedules for a community of
//! households sharing a constrained grid, with EV batteries acting as
//! flexible storage. The core is a mixed-integer linear program balancing
//! energy cost, battery wear and peak community load, subject to battery
//! physics, appliance demand (including outage behavior) and user
//! constraints.

pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod telemetry;

pub use error::ScheduleError;
