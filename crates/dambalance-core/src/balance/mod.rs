//! Daily mass balance of a frustum-shaped impoundment.
//!
//! One scalar state (stored volume) stepped forward day by day:
//! geometry from the start-of-day volume, fluxes over the resulting
//! surface, then clamping of the end-of-day volume into `[0, capacity]`.
pub mod constants;
pub mod output;
pub mod processes;
pub mod run;
pub mod state;
pub mod terms;
