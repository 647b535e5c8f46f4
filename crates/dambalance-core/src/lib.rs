//! Daily water balance of farm dams and lakes.
//!
//! The basin is modelled as an inverted square frustum with uniform side
//! slope. Each day the stored volume is converted to depth and surface area,
//! rain, evaporation, inflow, outflow and optional seepage are applied, and
//! the result is clamped into `[0, capacity]`.
pub mod balance;
pub mod config;
pub mod error;
pub mod forcing;
pub mod geometry;
pub mod summary;
pub mod traits;

pub use balance::output::RunOutput;
pub use balance::run::{run_dam, run_lake, FarmDam, Lake};
pub use balance::terms::{BalanceTerms, DayRecord};
pub use config::{BasinConfig, LakeConfig, LakeOptions};
pub use error::{BalanceError, Result};
pub use forcing::{DailyForcing, ForcingSeries};
pub use geometry::{BasinGeometry, FractionMode};
pub use summary::RunSummary;
pub use traits::ReservoirModel;
