/// Daily forcing: rainfall, evaporation, catchment inflow, managed outflow.
///
/// The tabular form has one row per day and columns in fixed order
/// `[rainfall_depth, evaporation_depth, inflow_volume, outflow_volume]`.
/// Extra trailing columns are ignored.
use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// Number of columns a forcing row must carry.
pub const N_FORCING_COLUMNS: usize = 4;

/// Column names in row order.
pub const FORCING_COLUMNS: [&str; N_FORCING_COLUMNS] = [
    "rainfall_depth",
    "evaporation_depth",
    "inflow_volume",
    "outflow_volume",
];

/// One day of meteorological and management forcing.
///
/// - `rainfall_depth`: rain falling on the water surface [length/day]
/// - `evaporation_depth`: open-water evaporation [length/day]
/// - `inflow_volume`: runoff from the catchment [volume/day]
/// - `outflow_volume`: managed draw-off [volume/day]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForcing {
    pub rainfall_depth: f64,
    pub evaporation_depth: f64,
    pub inflow_volume: f64,
    pub outflow_volume: f64,
}

impl DailyForcing {
    pub fn new(
        rainfall_depth: f64,
        evaporation_depth: f64,
        inflow_volume: f64,
        outflow_volume: f64,
    ) -> Self {
        Self {
            rainfall_depth,
            evaporation_depth,
            inflow_volume,
            outflow_volume,
        }
    }

    /// Parse one table row; `row` is the day index used in error messages.
    pub fn from_row(values: &[f64], row: usize) -> Result<Self> {
        if values.len() < N_FORCING_COLUMNS {
            return Err(BalanceError::MalformedForcing {
                row,
                reason: format!(
                    "expected at least {} columns, got {}",
                    N_FORCING_COLUMNS,
                    values.len()
                ),
            });
        }
        let forcing = Self::new(values[0], values[1], values[2], values[3]);
        forcing.check_finite(row)?;
        Ok(forcing)
    }

    pub fn to_row(&self) -> [f64; N_FORCING_COLUMNS] {
        [
            self.rainfall_depth,
            self.evaporation_depth,
            self.inflow_volume,
            self.outflow_volume,
        ]
    }

    fn check_finite(&self, row: usize) -> Result<()> {
        for (name, value) in FORCING_COLUMNS.iter().zip(self.to_row()) {
            if !value.is_finite() {
                return Err(BalanceError::MalformedForcing {
                    row,
                    reason: format!("{name} is not finite ({value})"),
                });
            }
        }
        Ok(())
    }
}

/// Validated, chronologically ordered forcing series.
///
/// Every value is finite. An empty series is valid and simulates zero days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForcingSeries {
    days: Vec<DailyForcing>,
}

impl ForcingSeries {
    /// Wrap already-built records, rejecting non-finite values.
    pub fn new(days: Vec<DailyForcing>) -> Result<Self> {
        for (row, day) in days.iter().enumerate() {
            day.check_finite(row)?;
        }
        Ok(Self { days })
    }

    /// Build from a table of rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let days = rows
            .iter()
            .enumerate()
            .map(|(row, values)| DailyForcing::from_row(values.as_ref(), row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { days })
    }

    /// Build from a row-major buffer with `n_cols` columns per row.
    pub fn from_row_major(data: &[f64], n_cols: usize) -> Result<Self> {
        if n_cols < N_FORCING_COLUMNS {
            return Err(BalanceError::MalformedForcing {
                row: 0,
                reason: format!(
                    "expected at least {} columns, got {}",
                    N_FORCING_COLUMNS, n_cols
                ),
            });
        }
        if data.len() % n_cols != 0 {
            return Err(BalanceError::MalformedForcing {
                row: data.len() / n_cols,
                reason: format!(
                    "buffer of {} values is not a whole number of {}-column rows",
                    data.len(),
                    n_cols
                ),
            });
        }
        let rows: Vec<&[f64]> = data.chunks_exact(n_cols).collect();
        Self::from_rows(&rows)
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[DailyForcing] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyForcing> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a ForcingSeries {
    type Item = &'a DailyForcing;
    type IntoIter = std::slice::Iter<'a, DailyForcing>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
