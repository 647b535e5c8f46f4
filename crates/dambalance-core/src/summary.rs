//! Whole-run water budget.
//!
//! Totals every flux of a finished run, including the volume the clamps
//! removed (spill) or added back (shortfall), so the budget closes exactly.

use crate::balance::output::RunOutput;
use crate::balance::processes::{shortfall_volume, spill_volume};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub days: usize,
    pub initial_volume: f64,
    pub final_volume: f64,
    pub min_volume: f64,
    pub max_volume: f64,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub total_evaporation: f64,
    pub total_direct_rain: f64,
    pub total_seepage: f64,
    /// Volume lost over capacity.
    pub total_spill: f64,
    /// Demand unmet because the basin ran dry.
    pub total_shortfall: f64,
    /// Days ending with an empty basin.
    pub days_empty: usize,
    /// Days ending at capacity.
    pub days_full: usize,
}

impl RunSummary {
    pub fn from_output(output: &RunOutput) -> Self {
        let terms = &output.terms;
        let capacity = output.capacity_volume;

        let (min_volume, max_volume) = output.records.iter().fold(
            (output.initial_volume, output.initial_volume),
            |(lo, hi), r| (lo.min(r.end_volume), hi.max(r.end_volume)),
        );

        Self {
            days: output.len(),
            initial_volume: output.initial_volume,
            final_volume: output.final_volume(),
            min_volume,
            max_volume,
            total_inflow: total(&terms.inflow),
            total_outflow: total(&terms.outflow),
            total_evaporation: total(&terms.evaporation),
            total_direct_rain: total(&terms.direct_rain),
            total_seepage: total(&terms.seepage),
            total_spill: terms
                .next_volume
                .iter()
                .map(|&v| spill_volume(v, capacity))
                .sum(),
            total_shortfall: terms.next_volume.iter().map(|&v| shortfall_volume(v)).sum(),
            days_empty: output.records.iter().filter(|r| r.end_volume == 0.0).count(),
            days_full: output
                .records
                .iter()
                .filter(|r| r.end_volume == capacity)
                .count(),
        }
    }

    /// Net change in storage over the run.
    pub fn storage_change(&self) -> f64 {
        self.final_volume - self.initial_volume
    }

    /// What the budget fails to explain; zero up to rounding.
    pub fn balance_residual(&self) -> f64 {
        self.initial_volume + self.total_inflow + self.total_direct_rain
            - self.total_evaporation
            - self.total_outflow
            - self.total_seepage
            - self.total_spill
            + self.total_shortfall
            - self.final_volume
    }
}

fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}
