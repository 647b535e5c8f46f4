/// Per-day outputs.
///
/// `BalanceTerms` is the full flux breakdown returned by the balance step;
/// `DayRecord` is the clamped, reported row. Both derive `Columns`, which
/// generates the columnar `*Timeseries` companions and `to_row()`.
use dambalance_macros::Columns;

/// Single-day result of the balance step, before clamping.
///
/// `depth` and `surface_area` describe the start-of-day water level.
#[derive(Debug, Clone, Copy, PartialEq, Columns)]
#[columns(timeseries_name = "TermsTimeseries")]
pub struct BalanceTerms {
    pub depth: f64,        // water depth at start of day
    pub surface_area: f64, // top water surface area
    pub evaporation: f64,  // evaporated volume after reduction
    pub inflow: f64,       // catchment inflow volume
    pub outflow: f64,      // managed outflow volume
    pub direct_rain: f64,  // rain falling on the water surface
    pub seepage: f64,      // leak through sides and floor
    pub next_volume: f64,  // end-of-day volume before clamping
}

/// One reported day. Always satisfies `0 <= end_volume <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Columns)]
#[columns(timeseries_name = "RecordTimeseries")]
pub struct DayRecord {
    pub day: usize,
    pub start_volume: f64,
    pub end_volume: f64,
    pub depth: f64,
    pub surface_area: f64,
    pub inflow: f64,
    pub evaporation: f64,
    pub outflow: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::constants::{RECORD_COLUMNS, RECORD_SIZE};

    #[test]
    fn record_columns_match_layout() {
        assert_eq!(DayRecord::N_COLUMNS, RECORD_SIZE);
        assert_eq!(DayRecord::column_names(), &RECORD_COLUMNS);
    }

    #[test]
    fn record_row_is_in_fixed_order() {
        let r = DayRecord {
            day: 2,
            start_volume: 10.0,
            end_volume: 9.5,
            depth: 1.2,
            surface_area: 30.0,
            inflow: 1.0,
            evaporation: 0.5,
            outflow: 1.0,
        };
        assert_eq!(r.to_row(), [2.0, 10.0, 9.5, 1.2, 30.0, 1.0, 0.5, 1.0]);
    }

    #[test]
    fn terms_timeseries_collects_columns() {
        let t = BalanceTerms {
            depth: 1.0,
            surface_area: 4.0,
            evaporation: 0.1,
            inflow: 2.0,
            outflow: 0.0,
            direct_rain: 0.04,
            seepage: 0.0,
            next_volume: 3.27,
        };
        let mut ts = TermsTimeseries::with_capacity(2);
        ts.push(&t);
        ts.push(&t);
        assert_eq!(ts.len(), 2);
        assert_eq!(ts.direct_rain, vec![0.04, 0.04]);
    }
}
