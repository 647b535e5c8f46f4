/// Output of a full simulation run.
///
/// `records` is the reported daily trace; `terms` keeps the unclamped
/// balance breakdown of every day in columnar form.
use super::constants::RECORD_SIZE;
use super::terms::{BalanceTerms, DayRecord, RecordTimeseries, TermsTimeseries};

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub records: Vec<DayRecord>,
    pub terms: TermsTimeseries,
    /// Volume the run started from, after clamping to capacity.
    pub initial_volume: f64,
    pub capacity_volume: f64,
}

impl RunOutput {
    /// Pre-allocate for `n` days.
    pub fn with_capacity(n: usize, initial_volume: f64, capacity_volume: f64) -> Self {
        Self {
            records: Vec::with_capacity(n),
            terms: TermsTimeseries::with_capacity(n),
            initial_volume,
            capacity_volume,
        }
    }

    pub fn push(&mut self, record: DayRecord, terms: &BalanceTerms) {
        self.records.push(record);
        self.terms.push(terms);
    }

    /// Number of simulated days.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no days were simulated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// End-of-run volume; the initial volume when no day was simulated.
    pub fn final_volume(&self) -> f64 {
        self.records
            .last()
            .map_or(self.initial_volume, |r| r.end_volume)
    }

    /// Records as nested number arrays, one `[day, start_volume, end_volume,
    /// depth, surface_area, inflow, evaporation, outflow]` row per day.
    pub fn to_rows(&self) -> Vec<[f64; RECORD_SIZE]> {
        self.records.iter().map(DayRecord::to_row).collect()
    }

    /// Records in columnar form.
    pub fn to_columns(&self) -> RecordTimeseries {
        let mut columns = RecordTimeseries::with_capacity(self.len());
        for record in &self.records {
            columns.push(record);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: usize, start: f64, end: f64) -> DayRecord {
        DayRecord {
            day,
            start_volume: start,
            end_volume: end,
            depth: 1.0,
            surface_area: 4.0,
            inflow: 0.0,
            evaporation: 0.0,
            outflow: 0.0,
        }
    }

    fn terms(next_volume: f64) -> BalanceTerms {
        BalanceTerms {
            depth: 1.0,
            surface_area: 4.0,
            evaporation: 0.0,
            inflow: 0.0,
            outflow: 0.0,
            direct_rain: 0.0,
            seepage: 0.0,
            next_volume,
        }
    }

    #[test]
    fn empty_output_reports_initial_volume() {
        let out = RunOutput::with_capacity(0, 7.0, 10.0);
        assert!(out.is_empty());
        assert_eq!(out.final_volume(), 7.0);
        assert!(out.to_rows().is_empty());
    }

    #[test]
    fn rows_and_columns_follow_records() {
        let mut out = RunOutput::with_capacity(2, 5.0, 10.0);
        out.push(record(0, 5.0, 6.0), &terms(6.0));
        out.push(record(1, 6.0, 8.0), &terms(8.0));

        assert_eq!(out.len(), 2);
        assert_eq!(out.final_volume(), 8.0);
        assert_eq!(out.to_rows()[1], [1.0, 6.0, 8.0, 1.0, 4.0, 0.0, 0.0, 0.0]);

        let cols = out.to_columns();
        assert_eq!(cols.day, vec![0, 1]);
        assert_eq!(cols.end_volume, vec![6.0, 8.0]);
        assert_eq!(out.terms.next_volume, vec![6.0, 8.0]);
    }
}
