use dambalance_macros::Columns;

#[derive(Debug, Clone, Copy, Columns)]
pub struct DayRow {
    pub day: usize,
    pub volume: f64,
}

fn main() {
    let r = DayRow { day: 3, volume: 12.5 };
    let mut ts = DayRowTimeseries::with_capacity(1);
    ts.push(&r);
    assert_eq!(ts.day, vec![3usize]);
    assert_eq!(r.to_row(), [3.0, 12.5]);
    assert_eq!(DayRow::N_COLUMNS, 2);
}
