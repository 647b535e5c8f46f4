use dambalance_macros::Columns;

#[derive(Debug, Clone, Copy, Columns)]
#[columns(timeseries_name = "VolumeTrace")]
pub struct VolumeRecord {
    pub start_volume: f64,
    pub end_volume: f64,
}

fn main() {
    let r = VolumeRecord { start_volume: 9.0, end_volume: 10.0 };
    let mut ts = VolumeTrace::with_capacity(5);
    ts.push(&r);
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.end_volume, vec![10.0]);
    assert_eq!(VolumeRecord::column_names(), &["start_volume", "end_volume"]);
}
