use dambalance_macros::Columns;

#[derive(Debug, Clone, Copy, Columns)]
pub struct TestTerms {
    pub depth: f64,
    pub surface_area: f64,
    pub evaporation: f64,
}

fn main() {
    let r = TestTerms { depth: 1.0, surface_area: 4.0, evaporation: 0.02 };
    let mut ts = TestTermsTimeseries::with_capacity(10);
    ts.push(&r);
    assert_eq!(ts.len(), 1);
    assert!(!ts.is_empty());
    assert_eq!(TestTerms::N_COLUMNS, 3);
    assert_eq!(TestTerms::column_names(), &["depth", "surface_area", "evaporation"]);
    assert_eq!(r.to_row(), [1.0, 4.0, 0.02]);
}
