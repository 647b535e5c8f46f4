//! Daily balance constants and record layout.

/// Seepage lost by a leaky basin per unit wetted area per day: 5 mm.
pub const SEEPAGE_RATE: f64 = 5.0 * 0.001;

/// Upper bound of the evaporation reduction percentage.
pub const MAX_REDUCTION_PCT: f64 = 100.0;

/// Number of fields in a daily output record.
pub const RECORD_SIZE: usize = 8;

/// Output record column names, in row order.
pub const RECORD_COLUMNS: [&str; RECORD_SIZE] = [
    "day",
    "start_volume",
    "end_volume",
    "depth",
    "surface_area",
    "inflow",
    "evaporation",
    "outflow",
];
