/// Move the listed columns of a `*Timeseries` struct into a `PyDict` of numpy arrays.
macro_rules! timeseries_to_dict {
    ($py:expr, $ts:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(stringify!($field), numpy::PyArray1::from_vec($py, $ts.$field))?;
        )+
        dict
    }};
}

/// Convert a single-day `BalanceTerms` into a `PyDict` of floats.
macro_rules! terms_to_dict {
    ($py:expr, $t:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(stringify!($field), $t.$field)?;
        )+
        dict
    }};
}
