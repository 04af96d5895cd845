#![no_main]

use direction_trends::models::{DirectionSeriesResponse, Series, YearRange, parse_year_counts};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Accepted counts must densify without panicking
    if let Ok(counts) = parse_year_counts(&json) {
        let _ = Series::dense(&counts, YearRange::new(2010, 2025));
    }
    if let Ok(response) = serde_json::from_value::<DirectionSeriesResponse>(json) {
        let _ = response.into_year_counts();
    }
});
