#![no_main]

use direction_trends::models::{
    DirectionTrendInput, HeatmapInput, TopDirectionsInput, YearRange, resolve_range,
};
use libfuzzer_sys::fuzz_target;

const DEFAULT_RANGE: YearRange = YearRange::new(2010, 2025);

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    if let Ok(input) = serde_json::from_value::<DirectionTrendInput>(json.clone()) {
        // Accepted ranges stay inside the year window
        if let Ok(range) = resolve_range(input.year_start, input.year_end, DEFAULT_RANGE) {
            assert!(range.is_bounded());
        }
    }
    if let Ok(input) = serde_json::from_value::<HeatmapInput>(json.clone()) {
        let _ = resolve_range(input.year_start, input.year_end, DEFAULT_RANGE);
    }
    let _ = serde_json::from_value::<TopDirectionsInput>(json);
});
