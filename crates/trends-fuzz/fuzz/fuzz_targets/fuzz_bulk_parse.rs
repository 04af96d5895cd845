#![no_main]

use direction_trends::models::{BulkSeries, LatestRankings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(bulk) = serde_json::from_slice::<BulkSeries>(data) {
        for direction in bulk.listed_directions() {
            let _ = bulk.year_counts(direction.as_str());
        }
    }
    let _ = serde_json::from_slice::<LatestRankings>(data);
});
