//! Fuzz harness support for direction-trends.
//!
//! The targets under `fuzz/fuzz_targets` feed arbitrary bytes to the parsers
//! that see untrusted data: year-keyed count objects from the object store,
//! the bulk index, backend ranking answers, and tool arguments. A parser may
//! reject input but must never panic, and accepted counts must densify over a
//! year range.
//!
//! ```bash
//! cd crates/trends-fuzz
//! cargo +nightly fuzz run fuzz_bulk_parse -- -max_total_time=60
//! ```

pub use direction_trends::models;
