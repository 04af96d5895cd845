//! Per-year ranking of directions.

use serde::{Deserialize, Serialize};

use crate::models::{Direction, SeriesMap, dedup_directions};

/// One ranking row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub direction: Direction,
    pub count: u64,
}

/// Rank every direction for `year`, highest count first.
///
/// Equal counts keep the order of `directions`. Duplicates are dropped.
#[must_use]
pub fn rank_all(series: &SeriesMap, directions: &[Direction], year: i32) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = dedup_directions(directions)
        .into_iter()
        .map(|direction| {
            let count = series.count(direction.as_str(), year);
            RankedEntry { direction, count }
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Top `top_n` directions for `year`; `min(top_n, distinct directions)` long.
#[must_use]
pub fn rank(
    series: &SeriesMap,
    directions: &[Direction],
    year: i32,
    top_n: usize,
) -> Vec<RankedEntry> {
    if top_n == 0 {
        return Vec::new();
    }
    let mut entries = rank_all(series, directions, year);
    entries.truncate(top_n);
    entries
}

/// Clamp a signed request size; zero or negative means none.
#[must_use]
pub fn clamp_top_n(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Series, YearCount};

    fn series_of(points: &[(&str, i32, u64)]) -> SeriesMap {
        points
            .iter()
            .map(|&(d, y, c)| (Direction::new(d), Series::from_points([YearCount::new(y, c)])))
            .collect()
    }

    fn dirs(ids: &[&str]) -> Vec<Direction> {
        ids.iter().copied().map(Direction::from).collect()
    }

    #[test]
    fn test_tie_break_by_input_order() {
        let s = series_of(&[("a", 2020, 3), ("b", 2020, 3), ("c", 2020, 5)]);
        let ranked = rank(&s, &dirs(&["a", "b", "c"]), 2020, 2);
        assert_eq!(
            ranked,
            vec![
                RankedEntry { direction: Direction::new("c"), count: 5 },
                RankedEntry { direction: Direction::new("a"), count: 3 },
            ]
        );

        let reversed = rank(&s, &dirs(&["b", "a", "c"]), 2020, 3);
        assert_eq!(reversed[1].direction.as_str(), "b");
    }

    #[test]
    fn test_zero_top_n_is_empty() {
        let s = series_of(&[("a", 2020, 3)]);
        assert!(rank(&s, &dirs(&["a"]), 2020, 0).is_empty());
        assert_eq!(clamp_top_n(-4), 0);
        assert_eq!(clamp_top_n(7), 7);
    }

    #[test]
    fn test_out_of_range_year_is_all_zero() {
        let s = series_of(&[("a", 2020, 3), ("b", 2020, 1)]);
        let ranked = rank(&s, &dirs(&["a", "b"]), 1850, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|e| e.count == 0));
        assert_eq!(ranked[0].direction.as_str(), "a");
    }

    #[test]
    fn test_duplicates_counted_once() {
        let s = series_of(&[("a", 2020, 3)]);
        let ranked = rank(&s, &dirs(&["a", "a", "b"]), 2020, 10);
        assert_eq!(ranked.len(), 2);
    }
}
