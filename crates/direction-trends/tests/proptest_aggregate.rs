//! Property-based tests for the matrix builder and ranker.

use std::collections::HashSet;

use direction_trends::aggregate::{build_matrix, rank};
use direction_trends::models::{Direction, Series, SeriesMap, Transform, YearCount};
use proptest::prelude::*;

/// Series maps over a small pool of names so directions overlap with the map.
fn arb_series_map() -> impl Strategy<Value = SeriesMap> {
    proptest::collection::btree_map(
        "[a-e]",
        proptest::collection::vec((2000i32..2030, 0u64..10_000), 0..12),
        0..5,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|(name, points)| {
                let series =
                    Series::from_points(points.into_iter().map(|(y, c)| YearCount::new(y, c)));
                (Direction::new(name), series)
            })
            .collect()
    })
}

fn arb_directions() -> impl Strategy<Value = Vec<Direction>> {
    proptest::collection::vec("[a-g]", 0..10)
        .prop_map(|names| names.into_iter().map(Direction::new).collect())
}

fn arb_years() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(1995i32..2035, 0..15)
}

proptest! {
    /// Matrix shape follows the requested years and directions exactly.
    #[test]
    fn matrix_shape(s in arb_series_map(), d in arb_directions(), years in arb_years(), log in any::<bool>()) {
        let matrix = build_matrix(&s, &d, &years, Transform::from_use_log(log));

        prop_assert_eq!(matrix.rows.len(), years.len());
        for row in &matrix.rows {
            prop_assert_eq!(row.len(), d.len());
        }
    }

    /// Raw cells always equal the series count; values are never negative.
    #[test]
    fn matrix_raw_matches_series(s in arb_series_map(), d in arb_directions(), years in arb_years()) {
        let matrix = build_matrix(&s, &d, &years, Transform::Log1p);

        for (i, year) in years.iter().enumerate() {
            for (j, direction) in d.iter().enumerate() {
                let cell = matrix.cell(i, j).unwrap();
                prop_assert_eq!(cell.raw, s.count(direction.as_str(), *year));
                prop_assert!(cell.value >= 0.0);
            }
        }
    }

    /// Ranking length is min(n, distinct directions), sorted non-increasing.
    #[test]
    fn rank_length_and_order(s in arb_series_map(), d in arb_directions(), year in 2000i32..2030, n in 0usize..12) {
        let ranked = rank(&s, &d, year, n);
        let distinct = d.iter().collect::<HashSet<_>>().len();

        prop_assert_eq!(ranked.len(), n.min(distinct));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    /// Same arguments, same ranking.
    #[test]
    fn rank_idempotent(s in arb_series_map(), d in arb_directions(), year in 2000i32..2030, n in 0usize..12) {
        prop_assert_eq!(rank(&s, &d, year, n), rank(&s, &d, year, n));
    }

    /// Dense series cover the range exactly, one entry per year.
    #[test]
    fn dense_series_covers_range(
        points in proptest::collection::btree_map(1990i32..2040, 0u64..100, 0..20),
        start in 2000i32..2020,
        len in 0i32..15,
    ) {
        let range = direction_trends::models::YearRange::new(start, start + len - 1);
        let series = Series::dense(&points, range);

        prop_assert_eq!(series.len(), range.len());
        prop_assert_eq!(series.years(), range.years());
        for p in &series {
            prop_assert_eq!(p.count, points.get(&p.year).copied().unwrap_or(0));
        }
    }
}
