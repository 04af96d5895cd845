//! Year-major matrix for heatmaps.

use serde::{Deserialize, Serialize};

use crate::models::{Direction, SeriesMap, Transform};

/// One heatmap cell. `raw` is always the literal count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub raw: u64,
    pub value: f64,
}

/// Dense `years × directions` grid.
///
/// `rows.len() == years.len()` and every row has `directions.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMatrix {
    pub years: Vec<i32>,
    pub directions: Vec<Direction>,
    pub rows: Vec<Vec<MatrixCell>>,
}

impl YearMatrix {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.directions.is_empty()
    }

    #[must_use]
    pub fn cell(&self, year_idx: usize, dir_idx: usize) -> Option<&MatrixCell> {
        self.rows.get(year_idx).and_then(|row| row.get(dir_idx))
    }

    /// Transformed values, year-major.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|row| row.iter().map(|c| c.value).collect()).collect()
    }

    /// Literal counts, year-major.
    #[must_use]
    pub fn raw_counts(&self) -> Vec<Vec<u64>> {
        self.rows.iter().map(|row| row.iter().map(|c| c.raw).collect()).collect()
    }

    /// Largest transformed value, 0.0 for an empty matrix.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.rows.iter().flatten().map(|c| c.value).fold(0.0, f64::max)
    }

    /// `(dir_idx, year_idx, value)` triples, the layout heatmap series expect.
    #[must_use]
    pub fn points(&self) -> Vec<(usize, usize, f64)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, c)| (j, i, c.value)))
            .collect()
    }
}

/// Build a matrix in exactly the given direction and year order.
///
/// Missing directions or years read as 0 before `transform` is applied.
#[must_use]
pub fn build_matrix(
    series: &SeriesMap,
    directions: &[Direction],
    years: &[i32],
    transform: Transform,
) -> YearMatrix {
    build_matrix_with(series, directions, years, |count| transform.apply(count))
}

/// [`build_matrix`] with an arbitrary count transform.
#[must_use]
pub fn build_matrix_with<F>(
    series: &SeriesMap,
    directions: &[Direction],
    years: &[i32],
    transform: F,
) -> YearMatrix
where
    F: Fn(u64) -> f64,
{
    let rows = years
        .iter()
        .map(|&year| {
            directions
                .iter()
                .map(|d| {
                    let raw = series.count(d.as_str(), year);
                    MatrixCell { raw, value: transform(raw) }
                })
                .collect()
        })
        .collect();

    YearMatrix { years: years.to_vec(), directions: directions.to_vec(), rows }
}
