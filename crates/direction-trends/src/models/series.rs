//! Yearly count series.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::Direction;

/// Sparse year → count mapping as delivered by a data source.
pub type YearCounts = BTreeMap<i32, u64>;

/// Publication count for one direction in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

impl YearCount {
    #[must_use]
    pub const fn new(year: i32, count: u64) -> Self {
        Self { year, count }
    }
}

/// Earliest year a caller may ask for.
pub const MIN_YEAR: i32 = 1900;

/// Latest year a caller may ask for.
pub const MAX_YEAR: i32 = 2100;

/// Inclusive range of years. Empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of years covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_empty() { 0 } else { (self.end as i64 - self.start as i64) as usize + 1 }
    }

    /// Both bounds lie within [`MIN_YEAR`]..=[`MAX_YEAR`].
    ///
    /// Dense series allocate one entry per year, so unbounded spans from
    /// callers must be rejected before loading.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        in_year_window(self.start) && in_year_window(self.end)
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Years in ascending order.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.iter().collect()
    }

    #[must_use]
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

const fn in_year_window(year: i32) -> bool {
    year >= MIN_YEAR && year <= MAX_YEAR
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Year-ordered counts for one direction. Never holds a year twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<YearCount>);

impl Series {
    /// Build from points in any order. A repeated year keeps its last count.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = YearCount>) -> Self {
        let map: YearCounts = points.into_iter().map(|p| (p.year, p.count)).collect();
        Self(map.into_iter().map(|(year, count)| YearCount { year, count }).collect())
    }

    /// Densify a sparse mapping over exactly `range`, filling gaps with 0.
    #[must_use]
    pub fn dense(raw: &YearCounts, range: YearRange) -> Self {
        Self(
            range
                .iter()
                .map(|year| YearCount { year, count: raw.get(&year).copied().unwrap_or(0) })
                .collect(),
        )
    }

    /// Count for `year`, 0 when absent.
    #[must_use]
    pub fn count_for(&self, year: i32) -> u64 {
        self.0
            .binary_search_by_key(&year, |p| p.year)
            .map(|i| self.0[i].count)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearCount> {
        self.0.iter()
    }

    #[must_use]
    pub fn points(&self) -> &[YearCount] {
        &self.0
    }

    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.0.iter().map(|p| p.year).collect()
    }

    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.0.iter().map(|p| p.count).collect()
    }

    /// Sum over all years.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|p| p.count).sum()
    }

    /// Year with the highest count; earliest year wins ties.
    #[must_use]
    pub fn peak(&self) -> Option<YearCount> {
        self.0.iter().copied().reduce(|best, p| if p.count > best.count { p } else { best })
    }

    /// Latest year with a non-zero count.
    #[must_use]
    pub fn last_active_year(&self) -> Option<i32> {
        self.0.iter().rev().find(|p| p.count > 0).map(|p| p.year)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a YearCount;
    type IntoIter = std::slice::Iter<'a, YearCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Loaded series keyed by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesMap(BTreeMap<Direction, Series>);

impl SeriesMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, direction: Direction, series: Series) -> Option<Series> {
        self.0.insert(direction, series)
    }

    #[must_use]
    pub fn get(&self, direction: &str) -> Option<&Series> {
        self.0.get(direction)
    }

    #[must_use]
    pub fn contains(&self, direction: &str) -> bool {
        self.0.contains_key(direction)
    }

    /// Count for `(direction, year)`, 0 if either is absent.
    #[must_use]
    pub fn count(&self, direction: &str, year: i32) -> u64 {
        self.get(direction).map_or(0, |s| s.count_for(year))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn directions(&self) -> impl Iterator<Item = &Direction> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Direction, &Series)> {
        self.0.iter()
    }

    /// Latest year in which any direction has a non-zero count.
    #[must_use]
    pub fn last_active_year(&self) -> Option<i32> {
        self.0.values().filter_map(Series::last_active_year).max()
    }
}

impl FromIterator<(Direction, Series)> for SeriesMap {
    fn from_iter<I: IntoIterator<Item = (Direction, Series)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(Direction, Series)> for SeriesMap {
    fn extend<I: IntoIterator<Item = (Direction, Series)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_bounded() {
        assert!(YearRange::new(2010, 2025).is_bounded());
        assert!(YearRange::new(2025, 2010).is_bounded());
        assert!(!YearRange::new(2010, 2101).is_bounded());
        assert!(!YearRange::new(i32::MIN, 2000).is_bounded());
    }

    #[test]
    fn test_year_range_len() {
        assert_eq!(YearRange::new(2010, 2025).len(), 16);
        assert_eq!(YearRange::new(2020, 2020).len(), 1);
        assert!(YearRange::new(2021, 2020).is_empty());
        assert_eq!(YearRange::new(2021, 2020).len(), 0);
        assert!(YearRange::new(2021, 2020).years().is_empty());
    }

    #[test]
    fn test_dense_fills_gaps_and_drops_outside() {
        let raw: YearCounts = [(2009, 7), (2010, 5), (2012, 2)].into_iter().collect();
        let s = Series::dense(&raw, YearRange::new(2010, 2013));
        assert_eq!(s.years(), vec![2010, 2011, 2012, 2013]);
        assert_eq!(s.counts(), vec![5, 0, 2, 0]);
    }

    #[test]
    fn test_from_points_sorts_and_dedups() {
        let s = Series::from_points([
            YearCount::new(2012, 1),
            YearCount::new(2010, 3),
            YearCount::new(2012, 9),
        ]);
        assert_eq!(s.years(), vec![2010, 2012]);
        assert_eq!(s.count_for(2012), 9);
        assert_eq!(s.count_for(2011), 0);
    }

    #[test]
    fn test_peak_and_last_active() {
        let s = Series::from_points([
            YearCount::new(2010, 4),
            YearCount::new(2011, 4),
            YearCount::new(2012, 0),
        ]);
        assert_eq!(s.peak(), Some(YearCount::new(2010, 4)));
        assert_eq!(s.last_active_year(), Some(2011));
        assert_eq!(s.total(), 8);
        assert_eq!(Series::default().peak(), None);
    }

    #[test]
    fn test_series_map_count_defaults_to_zero() {
        let mut map = SeriesMap::new();
        map.insert(Direction::new("rl"), Series::from_points([YearCount::new(2010, 5)]));
        assert_eq!(map.count("rl", 2010), 5);
        assert_eq!(map.count("rl", 1999), 0);
        assert_eq!(map.count("missing", 2010), 0);
    }
}
