//! Research direction identifier.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a tracked research direction.
///
/// Usually a slug such as `reinforcement_learning`, stable across years.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(String);

impl Direction {
    /// Wrap an identifier as-is.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the slug for a display name.
    ///
    /// `"Large Language Models (LLM)"` becomes `large_language_models_(llm)`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let slug = name.trim().to_lowercase().replace([' ', '/'], "_");
        Self(slug)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label (underscores become spaces).
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Filesystem-safe cache file name for this direction and period.
    ///
    /// The hash suffix keeps names unique even when two slugs collide after
    /// sanitising.
    #[must_use]
    pub fn cache_file_name(&self, start_year: i32, end_year: i32) -> String {
        use md5::{Digest, Md5};

        let key = format!("{}_{}_{}", self.0, start_year, end_year);
        let mut hasher = Md5::new();
        hasher.update(key.as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        let slug = key.to_lowercase().replace([' ', '/'], "_");
        format!("{slug}_{}.json", &digest[..8])
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Direction {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Direction {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Drop repeated directions, keeping the first occurrence in order.
#[must_use]
pub fn dedup_directions(directions: &[Direction]) -> Vec<Direction> {
    let mut seen = std::collections::HashSet::with_capacity(directions.len());
    directions.iter().filter(|d| seen.insert(d.as_str())).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_slug() {
        assert_eq!(
            Direction::from_name("Large Language Models (LLM)").as_str(),
            "large_language_models_(llm)"
        );
        assert_eq!(
            Direction::from_name("Vision-Language Models (VLM)").as_str(),
            "vision-language_models_(vlm)"
        );
        assert_eq!(Direction::from_name("AI/ML Ops").as_str(), "ai_ml_ops");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Direction::new("causal_inference").display_name(), "causal inference");
    }

    #[test]
    fn test_cache_file_name_is_stable_and_bounded() {
        let d = Direction::new("rlhf");
        let a = d.cache_file_name(2010, 2025);
        let b = d.cache_file_name(2010, 2025);
        assert_eq!(a, b);
        assert!(a.starts_with("rlhf_2010_2025_"));
        assert!(a.ends_with(".json"));
        assert_ne!(a, d.cache_file_name(2011, 2025));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let dirs: Vec<Direction> = ["b", "a", "b", "c", "a"].into_iter().map(Direction::from).collect();
        let deduped = dedup_directions(&dirs);
        let ids: Vec<&str> = deduped.iter().map(Direction::as_str).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }
}
