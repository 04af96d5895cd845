//! Enumeration types for configuration and tool parameters.

use serde::{Deserialize, Serialize};

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Check if this is markdown format.
    #[must_use]
    pub const fn is_markdown(self) -> bool {
        matches!(self, Self::Markdown)
    }

    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Which backend serves the raw counts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// One hosted JSON file per direction in an object-storage bucket.
    #[default]
    ObjectStore,
    /// The dashboard backend API (`/api/...`).
    Api,
    /// A single hosted bulk index file.
    StaticIndex,
    /// A local bulk JSON file.
    File,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ObjectStore => "object-store",
            Self::Api => "api",
            Self::StaticIndex => "static-index",
            Self::File => "file",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "object-store" | "gcs" | "bucket" => Ok(Self::ObjectStore),
            "api" | "backend" => Ok(Self::Api),
            "static-index" | "index" => Ok(Self::StaticIndex),
            "file" | "local" => Ok(Self::File),
            other => Err(format!("unknown source kind '{other}'")),
        }
    }
}

/// Display scaling applied to heatmap cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Raw counts.
    Identity,
    /// `ln(1 + count)`, compresses heavily skewed distributions.
    #[default]
    Log1p,
}

impl Transform {
    #[must_use]
    pub const fn from_use_log(use_log: bool) -> Self {
        if use_log { Self::Log1p } else { Self::Identity }
    }

    #[must_use]
    pub fn apply(self, count: u64) -> f64 {
        match self {
            Self::Identity => count as f64,
            Self::Log1p => (count as f64).ln_1p(),
        }
    }

    /// Series label shown next to transformed values.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "count",
            Self::Log1p => "log1p(count)",
        }
    }
}
