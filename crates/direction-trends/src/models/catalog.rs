//! Built-in catalog of tracked AI research directions.

use super::Direction;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionInfo {
    /// Display name.
    pub name: &'static str,
    /// OpenAlex concept id, when the direction maps onto one.
    pub concept_id: Option<&'static str>,
    /// Keywords used upstream to match publications.
    pub keywords: &'static [&'static str],
}

impl DirectionInfo {
    /// Slug identifier for this entry.
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::from_name(self.name)
    }
}

const fn entry(
    name: &'static str,
    concept_id: Option<&'static str>,
    keywords: &'static [&'static str],
) -> DirectionInfo {
    DirectionInfo { name, concept_id, keywords }
}

/// Every tracked direction, in heatmap column order.
pub const CATALOG: &[DirectionInfo] = &[
    entry(
        "Natural Language Processing",
        Some("https://openalex.org/C154945302"),
        &["natural language processing", "nlp"],
    ),
    entry("Large Language Models (LLM)", None, &["large language model", "LLM"]),
    entry(
        "Vision-Language Models (VLM)",
        None,
        &["vision-language", "VLM", "vision language model"],
    ),
    entry("Video LLM", None, &["video LLM", "video-language model", "video language model"]),
    entry(
        "Retrieval-Augmented Generation (RAG)",
        None,
        &["retrieval augmented generation", "RAG"],
    ),
    entry("Graph Neural Networks (GNN)", None, &["graph neural network", "GNN"]),
    entry("Graph Representation Learning", None, &["graph representation learning"]),
    entry("Causal Machine Learning", None, &["causal machine learning", "causal ML"]),
    entry("Causal Inference", None, &["causal inference"]),
    entry(
        "Reinforcement Learning",
        Some("https://openalex.org/C127413603"),
        &["reinforcement learning"],
    ),
    entry("Deep Reinforcement Learning", None, &["deep reinforcement learning"]),
    entry("Prompt Engineering", None, &["prompt engineering"]),
    entry("Instruction Tuning", None, &["instruction tuning", "instruction fine-tuning"]),
    entry("AI Alignment", None, &["AI alignment"]),
    entry("RLHF", None, &["RLHF", "reinforcement learning from human feedback"]),
    entry("Multimodal Learning", None, &["multimodal learning", "multi-modal"]),
    entry("Few-shot Learning", None, &["few-shot learning", "few shot"]),
    entry("Self-supervised Learning", None, &["self-supervised learning", "self supervised"]),
    entry("Contrastive Learning", None, &["contrastive learning"]),
    entry("Federated Learning", None, &["federated learning"]),
    entry(
        "Differential Privacy in ML",
        None,
        &["differential privacy machine learning", "dp ml"],
    ),
    entry("Knowledge Graphs", None, &["knowledge graph", "knowledge graphs"]),
    entry("Graph Machine Learning", None, &["graph machine learning"]),
    entry("Automatic Speech Recognition", None, &["automatic speech recognition", "ASR"]),
    entry(
        "Machine Translation",
        None,
        &["machine translation", "neural machine translation", "NMT"],
    ),
    entry("Question Answering", None, &["question answering", "QA"]),
    entry("Information Retrieval", None, &["information retrieval", "IR"]),
    entry("Named Entity Recognition", None, &["named entity recognition", "NER"]),
    entry("Summarization", None, &["text summarization", "summarization"]),
    entry("Data Augmentation", None, &["data augmentation"]),
    entry("Domain Adaptation", None, &["domain adaptation"]),
    entry(
        "Computer Vision",
        Some("https://openalex.org/C41008148"),
        &["computer vision", "object detection", "image classification"],
    ),
    entry(
        "Multimodal (General)",
        None,
        &["multimodal learning", "multimodal AI", "vision language", "audio-text", "cross-modal"],
    ),
];

/// Slugs of every catalog direction, in catalog order.
#[must_use]
pub fn default_directions() -> Vec<Direction> {
    CATALOG.iter().map(DirectionInfo::direction).collect()
}

/// Look up a catalog entry by slug or display name (case-insensitive).
#[must_use]
pub fn lookup(query: &str) -> Option<&'static DirectionInfo> {
    let slug = Direction::from_name(query);
    CATALOG.iter().find(|info| info.direction() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_uniqueness() {
        let dirs = default_directions();
        assert_eq!(dirs.len(), 33);
        assert_eq!(super::super::dedup_directions(&dirs).len(), dirs.len());
    }

    #[test]
    fn test_catalog_slugs_match_hosted_files() {
        let dirs = default_directions();
        assert_eq!(dirs[0].as_str(), "natural_language_processing");
        assert_eq!(dirs[4].as_str(), "retrieval-augmented_generation_(rag)");
        assert_eq!(dirs[32].as_str(), "multimodal_(general)");
    }

    #[test]
    fn test_lookup_by_name_or_slug() {
        assert_eq!(lookup("RLHF").map(|i| i.name), Some("RLHF"));
        assert_eq!(lookup("computer_vision").map(|i| i.name), Some("Computer Vision"));
        assert!(lookup("astrology").is_none());
    }
}
