use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::platforms::PlatformId;

/// What the user is asking the assistant to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Catalog,
    Task,
    Help,
    Analyze,
    General,
}

/// Result of classifying one chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    pub platforms: Vec<PlatformId>,
}

// Keyword sets per intent. Branches are evaluated in fixed priority order:
// catalog, task, help, analyze, then general as the fallback.
const CATALOG_KEYWORDS: &[&str] = &[
    "create",
    "generate",
    "build catalog",
    "make listing",
    "upload",
    "add product",
];
const TASK_KEYWORDS: &[&str] = &["task", "todo", "to-do", "reminder"];
const HELP_KEYWORDS: &[&str] = &["help", "how do i", "what can you"];
const ANALYZE_KEYWORDS: &[&str] = &["analyze", "analyse", "check", "review", "missing"];

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

/// Classify a chat message into an intent plus the marketplaces it names.
///
/// A catalog request that names no marketplace targets all four, in
/// canonical order.
pub fn classify(message: &str) -> Classification {
    let lower = message.to_lowercase();

    let intent = if contains_any(&lower, CATALOG_KEYWORDS) {
        Intent::Catalog
    } else if contains_any(&lower, TASK_KEYWORDS) {
        Intent::Task
    } else if contains_any(&lower, HELP_KEYWORDS) {
        Intent::Help
    } else if contains_any(&lower, ANALYZE_KEYWORDS) {
        Intent::Analyze
    } else {
        Intent::General
    };

    let mut platforms: Vec<PlatformId> = PlatformId::all()
        .into_iter()
        .filter(|platform| lower.contains(platform.as_str()))
        .collect();

    if intent == Intent::Catalog && platforms.is_empty() {
        platforms = PlatformId::all().to_vec();
    }

    debug!(
        "classify: intent={:?} platforms={}",
        intent,
        platforms.len()
    );
    Classification { intent, platforms }
}
