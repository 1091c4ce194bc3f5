use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fixed set of semantic product fields the extractor can recognise
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Name,
    Brand,
    Price,
    Category,
    Description,
    Size,
    Color,
    Material,
    Weight,
    Sku,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Brand => "brand",
            FieldKey::Price => "price",
            FieldKey::Category => "category",
            FieldKey::Description => "description",
            FieldKey::Size => "size",
            FieldKey::Color => "color",
            FieldKey::Material => "material",
            FieldKey::Weight => "weight",
            FieldKey::Sku => "sku",
        }
    }

    pub fn all() -> [FieldKey; 10] {
        [
            FieldKey::Name,
            FieldKey::Brand,
            FieldKey::Price,
            FieldKey::Category,
            FieldKey::Description,
            FieldKey::Size,
            FieldKey::Color,
            FieldKey::Material,
            FieldKey::Weight,
            FieldKey::Sku,
        ]
    }
}

/// Product fields recovered from a block of free-form text.
/// A key is present only if its pattern matched somewhere in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    fields: BTreeMap<FieldKey, String>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, value: String) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(|v| v.as_str())
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

struct FieldPattern {
    key: FieldKey,
    regex: Regex,
}

// One case-insensitive pattern per semantic key. Each pattern scans the
// whole input independently; where labels overlap, the leftmost match wins
// (regex first-match semantics). Conflicts are not tie-broken.
static FIELD_PATTERNS: Lazy<Vec<FieldPattern>> = Lazy::new(|| {
    let table: [(FieldKey, &str); 10] = [
        (
            FieldKey::Name,
            r"(?i)(?:product\s+name|name|title)\s*[:\-][ \t]*(.+)",
        ),
        (
            FieldKey::Brand,
            r"(?i)(?:brand|manufacturer)\s*[:\-][ \t]*(.+)",
        ),
        (
            FieldKey::Price,
            r"(?i)(?:selling\s+price|price|mrp)\s*[:\-]?[ \t]*(?:rs\.?|inr|₹|\$)?[ \t]*(\d+(?:\.\d+)?)",
        ),
        (
            FieldKey::Category,
            r"(?i)(?:category|type)\s*[:\-][ \t]*(.+)",
        ),
        // Description runs until a blank line or the end of the input
        (
            FieldKey::Description,
            r"(?is)(?:description|details)\s*[:\-][ \t]*(.+?)(?:\n[ \t]*\n|\z)",
        ),
        (FieldKey::Size, r"(?i)size\s*[:\-][ \t]*(.+)"),
        (FieldKey::Color, r"(?i)colou?r\s*[:\-][ \t]*(.+)"),
        (
            FieldKey::Material,
            r"(?i)(?:material|fabric)\s*[:\-][ \t]*(.+)",
        ),
        (FieldKey::Weight, r"(?i)weight\s*[:\-][ \t]*(.+)"),
        (
            FieldKey::Sku,
            r"(?i)(?:sku|product\s+id|item\s+code)\s*[:\-][ \t]*(.+)",
        ),
    ];

    table
        .into_iter()
        .map(|(key, pattern)| FieldPattern {
            key,
            regex: Regex::new(pattern).expect("static field pattern"),
        })
        .collect()
});

/// Trait for recovering structured product fields from free-form text
pub trait FieldExtractor {
    fn extract(&self, text: &str) -> ExtractedFields;
}

/// Extractor applying the built-in label patterns over the whole input
pub struct RegexFieldExtractor;

impl RegexFieldExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegexFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for RegexFieldExtractor {
    fn extract(&self, text: &str) -> ExtractedFields {
        debug!("RegexFieldExtractor: start text_len={}", text.len());
        let mut fields = ExtractedFields::new();

        for pattern in FIELD_PATTERNS.iter() {
            if let Some(captures) = pattern.regex.captures(text) {
                if let Some(value) = captures.get(1) {
                    let value = value.as_str().trim();
                    if !value.is_empty() {
                        debug!(
                            "RegexFieldExtractor: matched key={} value_len={}",
                            pattern.key.as_str(),
                            value.len()
                        );
                        fields.insert(pattern.key, value.to_string());
                    }
                }
            }
        }

        debug!("RegexFieldExtractor: extracted fields count={}", fields.len());
        fields
    }
}
