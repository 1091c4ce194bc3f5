use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::AssistantError;

/// Identifier for one of the supported target marketplaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Amazon,
    Flipkart,
    Meesho,
    Myntra,
}

impl PlatformId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Amazon => constants::AMAZON_PLATFORM,
            PlatformId::Flipkart => constants::FLIPKART_PLATFORM,
            PlatformId::Meesho => constants::MEESHO_PLATFORM,
            PlatformId::Myntra => constants::MYNTRA_PLATFORM,
        }
    }

    /// Uppercase prefix used for listing record keys, e.g. `AMAZON_Brand`
    pub fn key_prefix(&self) -> &'static str {
        match self {
            PlatformId::Amazon => "AMAZON",
            PlatformId::Flipkart => "FLIPKART",
            PlatformId::Meesho => "MEESHO",
            PlatformId::Myntra => "MYNTRA",
        }
    }

    /// All supported marketplaces in canonical order
    pub fn all() -> [PlatformId; 4] {
        [
            PlatformId::Amazon,
            PlatformId::Flipkart,
            PlatformId::Meesho,
            PlatformId::Myntra,
        ]
    }

    pub fn from_name(name: &str) -> Option<PlatformId> {
        match name.trim().to_lowercase().as_str() {
            constants::AMAZON_PLATFORM => Some(PlatformId::Amazon),
            constants::FLIPKART_PLATFORM => Some(PlatformId::Flipkart),
            constants::MEESHO_PLATFORM => Some(PlatformId::Meesho),
            constants::MYNTRA_PLATFORM => Some(PlatformId::Myntra),
            _ => None,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformId::from_name(s).ok_or_else(|| AssistantError::UnknownPlatform(s.to_string()))
    }
}

/// The fixed required/optional field label lists for one marketplace.
/// Immutable, defined at process start, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSpec {
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
}

/// Registry for the per-marketplace listing field tables.
///
/// These tables are the single source of truth for which labels each
/// marketplace listing carries. Labels are resolved against extracted
/// product fields by the listing generator.
pub struct PlatformRegistry {
    specs: HashMap<PlatformId, PlatformSpec>,
}

impl PlatformRegistry {
    /// Create a registry with the built-in marketplace field tables
    pub fn new() -> Self {
        let mut specs = HashMap::new();

        specs.insert(
            PlatformId::Amazon,
            PlatformSpec {
                required: vec![
                    "Product Name",
                    "Brand",
                    "Price",
                    "MRP",
                    "Category",
                    "Description",
                    "Images",
                    "SKU",
                ],
                optional: vec!["Size", "Color", "Material", "Weight", "Key Features"],
            },
        );

        specs.insert(
            PlatformId::Flipkart,
            PlatformSpec {
                required: vec![
                    "Product Name",
                    "Brand",
                    "Selling Price",
                    "MRP",
                    "Category",
                    "Product Images",
                    "Product ID",
                ],
                optional: vec!["Description", "Size", "Color", "Material", "Weight"],
            },
        );

        specs.insert(
            PlatformId::Meesho,
            PlatformSpec {
                required: vec!["Product Name", "Price", "Category", "Product Image"],
                optional: vec!["Description", "Size", "Color", "Material", "Weight"],
            },
        );

        specs.insert(
            PlatformId::Myntra,
            PlatformSpec {
                required: vec![
                    "Product Name",
                    "Brand",
                    "Price",
                    "MRP",
                    "Category",
                    "Product Images",
                    "Style ID",
                ],
                optional: vec!["Size", "Color", "Fabric", "Key Features"],
            },
        );

        Self { specs }
    }

    /// Get the field table for a marketplace
    pub fn spec(&self, platform: PlatformId) -> &PlatformSpec {
        // Every variant is inserted in `new`, so the lookup cannot miss.
        &self.specs[&platform]
    }

    /// List all registered marketplace identifiers
    pub fn list_platforms(&self) -> Vec<&'static str> {
        self.specs.keys().map(|p| p.as_str()).collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_marketplaces() {
        let registry = PlatformRegistry::new();

        let platforms = registry.list_platforms();
        assert!(platforms.contains(&"amazon"));
        assert!(platforms.contains(&"flipkart"));
        assert!(platforms.contains(&"meesho"));
        assert!(platforms.contains(&"myntra"));
    }

    #[test]
    fn test_every_spec_has_required_labels() {
        let registry = PlatformRegistry::new();
        for platform in PlatformId::all() {
            let spec = registry.spec(platform);
            assert!(
                !spec.required.is_empty(),
                "{} has no required labels",
                platform
            );
        }
    }

    #[test]
    fn test_amazon_requires_category() {
        let registry = PlatformRegistry::new();
        assert!(registry.spec(PlatformId::Amazon).required.contains(&"Category"));
    }

    #[test]
    fn test_platform_name_round_trip() {
        for platform in PlatformId::all() {
            assert_eq!(PlatformId::from_name(platform.as_str()), Some(platform));
        }
        assert_eq!(PlatformId::from_name("ebay"), None);
    }

    #[test]
    fn test_spec_serializes_to_json() {
        let registry = PlatformRegistry::new();
        let json = serde_json::to_value(registry.spec(PlatformId::Meesho)).unwrap();
        assert!(json["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|label| label == "Product Name"));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("snapdeal".parse::<PlatformId>().is_err());
        assert_eq!("  Amazon ".parse::<PlatformId>().unwrap(), PlatformId::Amazon);
    }
}
