use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogRow;
use crate::constants::REQUIRED_SENTINEL;
use crate::pipeline::listing::listing_key;
use crate::platforms::{PlatformId, PlatformRegistry};

/// A required listing field that a catalog row does not satisfy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingField {
    pub platform: PlatformId,
    pub label: String,
    /// The row key that is absent or still holds the sentinel
    pub key: String,
}

impl MissingField {
    pub fn describe(&self) -> String {
        format!("{}: {}", self.platform.key_prefix(), self.label)
    }
}

/// Checks catalog rows against the marketplace required-field tables.
///
/// A field counts as missing when its key is absent from the row or the
/// value is still the required-field sentinel.
pub struct RequiredFieldAudit {
    registry: PlatformRegistry,
}

impl RequiredFieldAudit {
    pub fn new() -> Self {
        Self {
            registry: PlatformRegistry::new(),
        }
    }

    /// Find every unsatisfied required field in one row, in platform order
    pub fn audit_row(&self, row: &CatalogRow, platforms: &[PlatformId]) -> Vec<MissingField> {
        let mut findings = Vec::new();

        for &platform in platforms {
            let spec = self.registry.spec(platform);
            for label in &spec.required {
                let key = listing_key(platform, label);
                let satisfied = row
                    .get(&key)
                    .map(|value| value != REQUIRED_SENTINEL)
                    .unwrap_or(false);
                if !satisfied {
                    findings.push(MissingField {
                        platform,
                        label: label.to_string(),
                        key,
                    });
                }
            }
        }

        debug!("RequiredFieldAudit: findings={}", findings.len());
        findings
    }
}

impl Default for RequiredFieldAudit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extractor::{FieldExtractor, RegexFieldExtractor};
    use crate::pipeline::listing::ListingGenerator;

    fn row_for(text: &str, platform: PlatformId) -> CatalogRow {
        let fields = RegexFieldExtractor::new().extract(text);
        let listing = ListingGenerator::new().generate(&fields, platform);
        crate::catalog::merge_row(&fields, &[listing])
    }

    #[test]
    fn test_sentinel_value_counts_as_missing() {
        // No category in the input, so AMAZON_Category holds the sentinel
        let row = row_for("Product Name: Blue Shirt\nBrand: Acme\nPrice: 500", PlatformId::Amazon);
        let findings = RequiredFieldAudit::new().audit_row(&row, &[PlatformId::Amazon]);

        assert!(findings.iter().any(|f| f.key == "AMAZON_Category"));
        assert!(!findings.iter().any(|f| f.key == "AMAZON_Brand"));
    }

    #[test]
    fn test_absent_key_counts_as_missing() {
        // Row generated for amazon only; every flipkart required key is absent
        let row = row_for("Product Name: Blue Shirt", PlatformId::Amazon);
        let findings = RequiredFieldAudit::new().audit_row(&row, &[PlatformId::Flipkart]);

        let spec_len = PlatformRegistry::new().spec(PlatformId::Flipkart).required.len();
        assert_eq!(findings.len(), spec_len);
    }

    #[test]
    fn test_complete_row_has_no_findings() {
        let text = "Product Name: Blue Shirt\nBrand: Acme\nPrice: 500\nCategory: Apparel\nDescription: Soft cotton shirt";
        let row = row_for(text, PlatformId::Amazon);
        let findings = RequiredFieldAudit::new().audit_row(&row, &[PlatformId::Amazon]);
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }
}
