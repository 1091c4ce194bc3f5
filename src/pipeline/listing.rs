use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::debug;

use crate::config::ListingConfig;
use crate::constants::{
    IMAGE_PLACEHOLDER, PRODUCT_ID_PREFIX, REQUIRED_SENTINEL, SKU_ID_PREFIX, STYLE_ID_PREFIX,
};
use crate::pipeline::extractor::{ExtractedFields, FieldKey};
use crate::platforms::{PlatformId, PlatformRegistry};

/// One marketplace-ready listing block: prefixed field key -> value
pub type ListingRecord = BTreeMap<String, String>;

// Tiebreaker so identifiers generated within the same millisecond still
// differ. Not collision-proof across processes; wall-clock derivation is an
// accepted limitation of the missing-SKU fallback.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a time-derived identifier for a product missing a SKU
fn generate_identifier(prefix: &str) -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1000;
    format!("{}{}{:03}", prefix, Utc::now().timestamp_millis(), seq)
}

/// Build the listing record key for one marketplace field label,
/// e.g. (`amazon`, `Product Name`) -> `AMAZON_Product_Name`
pub fn listing_key(platform: PlatformId, label: &str) -> String {
    format!("{}_{}", platform.key_prefix(), label.replace(' ', "_"))
}

/// Maps extracted product fields onto marketplace listing records.
///
/// Required labels are always emitted, sentineled when no value could be
/// derived; optional labels are emitted only when a value is available.
pub struct ListingGenerator {
    registry: PlatformRegistry,
    config: ListingConfig,
}

impl ListingGenerator {
    /// Create a generator with default tunables
    pub fn new() -> Self {
        Self::with_config(ListingConfig::default())
    }

    /// Create a generator with custom tunables
    pub fn with_config(config: ListingConfig) -> Self {
        Self {
            registry: PlatformRegistry::new(),
            config,
        }
    }

    /// Produce the listing record for one marketplace
    pub fn generate(&self, fields: &ExtractedFields, platform: PlatformId) -> ListingRecord {
        let spec = self.registry.spec(platform);
        let mut record = ListingRecord::new();

        for label in &spec.required {
            let value = self.resolve_label(label, fields);
            let value = if value.is_empty() {
                REQUIRED_SENTINEL.to_string()
            } else {
                value
            };
            record.insert(listing_key(platform, label), value);
        }

        for label in &spec.optional {
            let value = self.resolve_label(label, fields);
            if !value.is_empty() {
                record.insert(listing_key(platform, label), value);
            }
        }

        debug!(
            "ListingGenerator: platform={} keys={}",
            platform,
            record.len()
        );
        record
    }

    /// Resolve one marketplace field label against the extracted fields,
    /// applying the designed derivations. Empty string means "no value".
    fn resolve_label(&self, label: &str, fields: &ExtractedFields) -> String {
        match label {
            "MRP" => self.derive_mrp(fields),
            "SKU" => self.sku_or_generated(fields, SKU_ID_PREFIX),
            "Product ID" => self.sku_or_generated(fields, PRODUCT_ID_PREFIX),
            "Style ID" => self.sku_or_generated(fields, STYLE_ID_PREFIX),
            "Key Features" => self.derive_key_features(fields),
            "Images" | "Product Image" | "Product Images" => IMAGE_PLACEHOLDER.to_string(),
            "Product Name" | "Title" => direct(fields, FieldKey::Name),
            "Brand" => direct(fields, FieldKey::Brand),
            "Price" | "Selling Price" => direct(fields, FieldKey::Price),
            "Category" => direct(fields, FieldKey::Category),
            "Description" | "Details" => direct(fields, FieldKey::Description),
            "Size" => direct(fields, FieldKey::Size),
            "Color" | "Colour" => direct(fields, FieldKey::Color),
            "Material" | "Fabric" => direct(fields, FieldKey::Material),
            "Weight" => direct(fields, FieldKey::Weight),
            _ => String::new(),
        }
    }

    /// MRP = extracted price times the markup factor, two decimal places
    fn derive_mrp(&self, fields: &ExtractedFields) -> String {
        match fields.get(FieldKey::Price).and_then(|p| p.parse::<f64>().ok()) {
            Some(price) => format!("{:.2}", price * self.config.mrp_markup),
            None => String::new(),
        }
    }

    fn sku_or_generated(&self, fields: &ExtractedFields, prefix: &str) -> String {
        match fields.get(FieldKey::Sku) {
            Some(sku) => sku.to_string(),
            None => generate_identifier(prefix),
        }
    }

    /// First few sentence fragments of the description, rejoined
    fn derive_key_features(&self, fields: &ExtractedFields) -> String {
        let description = match fields.get(FieldKey::Description) {
            Some(d) => d,
            None => return String::new(),
        };
        description
            .split('.')
            .map(|fragment| fragment.trim())
            .filter(|fragment| !fragment.is_empty())
            .take(self.config.key_feature_limit)
            .collect::<Vec<_>>()
            .join(". ")
    }
}

impl Default for ListingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn direct(fields: &ExtractedFields, key: FieldKey) -> String {
    fields.get(key).unwrap_or_default().to_string()
}
