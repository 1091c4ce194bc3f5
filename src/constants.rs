/// Marketplace name constants to ensure consistency across the codebase.
/// These are the identifiers accepted on the CLI and matched in chat messages.

// Marketplace identifiers (used in CLI and intent matching)
pub const AMAZON_PLATFORM: &str = "amazon";
pub const FLIPKART_PLATFORM: &str = "flipkart";
pub const MEESHO_PLATFORM: &str = "meesho";
pub const MYNTRA_PLATFORM: &str = "myntra";

/// Literal value emitted for a required listing field that could not be
/// derived from the extracted product text.
pub const REQUIRED_SENTINEL: &str = "[REQUIRED]";

/// Literal placeholder emitted for every image-related listing field.
/// Image handling lives outside this subsystem.
pub const IMAGE_PLACEHOLDER: &str = "[Image URLs]";

// Prefixes for identifiers generated when the product text carries no SKU
pub const SKU_ID_PREFIX: &str = "SKU";
pub const PRODUCT_ID_PREFIX: &str = "PID";
pub const STYLE_ID_PREFIX: &str = "STYLE";

/// Get all supported marketplace identifiers, in canonical order
pub fn supported_platforms() -> Vec<&'static str> {
    vec![
        AMAZON_PLATFORM,
        FLIPKART_PLATFORM,
        MEESHO_PLATFORM,
        MYNTRA_PLATFORM,
    ]
}
