use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::catalog::{self, CatalogRow};
use crate::config::Config;
use crate::intent::{self, Intent};
use crate::pipeline::audit::RequiredFieldAudit;
use crate::pipeline::extractor::{FieldExtractor, RegexFieldExtractor};
use crate::pipeline::listing::ListingGenerator;
use crate::platforms::PlatformId;

/// Fixed reply when handling a request fails internally
pub const APOLOGY_RESPONSE: &str =
    "Sorry, something went wrong while handling that request. Please try again.";

/// Exact reply for an analyze request when no catalog has been loaded
pub const NO_CATALOG_RESPONSE: &str =
    "No catalog is loaded. Upload a product sheet first, then ask me to analyze it.";

/// Guidance when a catalog request arrives without product text
pub const NO_RAW_DATA_RESPONSE: &str =
    "I need product text to build a catalog. Upload a spreadsheet or paste the product details first.";

/// Fixed template for task questions
pub const TASK_RESPONSE: &str = "You have no scheduled tasks. I can build marketplace catalogs, \
extract product fields, and check listings for missing required data.";

const HELP_RESPONSE: &str = "Here is what I can do:\n\
• Create catalog listings for amazon, flipkart, meesho and myntra from product text\n\
• Extract product fields (name, brand, price, category, ...) from free-form text\n\
• Analyze a loaded catalog for missing required listing fields\n\
Paste product details or upload a sheet to get started.";

const GENERAL_RESPONSE: &str = "I build marketplace catalog listings from product text. \
Ask me to create a catalog, or say 'help' to see everything I can do.";

/// How many audit findings the analyze reply reports at most
const MAX_REPORTED_FINDINGS: usize = 10;

/// Inbound boundary payload: a chat message plus whatever catalog and raw
/// product text the caller currently holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub catalog_data: Vec<CatalogRow>,
    #[serde(default)]
    pub raw_data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Outbound boundary payload. `updated_catalog` is present only when a row
/// was appended; the caller's list is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_catalog: Option<Vec<CatalogRow>>,
    pub status: ResponseStatus,
}

impl AssistantResponse {
    fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            updated_catalog: None,
            status: ResponseStatus::Ok,
        }
    }
}

/// Stateless request handler: one inbound call, one outbound result.
/// Each call is isolated; nothing is fatal to the process.
pub struct RequestHandler {
    extractor: RegexFieldExtractor,
    generator: ListingGenerator,
    audit: RequiredFieldAudit,
}

impl RequestHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: RegexFieldExtractor::new(),
            generator: ListingGenerator::with_config(config.listing.clone()),
            audit: RequiredFieldAudit::new(),
        }
    }

    /// Handle one request. Internal errors surface once as the fixed
    /// apology text with an error status; no retries.
    pub fn handle(&self, request: &AssistantRequest) -> AssistantResponse {
        let request_id = Uuid::new_v4();
        let span = info_span!("handle_request", request_id = %request_id);
        let _enter = span.enter();

        match self.try_handle(request) {
            Ok(response) => response,
            Err(e) => {
                error!("Request handling failed: {e:#}");
                AssistantResponse {
                    response: APOLOGY_RESPONSE.to_string(),
                    updated_catalog: None,
                    status: ResponseStatus::Error,
                }
            }
        }
    }

    fn try_handle(&self, request: &AssistantRequest) -> anyhow::Result<AssistantResponse> {
        let classification = intent::classify(&request.message);
        info!("Classified message intent={:?}", classification.intent);

        match classification.intent {
            Intent::Catalog => self.handle_catalog(request, &classification.platforms),
            Intent::Analyze => self.handle_analyze(request, &classification.platforms),
            Intent::Task => Ok(AssistantResponse::text(TASK_RESPONSE)),
            Intent::Help => Ok(AssistantResponse::text(HELP_RESPONSE)),
            Intent::General => Ok(AssistantResponse::text(GENERAL_RESPONSE)),
        }
    }

    fn handle_catalog(
        &self,
        request: &AssistantRequest,
        platforms: &[PlatformId],
    ) -> anyhow::Result<AssistantResponse> {
        if request.raw_data.trim().is_empty() {
            return Ok(AssistantResponse::text(NO_RAW_DATA_RESPONSE));
        }

        let fields = self.extractor.extract(&request.raw_data);
        let listings: Vec<_> = platforms
            .iter()
            .map(|&platform| self.generator.generate(&fields, platform))
            .collect();

        let row = catalog::merge_row(&fields, &listings);
        let updated = catalog::append_row(&request.catalog_data, row);
        info!(
            "Appended catalog row fields={} platforms={}",
            fields.len(),
            platforms.len()
        );

        let platform_names: Vec<&str> = platforms.iter().map(|p| p.as_str()).collect();
        let response = format!(
            "Added 1 product to the catalog with listings for {} ({} fields extracted).",
            platform_names.join(", "),
            fields.len()
        );

        Ok(AssistantResponse {
            response,
            updated_catalog: Some(updated),
            status: ResponseStatus::Ok,
        })
    }

    fn handle_analyze(
        &self,
        request: &AssistantRequest,
        platforms: &[PlatformId],
    ) -> anyhow::Result<AssistantResponse> {
        if request.catalog_data.is_empty() {
            return Ok(AssistantResponse::text(NO_CATALOG_RESPONSE));
        }

        // Analyze targets every marketplace unless the message named some
        let platforms: Vec<PlatformId> = if platforms.is_empty() {
            PlatformId::all().to_vec()
        } else {
            platforms.to_vec()
        };

        // Only the first row is inspected; downstream editing is out of scope
        let findings = self.audit.audit_row(&request.catalog_data[0], &platforms);
        if findings.is_empty() {
            return Ok(AssistantResponse::text(
                "All required listing fields are present in the first catalog row.",
            ));
        }

        let mut lines = vec![format!(
            "Found {} missing required field(s) in the first catalog row:",
            findings.len()
        )];
        for finding in findings.iter().take(MAX_REPORTED_FINDINGS) {
            lines.push(format!("• {}", finding.describe()));
        }
        if findings.len() > MAX_REPORTED_FINDINGS {
            lines.push(format!(
                "...and {} more.",
                findings.len() - MAX_REPORTED_FINDINGS
            ));
        }

        Ok(AssistantResponse::text(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> RequestHandler {
        RequestHandler::new(&Config::default())
    }

    fn request(message: &str, catalog: Vec<CatalogRow>, raw: &str) -> AssistantRequest {
        AssistantRequest {
            message: message.to_string(),
            catalog_data: catalog,
            raw_data: raw.to_string(),
        }
    }

    #[test]
    fn test_catalog_request_appends_row() {
        let raw = "Product Name: Blue Shirt\nBrand: Acme\nPrice: 500\nColor: Blue";
        let req = request("create listings for amazon", Vec::new(), raw);

        let response = handler().handle(&req);
        assert_eq!(response.status, ResponseStatus::Ok);

        let updated = response.updated_catalog.expect("catalog should be updated");
        assert_eq!(updated.len(), 1);
        let row = &updated[0];
        assert_eq!(row.get("AMAZON_Product_Name").unwrap(), "Blue Shirt");
        assert_eq!(row.get("AMAZON_MRP").unwrap(), "600.00");
        assert_eq!(row.get("brand").unwrap(), "Acme");
        // Request's own catalog copy is untouched
        assert!(req.catalog_data.is_empty());
    }

    #[test]
    fn test_catalog_request_without_raw_data_is_guidance_not_error() {
        let req = request("create a catalog", Vec::new(), "  ");
        let response = handler().handle(&req);

        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.response, NO_RAW_DATA_RESPONSE);
        assert!(response.updated_catalog.is_none());
    }

    #[test]
    fn test_analyze_with_empty_catalog() {
        let req = request("analyze my catalog", Vec::new(), "");
        let response = handler().handle(&req);

        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.response, NO_CATALOG_RESPONSE);
        assert!(response.updated_catalog.is_none());
    }

    #[test]
    fn test_analyze_reports_missing_fields() {
        let raw = "Product Name: Blue Shirt\nBrand: Acme\nPrice: 500";
        let build = request("create listings for amazon", Vec::new(), raw);
        let catalog = handler().handle(&build).updated_catalog.unwrap();

        let req = request("analyze the amazon listing", catalog, "");
        let response = handler().handle(&req);

        assert_eq!(response.status, ResponseStatus::Ok);
        assert!(response.response.contains("AMAZON: Category"));
        assert!(response.updated_catalog.is_none());
    }

    #[test]
    fn test_task_message_returns_template() {
        let req = request("what tasks do I have", Vec::new(), "");
        let response = handler().handle(&req);

        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.response, TASK_RESPONSE);
        assert!(response.updated_catalog.is_none());
    }

    #[test]
    fn test_general_message() {
        let response = handler().handle(&request("hello there", Vec::new(), ""));
        assert_eq!(response.status, ResponseStatus::Ok);
        assert!(response.updated_catalog.is_none());
    }
}
