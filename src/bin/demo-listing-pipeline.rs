/// Demo: Run the complete listing flow from raw product text to catalog row
/// Extract → Generate (per marketplace) → Merge → Audit
use listing_assistant::{
    catalog,
    config::Config,
    handler::{AssistantRequest, RequestHandler},
    logging,
    pipeline::{
        audit::RequiredFieldAudit,
        extractor::{FieldExtractor, RegexFieldExtractor},
        listing::ListingGenerator,
    },
    platforms::PlatformId,
};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    // Raw product text comes from the first argument, or a built-in sample
    let args: Vec<String> = env::args().collect();
    let raw_text = if args.len() > 1 {
        std::fs::read_to_string(&args[1])?
    } else {
        println!("ℹ️  No input file specified, using built-in sample");
        println!("Usage: {} <product_text_file>", args[0]);
        "Product Name: Blue Shirt\n\
         Brand: Acme\n\
         Price: 500\n\
         Color: Blue\n\
         Material: Cotton\n\
         Description: Soft breathable cotton shirt. Pre-shrunk fabric. Machine washable."
            .to_string()
    };

    println!("\n🚀 LISTING PIPELINE DEMO: From Product Text to Catalog");
    println!("{}", "=".repeat(60));
    println!("Stages: Extract → Generate → Merge → Audit");

    // Stage 1: Extract
    println!("\n🔍 Stage 1: Extracting product fields...");
    let extractor = RegexFieldExtractor::new();
    let fields = extractor.extract(&raw_text);
    println!("   Extracted {} field(s):", fields.len());
    for (key, value) in fields.iter() {
        println!("   - {} = {}", key.as_str(), value);
    }

    // Stage 2: Generate listings for every marketplace
    println!("\n🏭 Stage 2: Generating marketplace listings...");
    let config = Config::load()?;
    let generator = ListingGenerator::with_config(config.listing.clone());
    let mut listings = Vec::new();
    for platform in PlatformId::all() {
        let record = generator.generate(&fields, platform);
        println!("   {} → {} field(s)", platform, record.len());
        listings.push(record);
    }

    // Stage 3: Merge into one catalog row
    println!("\n🧩 Stage 3: Merging into a catalog row...");
    let row = catalog::merge_row(&fields, &listings);
    println!("   Row carries {} key(s)", row.len());

    // Stage 4: Audit required fields
    println!("\n🔎 Stage 4: Auditing required fields...");
    let audit = RequiredFieldAudit::new();
    let findings = audit.audit_row(&row, &PlatformId::all());
    if findings.is_empty() {
        println!("   ✅ All required fields satisfied");
    } else {
        println!("   ⚠️  {} missing required field(s):", findings.len());
        for finding in findings.iter().take(10) {
            println!("   - {}", finding.describe());
        }
    }

    // Bonus: the same flow through the chat handler
    println!("\n💬 Chat handler round trip...");
    let handler = RequestHandler::new(&config);
    let response = handler.handle(&AssistantRequest {
        message: "create listings for this product".to_string(),
        catalog_data: Vec::new(),
        raw_data: raw_text,
    });
    println!("   Assistant: {}", response.response);
    if let Some(updated) = response.updated_catalog {
        println!("   Catalog now holds {} row(s)", updated.len());
    }

    println!("\n✅ Demo complete");
    Ok(())
}
