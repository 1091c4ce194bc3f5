use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

mod catalog;
mod config;
mod constants;
mod error;
mod handler;
mod intent;
mod logging;
mod pipeline;
mod platforms;

use crate::config::Config;
use crate::handler::{AssistantRequest, RequestHandler, ResponseStatus};
use crate::pipeline::audit::RequiredFieldAudit;
use crate::pipeline::extractor::{FieldExtractor, RegexFieldExtractor};
use crate::pipeline::listing::ListingGenerator;
use crate::platforms::PlatformId;

#[derive(Parser)]
#[command(name = "listing_assistant")]
#[command(about = "Marketplace listing generator and catalog assistant")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product fields from a raw text file and print them as JSON
    Extract {
        /// Path to the raw product text
        input: PathBuf,
    },
    /// Build marketplace listings from a raw text file and append the row to a catalog
    Catalog {
        /// Path to the raw product text
        input: PathBuf,
        /// Catalog JSON file to read and update
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,
        /// Specific marketplaces (comma-separated). Available: amazon, flipkart, meesho, myntra
        #[arg(long)]
        platforms: Option<String>,
    },
    /// Report missing required listing fields in the first catalog row
    Analyze {
        /// Catalog JSON file to inspect
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,
        /// Specific marketplaces (comma-separated)
        #[arg(long)]
        platforms: Option<String>,
    },
    /// Send one chat message through the request handler
    Chat {
        /// The message text
        message: String,
        /// Catalog JSON file to load (and update when a row is added)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// File with raw product text to attach to the request
        #[arg(long)]
        raw: Option<PathBuf>,
    },
}

/// Resolve a comma-separated platform list; all marketplaces when absent
fn resolve_platforms(arg: Option<String>) -> Vec<PlatformId> {
    match arg {
        Some(list) => {
            let mut platforms = Vec::new();
            for name in list.split(',') {
                match PlatformId::from_name(name) {
                    Some(platform) => platforms.push(platform),
                    None => {
                        warn!("Unknown platform specified: {}", name.trim());
                        println!(
                            "⚠️  Unknown platform: {} (available: {})",
                            name.trim(),
                            constants::supported_platforms().join(", ")
                        );
                    }
                }
            }
            platforms
        }
        None => PlatformId::all().to_vec(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Extract { input } => {
            let text = fs::read_to_string(&input)?;
            let fields = RegexFieldExtractor::new().extract(&text);
            info!("Extraction finished fields={}", fields.len());

            println!("🔍 Extracted {} field(s) from {}:", fields.len(), input.display());
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Commands::Catalog {
            input,
            catalog,
            platforms,
        } => {
            let platforms = resolve_platforms(platforms);
            if platforms.is_empty() {
                println!("❌ No valid platforms requested");
                return Ok(());
            }

            let text = fs::read_to_string(&input)?;
            let fields = RegexFieldExtractor::new().extract(&text);
            let generator = ListingGenerator::with_config(config.listing.clone());

            let listings: Vec<_> = platforms
                .iter()
                .map(|&platform| generator.generate(&fields, platform))
                .collect();
            let row = catalog::merge_row(&fields, &listings);

            let existing = catalog::load_catalog(&catalog)?;
            let updated = catalog::append_row(&existing, row);
            catalog::save_catalog(&catalog, &updated)?;

            println!("\n📊 Catalog updated: {}", catalog.display());
            println!("   Fields extracted: {}", fields.len());
            println!(
                "   Platforms: {}",
                platforms
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("   Total rows: {}", updated.len());
        }
        Commands::Analyze {
            catalog,
            platforms,
        } => {
            let platforms = resolve_platforms(platforms);
            let rows = catalog::load_catalog(&catalog)?;
            if rows.is_empty() {
                println!("ℹ️  Catalog {} is empty; nothing to analyze", catalog.display());
                return Ok(());
            }

            let findings = RequiredFieldAudit::new().audit_row(&rows[0], &platforms);
            if findings.is_empty() {
                println!("✅ All required listing fields present in the first row");
            } else {
                println!("⚠️  {} missing required field(s):", findings.len());
                for finding in findings.iter().take(10) {
                    println!("   - {}", finding.describe());
                }
            }
        }
        Commands::Chat {
            message,
            catalog,
            raw,
        } => {
            let catalog_data = match &catalog {
                Some(path) => catalog::load_catalog(path)?,
                None => Vec::new(),
            };
            let raw_data = match &raw {
                Some(path) => fs::read_to_string(path)?,
                None => String::new(),
            };

            let handler = RequestHandler::new(&config);
            let request = AssistantRequest {
                message,
                catalog_data,
                raw_data,
            };
            let response = handler.handle(&request);

            if response.status == ResponseStatus::Error {
                println!("❌ {}", response.response);
            } else {
                println!("💬 {}", response.response);
            }

            if let (Some(path), Some(updated)) = (&catalog, &response.updated_catalog) {
                catalog::save_catalog(path, updated)?;
                println!("📊 Catalog saved: {} ({} rows)", path.display(), updated.len());
            }
        }
    }
    Ok(())
}
