use anyhow::Result;
use listing_assistant::catalog;
use listing_assistant::config::Config;
use listing_assistant::handler::{AssistantRequest, RequestHandler, ResponseStatus};
use listing_assistant::platforms::PlatformId;
use tempfile::tempdir;

#[test]
fn test_chat_flow_builds_and_persists_catalog() -> Result<()> {
    let temp_dir = tempdir()?;
    let catalog_path = temp_dir.path().join("catalog.json");

    let handler = RequestHandler::new(&Config::default());

    // Build a row from raw product text
    let build = AssistantRequest {
        message: "create listings for amazon and flipkart".to_string(),
        catalog_data: Vec::new(),
        raw_data: "Product Name: Blue Shirt\nBrand: Acme\nPrice: 500\nColor: Blue".to_string(),
    };
    let response = handler.handle(&build);
    assert_eq!(response.status, ResponseStatus::Ok);

    let updated = response.updated_catalog.expect("row should be appended");
    assert_eq!(updated.len(), 1);

    let row = &updated[0];
    assert_eq!(row.get("AMAZON_Product_Name").unwrap(), "Blue Shirt");
    assert_eq!(row.get("AMAZON_MRP").unwrap(), "600.00");
    assert_eq!(row.get("FLIPKART_Selling_Price").unwrap(), "500");
    // No meesho block was requested
    assert!(!row.keys().any(|k| k.starts_with("MEESHO_")));

    // Persist and reload through the catalog file codec
    catalog::save_catalog(&catalog_path, &updated)?;
    let reloaded = catalog::load_catalog(&catalog_path)?;
    assert_eq!(reloaded, updated);

    // Analyze the reloaded catalog: category was never supplied
    let analyze = AssistantRequest {
        message: "analyze the amazon listing".to_string(),
        catalog_data: reloaded,
        raw_data: String::new(),
    };
    let response = handler.handle(&analyze);
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(response.response.contains("AMAZON: Category"));
    assert!(response.updated_catalog.is_none());

    Ok(())
}

#[test]
fn test_required_keys_present_for_every_platform() -> Result<()> {
    let handler = RequestHandler::new(&Config::default());

    let build = AssistantRequest {
        message: "create a catalog entry".to_string(),
        catalog_data: Vec::new(),
        raw_data: "Product Name: Mug".to_string(),
    };
    let response = handler.handle(&build);
    let updated = response.updated_catalog.expect("row should be appended");
    let row = &updated[0];

    // Every platform block is present with its required keys
    for platform in PlatformId::all() {
        let prefix = format!("{}_", platform.key_prefix());
        assert!(
            row.keys().any(|k| k.starts_with(&prefix)),
            "no {} block in row",
            platform
        );
    }
    assert!(row.contains_key("AMAZON_Category"));
    assert!(row.contains_key("MEESHO_Product_Image"));
    assert!(row.contains_key("MYNTRA_Style_ID"));

    Ok(())
}
