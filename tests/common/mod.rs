// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use remitcalc::application::RemitService;
use remitcalc::domain::InputSnapshot;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(RemitService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = RemitService::init(&db_path(&temp_dir)).await?;
    Ok((service, temp_dir))
}

/// Reopen the database in `temp_dir`, as a fresh process would
pub async fn reopen(temp_dir: &TempDir) -> Result<RemitService> {
    Ok(RemitService::init(&db_path(temp_dir)).await?)
}

fn db_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("test.db").to_str().unwrap().to_string()
}

/// Build a snapshot from the six form values, in form order
pub fn snapshot(
    refill_price: &str,
    brand_new_price: &str,
    stocks_out: &str,
    back_out: &str,
    remaining_items: &str,
    empty_cans: &str,
) -> InputSnapshot {
    InputSnapshot {
        refill_price: Some(refill_price.to_string()),
        brand_new_price: Some(brand_new_price.to_string()),
        stocks_out: Some(stocks_out.to_string()),
        back_out: Some(back_out.to_string()),
        remaining_items: Some(remaining_items.to_string()),
        empty_cans: Some(empty_cans.to_string()),
    }
}

/// The reference day: 100 out, 5 back, 20 left, 30 empties at 2.50 / 5.00
pub fn reference_day() -> InputSnapshot {
    snapshot("2.5", "5", "100", "5", "20", "30")
}
