use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::AppError;
use crate::domain::{Catalog, Item, ItemCode, parse_cents};

/// One catalog line as written in a seed file.
/// `price` is a decimal string such as "1.50".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub code: ItemCode,
    pub name: String,
    pub price: String,
    pub stock: u32,
}

impl CatalogRecord {
    fn into_item(self, record: usize) -> Result<Item, AppError> {
        let price = parse_cents(&self.price).map_err(|e| AppError::CatalogFile {
            record,
            message: format!("invalid price '{}': {}", self.price, e),
        })?;
        if self.name.trim().is_empty() {
            return Err(AppError::CatalogFile {
                record,
                message: format!("item {} has an empty name", self.code),
            });
        }
        Ok(Item::new(self.code, self.name.trim(), price, self.stock))
    }
}

/// Load a seed catalog, picking the format from the file extension.
pub fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => read_catalog_json(std::fs::File::open(path)?),
        "csv" => read_catalog_csv(std::fs::File::open(path)?),
        _ => Err(AppError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read a JSON array of catalog records.
pub fn read_catalog_json<R: Read>(reader: R) -> Result<Catalog, AppError> {
    let records: Vec<CatalogRecord> =
        serde_json::from_reader(reader).map_err(|e| AppError::CatalogFile {
            record: 0,
            message: e.to_string(),
        })?;

    let items = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_item(index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::from_items(items)?)
}

/// Read CSV with header `code,name,price,stock`.
pub fn read_catalog_csv<R: Read>(reader: R) -> Result<Catalog, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (index, result) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
        let record = index + 1;
        let row = result.map_err(|e| AppError::CatalogFile {
            record,
            message: format!("CSV parse error: {}", e),
        })?;
        items.push(row.into_item(record)?);
    }

    Ok(Catalog::from_items(items)?)
}
