use std::io::Write;

use anyhow::Result;

use crate::application::Receipt;
use crate::domain::format_cents;

/// Output format for a session receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Csv,
    Json,
}

impl ReceiptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptFormat::Csv => "csv",
            ReceiptFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ReceiptFormat::Csv),
            "json" => Some(ReceiptFormat::Json),
            _ => None,
        }
    }
}

/// Write one CSV row per sale. Returns the number of rows written.
pub fn write_receipt_csv<W: Write>(receipt: &Receipt, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "sold_at",
        "code",
        "name",
        "quantity",
        "unit_price",
        "total",
    ])?;

    for sale in &receipt.sales {
        csv_writer.write_record(&[
            sale.id.to_string(),
            sale.sold_at.to_rfc3339(),
            sale.code.to_string(),
            sale.name.clone(),
            sale.quantity.to_string(),
            format_cents(sale.unit_price),
            format_cents(sale.total),
        ])?;
    }

    csv_writer.flush()?;
    Ok(receipt.sales.len())
}

/// Write the full receipt as pretty JSON.
pub fn write_receipt_json<W: Write>(receipt: &Receipt, mut writer: W) -> Result<()> {
    let json = serde_json::to_string_pretty(receipt)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn write_receipt<W: Write>(receipt: &Receipt, format: ReceiptFormat, writer: W) -> Result<()> {
    match format {
        ReceiptFormat::Csv => write_receipt_csv(receipt, writer).map(|_| ()),
        ReceiptFormat::Json => write_receipt_json(receipt, writer),
    }
}
