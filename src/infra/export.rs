//! Spreadsheet writer: serializes one [`CostBreakdown`] into a single-row
//! CSV and drops it in the user's downloads directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domain::CostBreakdown;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize the breakdown: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("no downloads directory available")]
    StorageUnavailable,
}

/// Serializes the breakdown using the result-sheet column layout: the
/// request echo, the eleven line items, and the total.
pub fn breakdown_to_csv(breakdown: &CostBreakdown) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut headers = vec!["Product", "Destination", "Incoterm"];
    headers.extend(breakdown.line_items().map(|(label, _)| label));
    headers.push("Total Landed Cost");
    writer.write_record(&headers)?;

    let mut fields = vec![
        breakdown.product.clone(),
        breakdown.destination.label().to_string(),
        breakdown.incoterm.label().to_string(),
    ];
    fields.extend(
        breakdown
            .line_items()
            .map(|(_, amount)| amount.to_string()),
    );
    fields.push(breakdown.total_landed_cost.to_string());
    writer.write_record(&fields)?;

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

pub fn export_file_name(breakdown: &CostBreakdown, exported_at: OffsetDateTime) -> String {
    let format = format_description!("[year][month][day]-[hour][minute][second]");
    let stamp = exported_at
        .format(format)
        .unwrap_or_else(|_| "latest".to_string());
    format!(
        "landed-cost-{}-{}-{stamp}.csv",
        slug(&breakdown.product),
        breakdown.incoterm.label().to_ascii_lowercase(),
    )
}

/// Writes the export next to the user's other downloads, falling back to the
/// home directory on platforms without one.
pub fn save_to_downloads(file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or(ExportError::StorageUnavailable)?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

pub fn export_breakdown(breakdown: &CostBreakdown) -> Result<PathBuf, ExportError> {
    let bytes = breakdown_to_csv(breakdown)?;
    let name = export_file_name(breakdown, OffsetDateTime::now_utc());
    save_to_downloads(&name, &bytes)
}

fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        "product".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Destination, Incoterm};
    use time::macros::datetime;

    fn sample_breakdown() -> CostBreakdown {
        CostBreakdown {
            product: "Granular Urea".to_string(),
            destination: Destination::RotterdamNl,
            incoterm: Incoterm::Cif,
            base_cost: 100.0,
            packaging_cost: 10.0,
            export_duty: 5.0,
            logistic_to_port: 20.0,
            ocean_freight: 300.0,
            land_freight: 0.0,
            thc_stuffing: 15.0,
            sgs_fee: 0.0,
            cross_stuffing_fee: 12.0,
            warehousing: 8.0,
            demurrage: 2.0,
            total_landed_cost: 472.0,
        }
    }

    #[test]
    fn csv_has_result_sheet_layout() {
        let bytes = breakdown_to_csv(&sample_breakdown()).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 15);
        assert_eq!(&headers[0], "Product");
        assert_eq!(&headers[3], "Base Cost (Ex-Work)");
        assert_eq!(&headers[14], "Total Landed Cost");

        let records: Vec<_> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(&record[1], "Rotterdam, NL");
        assert_eq!(&record[2], "CIF");
        assert_eq!(&record[14], "472");
        // zeroed line items are written, not omitted
        assert_eq!(&record[8], "0");
    }

    #[test]
    fn file_name_is_slugged_and_stamped() {
        let name = export_file_name(&sample_breakdown(), datetime!(2026-08-06 10:15:00 UTC));
        assert_eq!(name, "landed-cost-granular-urea-cif-20260806-101500.csv");
    }
}
