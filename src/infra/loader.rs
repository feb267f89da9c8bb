//! Spreadsheet loader: turns an uploaded `.xlsx` or `.csv` byte buffer into
//! a typed [`CostTable`].
//!
//! Header resolution happens once, here. Flat cost columns are required and
//! matched against the canonical sheet headers (legacy spellings accepted);
//! per-destination freight columns are optional so a freight-free sheet still
//! loads and FOB calculations keep working.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use thiserror::Error;

use crate::domain::{CostRow, CostTable, Destination};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type for '{0}'; upload a .xlsx or .csv sheet")]
    UnsupportedFormat(String),
    #[error("could not read workbook: {0}")]
    Workbook(String),
    #[error("could not read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("the sheet is missing the required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: '{column}' has a non-numeric value '{value}'")]
    BadNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("the sheet has headers but no data rows")]
    NoRows,
}

/// Parses uploaded bytes into a cost table, dispatching on the extension.
pub fn load_cost_table(file_name: &str, bytes: &[u8]) -> Result<CostTable, LoadError> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
        load_xlsx(bytes)
    } else if lower.ends_with(".csv") {
        load_csv(bytes)
    } else {
        Err(LoadError::UnsupportedFormat(file_name.to_string()))
    }
}

fn load_xlsx(bytes: &[u8]) -> Result<CostTable, LoadError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|err| LoadError::Workbook(err.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Workbook("workbook has no sheets".to_string()))?
        .map_err(|err| LoadError::Workbook(err.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::NoRows)?
        .iter()
        .map(header_from_data)
        .collect();
    let body: Vec<Vec<CellValue>> = rows
        .map(|cells| cells.iter().map(CellValue::from_data).collect())
        .collect();
    build_table(&headers, body)
}

fn load_csv(bytes: &[u8]) -> Result<CostTable, LoadError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let mut body = Vec::new();
    for record in reader.records() {
        let record = record?;
        body.push(record.iter().map(CellValue::from_str).collect());
    }
    build_table(&headers, body)
}

/// A parsed cell, normalized across the two input formats.
#[derive(Clone, Debug)]
enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Float(value) => CellValue::Number(*value),
            Data::Int(value) => CellValue::Number(*value as f64),
            Data::String(text) if text.trim().is_empty() => CellValue::Empty,
            Data::String(text) => CellValue::Text(text.trim().to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }

    fn from_str(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(value) => Some(format_number(*value)),
            CellValue::Text(text) => Some(text.clone()),
        }
    }

    /// Numeric reading; tolerates thousands separators in text cells.
    fn as_number(&self) -> Option<Result<f64, String>> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(value) => Some(Ok(*value)),
            CellValue::Text(text) => {
                let cleaned = text.replace(',', "");
                Some(cleaned.trim().parse::<f64>().map_err(|_| text.clone()))
            }
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn header_from_data(data: &Data) -> String {
    match data {
        Data::String(text) => text.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Column indices resolved from the header row.
struct ResolvedHeaders {
    product: usize,
    base_cost: usize,
    packaging_cost: usize,
    export_duty: usize,
    logistic_to_port: usize,
    thc_stuffing: usize,
    warehousing: usize,
    demurrage: usize,
    cross_stuffing_fee: usize,
    sgs_fee: usize,
    ocean_freight: HashMap<Destination, usize>,
    land_freight: HashMap<Destination, usize>,
}

impl ResolvedHeaders {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers.iter().position(|header| {
                names
                    .iter()
                    .any(|name| header.trim().eq_ignore_ascii_case(name))
            })
        };
        let require = |canonical: &'static str, names: &[&str]| {
            find(names).ok_or(LoadError::MissingColumn(canonical))
        };

        let mut ocean_freight = HashMap::new();
        let mut land_freight = HashMap::new();
        for dest in Destination::ALL {
            if let Some(idx) = find(&[dest.ocean_freight_column().as_str()]) {
                ocean_freight.insert(dest, idx);
            }
            if let Some(idx) = find(&[dest.land_freight_column().as_str()]) {
                land_freight.insert(dest, idx);
            }
        }

        Ok(Self {
            product: require("Product", &["Product"])?,
            base_cost: require("Base Cost (Ex-Work)", &["Base Cost (Ex-Work)", "Base Cost"])?,
            packaging_cost: require("Packaging Cost", &["Packaging Cost"])?,
            export_duty: require("Export Duty", &["Export Duty"])?,
            logistic_to_port: require(
                "Logistic to Port (Bandar Abas)",
                &["Logistic to Port (Bandar Abas)", "Logistic to Port"],
            )?,
            thc_stuffing: require("THC + Stuffing", &["THC + Stuffing"])?,
            warehousing: require("Warehousing", &["Warehousing"])?,
            // "Demmurag" is how the legacy sheet spells it.
            demurrage: require("Demurrage", &["Demurrage", "Demmurag"])?,
            cross_stuffing_fee: require("Cross Stuffing Fee", &["Cross Stuffing Fee"])?,
            sgs_fee: require("SGS", &["SGS", "SGS Fee"])?,
            ocean_freight,
            land_freight,
        })
    }
}

fn build_table(headers: &[String], body: Vec<Vec<CellValue>>) -> Result<CostTable, LoadError> {
    let resolved = ResolvedHeaders::resolve(headers)?;
    let mut rows = Vec::new();

    for (offset, cells) in body.iter().enumerate() {
        // Sheet row number for messages: 1-based, after the header row.
        let row_number = offset + 2;
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }

        let product = match cells.get(resolved.product).and_then(CellValue::as_text) {
            Some(name) => name,
            None => continue,
        };

        let flat = |idx: usize, column: &str| -> Result<f64, LoadError> {
            match cells.get(idx).and_then(CellValue::as_number) {
                // Unused fee columns are routinely left blank in the template.
                None => Ok(0.0),
                Some(Ok(value)) => Ok(value),
                Some(Err(value)) => Err(LoadError::BadNumber {
                    row: row_number,
                    column: column.to_string(),
                    value,
                }),
            }
        };

        let mut row = CostRow {
            product,
            base_cost: flat(resolved.base_cost, "Base Cost (Ex-Work)")?,
            packaging_cost: flat(resolved.packaging_cost, "Packaging Cost")?,
            export_duty: flat(resolved.export_duty, "Export Duty")?,
            logistic_to_port: flat(resolved.logistic_to_port, "Logistic to Port (Bandar Abas)")?,
            thc_stuffing: flat(resolved.thc_stuffing, "THC + Stuffing")?,
            warehousing: flat(resolved.warehousing, "Warehousing")?,
            demurrage: flat(resolved.demurrage, "Demurrage")?,
            cross_stuffing_fee: flat(resolved.cross_stuffing_fee, "Cross Stuffing Fee")?,
            sgs_fee: flat(resolved.sgs_fee, "SGS")?,
            ..CostRow::default()
        };

        for (dest, idx) in &resolved.ocean_freight {
            match cells.get(*idx).and_then(CellValue::as_number) {
                // An empty freight cell stays out of the map; the aggregator
                // reports it only when an Incoterm actually needs it.
                None => {}
                Some(Ok(value)) => {
                    row.ocean_freight.insert(*dest, value);
                }
                Some(Err(value)) => {
                    return Err(LoadError::BadNumber {
                        row: row_number,
                        column: dest.ocean_freight_column(),
                        value,
                    })
                }
            }
        }
        for (dest, idx) in &resolved.land_freight {
            match cells.get(*idx).and_then(CellValue::as_number) {
                None => {}
                Some(Ok(value)) => {
                    row.land_freight.insert(*dest, value);
                }
                Some(Err(value)) => {
                    return Err(LoadError::BadNumber {
                        row: row_number,
                        column: dest.land_freight_column(),
                        value,
                    })
                }
            }
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::NoRows);
    }
    Ok(CostTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compute_breakdown, AggregationError, CalculationRequest, Incoterm};

    const LEGACY_SHEET: &str = "\
Product,Base Cost (Ex-Work),Packaging Cost,Export Duty,Logistic to Port (Bandar Abas),THC + Stuffing,Warehousing,Demmurag,Cross Stuffing Fee,SGS,\"Ocean Freight (Rotterdam, NL)\",\"Land Freight (Rotterdam, NL)\"
Urea,100,10,5,20,15,8,2,12,7,300,250
Sulphur,80,\"1,200\",0,18,14,6,,9,5,280,
";

    #[test]
    fn loads_legacy_headers_and_values() {
        let table = load_cost_table("costs.csv", LEGACY_SHEET.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let urea = table.find_product("Urea").unwrap();
        assert_eq!(urea.base_cost, 100.0);
        assert_eq!(urea.demurrage, 2.0);
        assert_eq!(urea.sgs_fee, 7.0);
        assert_eq!(
            urea.ocean_freight_to(Destination::RotterdamNl),
            Some(300.0)
        );
        assert_eq!(urea.land_freight_to(Destination::RotterdamNl), Some(250.0));

        // thousands separator and blank cells
        let sulphur = table.find_product("Sulphur").unwrap();
        assert_eq!(sulphur.packaging_cost, 1200.0);
        assert_eq!(sulphur.demurrage, 0.0);
        assert_eq!(sulphur.land_freight_to(Destination::RotterdamNl), None);
    }

    #[test]
    fn missing_required_column_fails_at_load() {
        let sheet = "Product,Base Cost (Ex-Work)\nUrea,100\n";
        let err = load_cost_table("costs.csv", sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }

    #[test]
    fn non_numeric_cell_fails_at_load() {
        let sheet = LEGACY_SHEET.replace("80", "eighty");
        let err = load_cost_table("costs.csv", sheet.as_bytes()).unwrap_err();
        match err {
            LoadError::BadNumber { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "eighty");
            }
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_cost_table("costs.ods", b"").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let sheet = LEGACY_SHEET.lines().next().unwrap().to_string() + "\n";
        let err = load_cost_table("costs.csv", sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoRows));
    }

    #[test]
    fn absent_freight_column_surfaces_at_calculation_time() {
        // Sheet carries Rotterdam freight only; Jebel Ali is never present.
        let table = load_cost_table("costs.csv", LEGACY_SHEET.as_bytes()).unwrap();
        let request = CalculationRequest {
            product: "Urea".to_string(),
            destination: Destination::JebelAli,
            incoterm: Incoterm::Cif,
            include_cross_stuffing: false,
            include_sgs: false,
        };
        let err = compute_breakdown(&table, &request).unwrap_err();
        assert!(matches!(err, AggregationError::MissingField { .. }));

        let fob = CalculationRequest {
            incoterm: Incoterm::Fob,
            ..request
        };
        assert!(compute_breakdown(&table, &fob).is_ok());
    }
}
