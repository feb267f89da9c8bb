use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Destinations the cost sheet carries freight columns for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    TianjinChina,
    JebelAli,
    RotterdamNl,
    MersinTr,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::TianjinChina,
        Destination::JebelAli,
        Destination::RotterdamNl,
        Destination::MersinTr,
    ];

    /// Display label, spelled the way the cost sheet spells it.
    pub fn label(&self) -> &'static str {
        match self {
            Destination::TianjinChina => "Tianjin, China",
            Destination::JebelAli => "Jebel Ali",
            Destination::RotterdamNl => "Rotterdam, NL",
            Destination::MersinTr => "Mersin, Tr",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dest| dest.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Header of this destination's ocean freight column.
    pub fn ocean_freight_column(&self) -> String {
        format!("Ocean Freight ({})", self.label())
    }

    /// Header of this destination's land freight column.
    pub fn land_freight_column(&self) -> String {
        format!("Land Freight ({})", self.label())
    }
}

/// Trade terms the calculator supports. The term decides which freight leg
/// the seller carries: ocean freight under CIF/CFR, land freight under CPT,
/// neither under FOB (FOB ends at export and port handling).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Incoterm {
    Fob,
    Cif,
    Cfr,
    Cpt,
}

impl Incoterm {
    pub const ALL: [Incoterm; 4] = [Incoterm::Fob, Incoterm::Cif, Incoterm::Cfr, Incoterm::Cpt];

    pub fn label(&self) -> &'static str {
        match self {
            Incoterm::Fob => "FOB",
            Incoterm::Cif => "CIF",
            Incoterm::Cfr => "CFR",
            Incoterm::Cpt => "CPT",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|term| term.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn includes_ocean_freight(&self) -> bool {
        matches!(self, Incoterm::Cif | Incoterm::Cfr)
    }

    pub fn includes_land_freight(&self) -> bool {
        matches!(self, Incoterm::Cpt)
    }
}

/// One product's cost components as loaded from the sheet.
///
/// A destination missing from a freight map models a freight column the
/// sheet does not carry (or left empty) for that row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostRow {
    pub product: String,
    pub base_cost: f64,
    pub packaging_cost: f64,
    pub export_duty: f64,
    pub logistic_to_port: f64,
    pub thc_stuffing: f64,
    pub warehousing: f64,
    pub demurrage: f64,
    pub cross_stuffing_fee: f64,
    pub sgs_fee: f64,
    pub ocean_freight: HashMap<Destination, f64>,
    pub land_freight: HashMap<Destination, f64>,
}

impl CostRow {
    pub fn ocean_freight_to(&self, destination: Destination) -> Option<f64> {
        self.ocean_freight.get(&destination).copied()
    }

    pub fn land_freight_to(&self, destination: Destination) -> Option<f64> {
        self.land_freight.get(&destination).copied()
    }
}

/// The loaded cost sheet, rows in sheet order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostTable {
    rows: Vec<CostRow>,
}

impl CostTable {
    pub fn new(rows: Vec<CostRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CostRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct product names, first occurrence wins, sheet order preserved.
    pub fn products(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|name: &String| name == &row.product) {
                seen.push(row.product.clone());
            }
        }
        seen
    }

    /// First row matching the product, in sheet order. The sheet is expected
    /// to carry at most one row per product; duplicates are not re-validated.
    pub fn find_product(&self, product: &str) -> Option<&CostRow> {
        self.rows.iter().find(|row| row.product == product)
    }
}

/// One calculation's inputs. Built fresh per click, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationRequest {
    pub product: String,
    pub destination: Destination,
    pub incoterm: Incoterm,
    pub include_cross_stuffing: bool,
    pub include_sgs: bool,
}

/// The resolved result of one calculation. Non-applicable line items are
/// forced to 0.0 rather than omitted so the record shape is identical across
/// every Incoterm and flag combination.
#[derive(Clone, Debug, PartialEq)]
pub struct CostBreakdown {
    pub product: String,
    pub destination: Destination,
    pub incoterm: Incoterm,
    pub base_cost: f64,
    pub packaging_cost: f64,
    pub export_duty: f64,
    pub logistic_to_port: f64,
    pub ocean_freight: f64,
    pub land_freight: f64,
    pub thc_stuffing: f64,
    pub sgs_fee: f64,
    pub cross_stuffing_fee: f64,
    pub warehousing: f64,
    pub demurrage: f64,
    pub total_landed_cost: f64,
}

impl CostBreakdown {
    /// The eleven line items in output-column order.
    pub fn line_items(&self) -> [(&'static str, f64); 11] {
        [
            ("Base Cost (Ex-Work)", self.base_cost),
            ("Packaging Cost", self.packaging_cost),
            ("Export Duty", self.export_duty),
            ("Logistic to Port (Bandar Abas)", self.logistic_to_port),
            ("Ocean Freight", self.ocean_freight),
            ("Land Freight", self.land_freight),
            ("THC + Stuffing", self.thc_stuffing),
            ("SGS Fee", self.sgs_fee),
            ("Cross Stuffing Fee", self.cross_stuffing_fee),
            ("Warehousing", self.warehousing),
            ("Demurrage", self.demurrage),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freight_policy_per_incoterm() {
        assert!(!Incoterm::Fob.includes_ocean_freight());
        assert!(!Incoterm::Fob.includes_land_freight());
        assert!(Incoterm::Cif.includes_ocean_freight());
        assert!(Incoterm::Cfr.includes_ocean_freight());
        assert!(!Incoterm::Cpt.includes_ocean_freight());
        assert!(Incoterm::Cpt.includes_land_freight());
        assert!(!Incoterm::Cif.includes_land_freight());
    }

    #[test]
    fn labels_round_trip() {
        for dest in Destination::ALL {
            assert_eq!(Destination::from_label(dest.label()), Some(dest));
        }
        for term in Incoterm::ALL {
            assert_eq!(Incoterm::from_label(term.label()), Some(term));
        }
        assert_eq!(Incoterm::from_label("fob"), Some(Incoterm::Fob));
        assert_eq!(Destination::from_label("nowhere"), None);
    }

    #[test]
    fn products_deduplicate_in_sheet_order() {
        let table = CostTable::new(vec![
            CostRow {
                product: "Urea".to_string(),
                ..CostRow::default()
            },
            CostRow {
                product: "Sulphur".to_string(),
                ..CostRow::default()
            },
            CostRow {
                product: "Urea".to_string(),
                base_cost: 99.0,
                ..CostRow::default()
            },
        ]);
        assert_eq!(table.products(), vec!["Urea", "Sulphur"]);
        // duplicate lookup returns the first row
        assert_eq!(table.find_product("Urea").unwrap().base_cost, 0.0);
    }
}
