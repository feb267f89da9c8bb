use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::entities::{CostBreakdown, CostTable, Destination, Incoterm};

/// The widget selections driving a calculation. Persisted across launches so
/// a returning user lands on their usual product and route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub product: Option<String>,
    pub destination: Destination,
    pub incoterm: Incoterm,
    pub include_cross_stuffing: bool,
    pub include_sgs: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            product: None,
            destination: Destination::TianjinChina,
            incoterm: Incoterm::Fob,
            include_cross_stuffing: false,
            include_sgs: false,
        }
    }
}

/// Session state owned by the interaction shell. The aggregator itself holds
/// none of this; each calculation receives the table and a fresh request.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub table: CostTable,
    /// File name of the loaded sheet, shown in the UI.
    pub source_name: Option<String>,
    pub loaded_at: Option<SystemTime>,
    pub selection: Selection,
    pub last_breakdown: Option<CostBreakdown>,
}

impl AppState {
    pub fn has_sheet(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn replace_sheet(&mut self, table: CostTable, source_name: String) {
        // A stale product selection would point into the old sheet.
        let stale = self
            .selection
            .product
            .as_deref()
            .map(|product| table.find_product(product).is_none())
            .unwrap_or(false);
        if stale {
            self.selection.product = None;
        }
        self.table = table;
        self.source_name = Some(source_name);
        self.loaded_at = Some(SystemTime::now());
        self.last_breakdown = None;
    }

    pub fn clear_sheet(&mut self) {
        self.table = CostTable::default();
        self.source_name = None;
        self.loaded_at = None;
        self.last_breakdown = None;
        self.selection.product = None;
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.selection = persisted.selection;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            selection: self.selection.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub selection: Selection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CostRow;

    #[test]
    fn replacing_the_sheet_drops_a_stale_product_selection() {
        let mut state = AppState::default();
        state.selection.product = Some("Urea".to_string());

        let sulphur_only = CostTable::new(vec![CostRow {
            product: "Sulphur".to_string(),
            ..CostRow::default()
        }]);
        state.replace_sheet(sulphur_only, "costs.xlsx".to_string());
        assert_eq!(state.selection.product, None);
        assert!(state.has_sheet());

        state.clear_sheet();
        assert!(!state.has_sheet());
        assert_eq!(state.source_name, None);
    }
}
