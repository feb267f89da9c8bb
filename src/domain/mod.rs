//! Domain logic for landed-cost calculation lives here.

pub mod aggregation;
pub mod app_state;
pub mod entities;

pub use aggregation::{compute_breakdown, AggregationError};
pub use app_state::{AppState, PersistedState, Selection};
pub use entities::{
    CalculationRequest, CostBreakdown, CostRow, CostTable, Destination, Incoterm,
};
