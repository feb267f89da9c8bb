//! Landed-cost aggregation: select a product row, resolve the conditional
//! line items for the chosen Incoterm and fee flags, and sum the total.

use thiserror::Error;

use super::entities::{CalculationRequest, CostBreakdown, CostRow, CostTable, Destination};

#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("no matching cost data for product '{0}'")]
    NotFound(String),
    #[error("the sheet has no '{column}' value for product '{product}'")]
    MissingField { product: String, column: String },
}

/// Resolves one calculation against the loaded table.
///
/// Pure function of its inputs: nothing is mutated, nothing is retried, and
/// errors are reported to the caller rather than raised further.
pub fn compute_breakdown(
    table: &CostTable,
    request: &CalculationRequest,
) -> Result<CostBreakdown, AggregationError> {
    let row = table
        .find_product(&request.product)
        .ok_or_else(|| AggregationError::NotFound(request.product.clone()))?;

    let ocean_freight = if request.incoterm.includes_ocean_freight() {
        required_freight(row, request.destination, FreightLeg::Ocean)?
    } else {
        0.0
    };

    let land_freight = if request.incoterm.includes_land_freight() {
        required_freight(row, request.destination, FreightLeg::Land)?
    } else {
        0.0
    };

    let cross_stuffing_fee = if request.include_cross_stuffing {
        row.cross_stuffing_fee
    } else {
        0.0
    };
    let sgs_fee = if request.include_sgs { row.sgs_fee } else { 0.0 };

    let total_landed_cost = row.base_cost
        + row.packaging_cost
        + row.export_duty
        + row.logistic_to_port
        + ocean_freight
        + land_freight
        + row.thc_stuffing
        + cross_stuffing_fee
        + row.warehousing
        + row.demurrage
        + sgs_fee;

    Ok(CostBreakdown {
        product: row.product.clone(),
        destination: request.destination,
        incoterm: request.incoterm,
        base_cost: row.base_cost,
        packaging_cost: row.packaging_cost,
        export_duty: row.export_duty,
        logistic_to_port: row.logistic_to_port,
        ocean_freight,
        land_freight,
        thc_stuffing: row.thc_stuffing,
        sgs_fee,
        cross_stuffing_fee,
        warehousing: row.warehousing,
        demurrage: row.demurrage,
        total_landed_cost,
    })
}

enum FreightLeg {
    Ocean,
    Land,
}

fn required_freight(
    row: &CostRow,
    destination: Destination,
    leg: FreightLeg,
) -> Result<f64, AggregationError> {
    let (value, column) = match leg {
        FreightLeg::Ocean => (
            row.ocean_freight_to(destination),
            destination.ocean_freight_column(),
        ),
        FreightLeg::Land => (
            row.land_freight_to(destination),
            destination.land_freight_column(),
        ),
    };
    value.ok_or_else(|| AggregationError::MissingField {
        product: row.product.clone(),
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Incoterm;

    fn widget_row() -> CostRow {
        let mut row = CostRow {
            product: "Widget".to_string(),
            base_cost: 100.0,
            packaging_cost: 10.0,
            export_duty: 5.0,
            logistic_to_port: 20.0,
            thc_stuffing: 15.0,
            warehousing: 8.0,
            demurrage: 2.0,
            cross_stuffing_fee: 12.0,
            sgs_fee: 7.0,
            ..CostRow::default()
        };
        for dest in Destination::ALL {
            row.ocean_freight.insert(dest, 300.0);
            row.land_freight.insert(dest, 250.0);
        }
        row
    }

    fn widget_table() -> CostTable {
        CostTable::new(vec![widget_row()])
    }

    fn request(incoterm: Incoterm, cross: bool, sgs: bool) -> CalculationRequest {
        CalculationRequest {
            product: "Widget".to_string(),
            destination: Destination::RotterdamNl,
            incoterm,
            include_cross_stuffing: cross,
            include_sgs: sgs,
        }
    }

    #[test]
    fn cif_to_rotterdam_with_cross_stuffing() {
        let breakdown =
            compute_breakdown(&widget_table(), &request(Incoterm::Cif, true, false)).unwrap();
        assert_eq!(breakdown.ocean_freight, 300.0);
        assert_eq!(breakdown.land_freight, 0.0);
        assert_eq!(breakdown.cross_stuffing_fee, 12.0);
        assert_eq!(breakdown.sgs_fee, 0.0);
        assert_eq!(breakdown.total_landed_cost, 472.0);
    }

    #[test]
    fn fob_excludes_both_freight_legs() {
        for dest in Destination::ALL {
            let mut req = request(Incoterm::Fob, false, false);
            req.destination = dest;
            let breakdown = compute_breakdown(&widget_table(), &req).unwrap();
            assert_eq!(breakdown.ocean_freight, 0.0);
            assert_eq!(breakdown.land_freight, 0.0);
            assert_eq!(breakdown.total_landed_cost, 160.0);
        }
    }

    #[test]
    fn cfr_includes_ocean_but_not_land() {
        let breakdown =
            compute_breakdown(&widget_table(), &request(Incoterm::Cfr, false, false)).unwrap();
        assert_eq!(breakdown.ocean_freight, 300.0);
        assert_eq!(breakdown.land_freight, 0.0);
    }

    #[test]
    fn cpt_includes_land_but_not_ocean() {
        let breakdown =
            compute_breakdown(&widget_table(), &request(Incoterm::Cpt, false, false)).unwrap();
        assert_eq!(breakdown.ocean_freight, 0.0);
        assert_eq!(breakdown.land_freight, 250.0);
        assert_eq!(breakdown.total_landed_cost, 410.0);
    }

    #[test]
    fn optional_fees_follow_their_flags() {
        let with_sgs =
            compute_breakdown(&widget_table(), &request(Incoterm::Fob, false, true)).unwrap();
        assert_eq!(with_sgs.sgs_fee, 7.0);
        assert_eq!(with_sgs.cross_stuffing_fee, 0.0);

        let with_both =
            compute_breakdown(&widget_table(), &request(Incoterm::Fob, true, true)).unwrap();
        assert_eq!(with_both.sgs_fee, 7.0);
        assert_eq!(with_both.cross_stuffing_fee, 12.0);
    }

    #[test]
    fn total_matches_line_item_sum_for_every_combination() {
        for incoterm in Incoterm::ALL {
            for cross in [false, true] {
                for sgs in [false, true] {
                    let breakdown =
                        compute_breakdown(&widget_table(), &request(incoterm, cross, sgs))
                            .unwrap();
                    let sum: f64 = breakdown
                        .line_items()
                        .iter()
                        .map(|(_, amount)| amount)
                        .sum();
                    assert_eq!(breakdown.total_landed_cost, sum, "{incoterm:?}");
                }
            }
        }
    }

    #[test]
    fn unknown_product_is_not_found() {
        let err = compute_breakdown(&widget_table(), &{
            let mut req = request(Incoterm::Fob, false, false);
            req.product = "Gadget".to_string();
            req
        })
        .unwrap_err();
        assert_eq!(err, AggregationError::NotFound("Gadget".to_string()));
    }

    #[test]
    fn missing_destination_freight_is_a_distinct_error() {
        let mut row = widget_row();
        row.ocean_freight.remove(&Destination::MersinTr);
        let table = CostTable::new(vec![row]);

        let mut req = request(Incoterm::Cif, false, false);
        req.destination = Destination::MersinTr;
        let err = compute_breakdown(&table, &req).unwrap_err();
        assert!(matches!(err, AggregationError::MissingField { .. }));

        // FOB never touches the freight maps, so the same table still works.
        req.incoterm = Incoterm::Fob;
        assert!(compute_breakdown(&table, &req).is_ok());
    }

    #[test]
    fn duplicate_products_resolve_to_first_row() {
        let mut second = widget_row();
        second.base_cost = 999.0;
        let table = CostTable::new(vec![widget_row(), second]);
        let breakdown =
            compute_breakdown(&table, &request(Incoterm::Fob, false, false)).unwrap();
        assert_eq!(breakdown.base_cost, 100.0);
    }
}
