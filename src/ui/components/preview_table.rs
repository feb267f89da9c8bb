use dioxus::prelude::*;

use crate::ui::theme;

/// One loaded sheet row, condensed to the unconditional cost columns.
#[derive(Clone, PartialEq)]
pub struct PreviewRow {
    pub product: String,
    pub base_cost: f64,
    pub packaging_cost: f64,
    pub export_duty: f64,
    pub logistic_to_port: f64,
    pub thc_stuffing: f64,
    pub warehousing: f64,
    pub demurrage: f64,
}

#[component]
pub fn PreviewTable(rows: Vec<PreviewRow>, total_rows: usize) -> Element {
    let shown = rows.len();
    let is_empty = rows.is_empty();
    let footnote = if total_rows > shown {
        format!("Showing first {shown} of {total_rows} rows")
    } else {
        format!("{total_rows} rows")
    };
    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            header {
                class: "flex items-center justify-between border-b border-sky-900/40 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Sheet Preview" }
                span { class: "text-xs {theme::TEXT_MUTED}", "{footnote}" }
            }
            table {
                class: "min-w-full {theme::TABLE_DIVIDER} text-sm",
                thead {
                    class: "{theme::TABLE_HEADER} text-left tracking-wide",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Product" }
                        th { class: "px-4 py-3 font-medium text-right", "Base Cost" }
                        th { class: "px-4 py-3 font-medium text-right", "Packaging" }
                        th { class: "px-4 py-3 font-medium text-right", "Export Duty" }
                        th { class: "px-4 py-3 font-medium text-right", "To Port" }
                        th { class: "px-4 py-3 font-medium text-right", "THC + Stuffing" }
                        th { class: "px-4 py-3 font-medium text-right", "Warehousing" }
                        th { class: "px-4 py-3 font-medium text-right", "Demurrage" }
                    }
                }
                tbody {
                    class: "{theme::TABLE_DIVIDER}",
                    for row in rows {
                        tr {
                            class: "hover:bg-slate-800/40",
                            td { class: "px-4 py-3 font-medium text-slate-100", "{row.product}" }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.base_cost)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.packaging_cost)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.export_duty)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.logistic_to_port)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.thc_stuffing)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.warehousing)} }
                            td { class: "px-4 py-3 text-right {theme::TEXT_SECONDARY}", {format_amount(row.demurrage)} }
                        }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "px-4 py-6 text-center text-sm {theme::TEXT_MUTED}",
                                colspan: "8",
                                "Upload a cost sheet to see its rows here."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
