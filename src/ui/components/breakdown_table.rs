use dioxus::prelude::*;

use crate::domain::CostBreakdown;
use crate::ui::theme;

#[component]
pub fn BreakdownTable(breakdown: CostBreakdown) -> Element {
    let caption = format!(
        "{} → {} · {}",
        breakdown.product,
        breakdown.destination.label(),
        breakdown.incoterm.label()
    );
    let line_items = breakdown.line_items();
    let total = breakdown.total_landed_cost;

    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            header {
                class: "flex items-center justify-between border-b border-sky-900/40 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Cost Breakdown" }
                span { class: "text-xs {theme::TEXT_MUTED}", "{caption}" }
            }
            table {
                class: "min-w-full {theme::TABLE_DIVIDER} text-sm",
                thead {
                    class: "{theme::TABLE_HEADER} text-left tracking-wide",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Line Item" }
                        th { class: "px-4 py-3 font-medium text-right", "Amount" }
                    }
                }
                tbody {
                    class: "{theme::TABLE_DIVIDER}",
                    for (label, amount) in line_items {
                        tr {
                            class: "hover:bg-slate-800/40",
                            td { class: "px-4 py-3 {row_text(amount)}", "{label}" }
                            td { class: "px-4 py-3 text-right {row_text(amount)}", {format_amount(amount)} }
                        }
                    }
                    tr {
                        class: "border-t border-sky-500/40 bg-sky-950/30",
                        td { class: "px-4 py-3 font-semibold text-sky-200", "Total Landed Cost" }
                        td { class: "px-4 py-3 text-right text-lg font-semibold text-sky-200", {format_amount(total)} }
                    }
                }
            }
        }
    }
}

// Zeroed items stay in the table so every result has the same shape; they
// just read quieter.
fn row_text(amount: f64) -> &'static str {
    if amount == 0.0 {
        theme::TEXT_MUTED
    } else {
        theme::TEXT_SECONDARY
    }
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
