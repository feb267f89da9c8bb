use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{compute_breakdown, AppState, CalculationRequest, CostBreakdown, Destination, Incoterm},
    infra::{export, loader},
    ui::{
        components::{
            breakdown_table::BreakdownTable,
            kpi_card::KpiCard,
            preview_table::{PreviewRow, PreviewTable},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

const PREVIEW_ROW_CAP: usize = 8;

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let source_name = state.with(|st| st.source_name.clone());
    let has_sheet = state.with(|st| st.has_sheet());
    let products = state.with(|st| st.table.products());
    let selection = state.with(|st| st.selection.clone());
    let breakdown = state.with(|st| st.last_breakdown.clone());
    let total_rows = state.with(|st| st.table.len());

    let preview_rows: Vec<PreviewRow> = state.with(|st| {
        st.table
            .rows()
            .iter()
            .take(PREVIEW_ROW_CAP)
            .map(|row| PreviewRow {
                product: row.product.clone(),
                base_cost: row.base_cost,
                packaging_cost: row.packaging_cost,
                export_duty: row.export_duty,
                logistic_to_port: row.logistic_to_port,
                thc_stuffing: row.thc_stuffing,
                warehousing: row.warehousing,
                demurrage: row.demurrage,
            })
            .collect()
    });

    let on_upload = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            let mut state = state.clone();
            let toasts = toasts.clone();
            async move {
                let Some(file) = evt.files().into_iter().next() else {
                    return;
                };
                let name = file.name();
                let Ok(bytes) = file.read_bytes().await else {
                    push_toast(toasts, ToastKind::Error, format!("Could not read {name}."));
                    return;
                };
                match loader::load_cost_table(&name, &bytes) {
                    Ok(table) => {
                        let rows = table.len();
                        let products = table.products().len();
                        state.with_mut(|st| st.replace_sheet(table, name.clone()));
                        push_toast(
                            toasts,
                            ToastKind::Success,
                            format!("Loaded {name}: {rows} rows, {products} products."),
                        );
                    }
                    Err(err) => {
                        push_toast(toasts, ToastKind::Error, format!("Failed to load {name}: {err}"));
                    }
                }
            }
        }
    };

    let on_product_change = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            state.with_mut(|st| {
                st.selection.product = if value.is_empty() { None } else { Some(value) };
            });
            persist_user_state(&state);
        }
    };

    let on_destination_change = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            if let Some(dest) = Destination::from_label(&evt.value()) {
                state.with_mut(|st| st.selection.destination = dest);
                persist_user_state(&state);
            }
        }
    };

    let on_incoterm_change = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            if let Some(term) = Incoterm::from_label(&evt.value()) {
                state.with_mut(|st| st.selection.incoterm = term);
                persist_user_state(&state);
            }
        }
    };

    let on_toggle_cross = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            state.with_mut(|st| st.selection.include_cross_stuffing = evt.checked());
            persist_user_state(&state);
        }
    };

    let on_toggle_sgs = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            state.with_mut(|st| st.selection.include_sgs = evt.checked());
            persist_user_state(&state);
        }
    };

    let on_calculate = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let selection = state.with(|st| st.selection.clone());
            let Some(product) = selection.product.filter(|name| !name.is_empty()) else {
                push_toast(toasts.clone(), ToastKind::Warning, "Pick a product first.");
                return;
            };
            let request = CalculationRequest {
                product,
                destination: selection.destination,
                incoterm: selection.incoterm,
                include_cross_stuffing: selection.include_cross_stuffing,
                include_sgs: selection.include_sgs,
            };

            let result = state.with(|st| compute_breakdown(&st.table, &request));
            match result {
                Ok(resolved) => {
                    let total = resolved.total_landed_cost;
                    state.with_mut(|st| st.last_breakdown = Some(resolved));
                    persist_user_state(&state);
                    push_toast(
                        toasts.clone(),
                        ToastKind::Success,
                        format!(
                            "Landed cost for {} to {} ({}): {total:.2}",
                            request.product,
                            request.destination.label(),
                            request.incoterm.label(),
                        ),
                    );
                }
                Err(err) => {
                    // No output record on failure; the message is the result.
                    state.with_mut(|st| st.last_breakdown = None);
                    push_toast(toasts.clone(), ToastKind::Error, err.to_string());
                }
            }
        }
    };

    let on_download = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let Some(resolved) = state.with(|st| st.last_breakdown.clone()) else {
                return;
            };
            match export::export_breakdown(&resolved) {
                Ok(path) => push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("Saved breakdown to {}", path.display()),
                ),
                Err(err) => push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Export failed: {err}"),
                ),
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "{theme::PANEL} px-4 py-4",
                div { class: "flex flex-wrap items-end gap-4",
                    div { class: "flex-1 min-w-[240px]",
                        label { class: "{theme::LABEL}", "Cost Sheet" }
                        input {
                            class: "{theme::INPUT} file:mr-3 file:rounded-md file:border-0 file:bg-sky-500 file:px-3 file:py-1 file:text-xs file:font-semibold file:text-white",
                            r#type: "file",
                            accept: ".xlsx,.csv",
                            onchange: on_upload,
                        }
                    }
                    if let Some(name) = source_name {
                        p { class: "text-xs {theme::TEXT_MUTED}", "Loaded: {name}" }
                    }
                }
                p { class: "mt-2 text-xs {theme::TEXT_MUTED}",
                    "One row per product, with the standard cost columns and per-destination freight columns."
                }
            }

            if has_sheet {
                form {
                    class: "flex flex-wrap items-end gap-4 {theme::PANEL} px-4 py-4",
                    onsubmit: on_calculate,
                    div { class: "flex-1 min-w-[200px]",
                        label { class: "{theme::LABEL}", "Product" }
                        select {
                            class: "{theme::INPUT}",
                            onchange: on_product_change,
                            option {
                                value: "",
                                selected: selection.product.is_none(),
                                "Select a product"
                            }
                            for product in products {
                                option {
                                    value: "{product}",
                                    selected: selection.product.as_deref() == Some(product.as_str()),
                                    "{product}"
                                }
                            }
                        }
                    }
                    div { class: "w-44",
                        label { class: "{theme::LABEL}", "Destination" }
                        select {
                            class: "{theme::INPUT}",
                            onchange: on_destination_change,
                            for dest in Destination::ALL {
                                option {
                                    value: dest.label(),
                                    selected: selection.destination == dest,
                                    {dest.label()}
                                }
                            }
                        }
                    }
                    div { class: "w-28",
                        label { class: "{theme::LABEL}", "Incoterm" }
                        select {
                            class: "{theme::INPUT}",
                            onchange: on_incoterm_change,
                            for term in Incoterm::ALL {
                                option {
                                    value: term.label(),
                                    selected: selection.incoterm == term,
                                    {term.label()}
                                }
                            }
                        }
                    }
                    div { class: "flex flex-col gap-2 pb-1",
                        label { class: "flex items-center gap-2 text-sm {theme::TEXT_SECONDARY}",
                            input {
                                r#type: "checkbox",
                                class: "h-4 w-4 accent-sky-500",
                                checked: selection.include_cross_stuffing,
                                onchange: on_toggle_cross,
                            }
                            "Include Cross Stuffing Fee"
                        }
                        label { class: "flex items-center gap-2 text-sm {theme::TEXT_SECONDARY}",
                            input {
                                r#type: "checkbox",
                                class: "h-4 w-4 accent-sky-500",
                                checked: selection.include_sgs,
                                onchange: on_toggle_sgs,
                            }
                            "Include SGS Fee"
                        }
                    }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        r#type: "submit",
                        "Calculate Cost"
                    }
                }
            }

            if let Some(ref resolved) = breakdown {
                section {
                    class: "grid gap-4 sm:grid-cols-3",
                    KpiCard {
                        title: "Total Landed Cost".to_string(),
                        value: format!("{:.2}", resolved.total_landed_cost),
                        description: Some(format!(
                            "{} · {}",
                            resolved.destination.label(),
                            resolved.incoterm.label()
                        )),
                    }
                    {
                        let (value, caption) = freight_summary(resolved);
                        rsx! {
                            KpiCard {
                                title: "Freight Included".to_string(),
                                value,
                                description: Some(caption),
                            }
                        }
                    }
                    {
                        let (value, caption) = optional_fee_summary(resolved);
                        rsx! {
                            KpiCard {
                                title: "Optional Fees".to_string(),
                                value,
                                description: Some(caption),
                            }
                        }
                    }
                }

                section {
                    class: "space-y-4",
                    BreakdownTable { breakdown: resolved.clone() }
                    div { class: "flex justify-end",
                        button {
                            class: "{theme::BTN_DOWNLOAD}",
                            onclick: on_download,
                            "Download Cost Breakdown"
                        }
                    }
                }
            }

            if has_sheet {
                section {
                    PreviewTable { rows: preview_rows, total_rows }
                }
            }
        }
    }
}

fn freight_summary(breakdown: &CostBreakdown) -> (String, String) {
    match breakdown.incoterm {
        Incoterm::Fob => (
            "None".to_string(),
            "FOB ends at export and port handling".to_string(),
        ),
        Incoterm::Cif | Incoterm::Cfr => (
            format!("{:.2}", breakdown.ocean_freight),
            format!("Ocean freight to {}", breakdown.destination.label()),
        ),
        Incoterm::Cpt => (
            format!("{:.2}", breakdown.land_freight),
            format!("Land freight to {}", breakdown.destination.label()),
        ),
    }
}

fn optional_fee_summary(breakdown: &CostBreakdown) -> (String, String) {
    let mut included = Vec::new();
    if breakdown.cross_stuffing_fee > 0.0 {
        included.push("Cross Stuffing");
    }
    if breakdown.sgs_fee > 0.0 {
        included.push("SGS");
    }
    let amount = breakdown.cross_stuffing_fee + breakdown.sgs_fee;
    if included.is_empty() {
        ("0.00".to_string(), "No optional fees selected".to_string())
    } else {
        (format!("{amount:.2}"), included.join(" + "))
    }
}

pub fn humanize_age(updated_at: std::time::SystemTime) -> String {
    use std::time::SystemTime;

    let now = SystemTime::now();
    let age = now.duration_since(updated_at).unwrap_or_default().as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}
