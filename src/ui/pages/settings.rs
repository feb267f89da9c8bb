use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, Selection},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::calculator::humanize_age,
        theme,
    },
    util::version::{check_for_update, version_label, APP_AUTHOR, APP_NAME, APP_REPO_URL},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let source = state.with(|st| st.source_name.clone());
    let loaded_age = state.with(|st| st.loaded_at.map(humanize_age));
    let row_count = state.with(|st| st.table.len());
    let update_status = use_signal(|| None::<String>);

    let on_clear_sheet = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.clear_sheet());
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cleared the loaded cost sheet.",
            );
        }
    };

    let on_reset_selection = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| {
                st.selection = Selection::default();
                st.last_breakdown = None;
            });
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Restored the default selection.",
            );
        }
    };

    let on_check_updates = {
        let update_status = update_status.clone();
        move |_| {
            let mut update_status = update_status.clone();
            update_status.set(Some("Checking for updates...".to_string()));
            spawn(async move {
                match check_for_update().await {
                    Ok(info) => update_status.set(Some(info.to_string())),
                    Err(err) => update_status.set(Some(format!("Update check failed: {err}"))),
                }
            });
        }
    };

    let current_label = version_label();
    let status = update_status();

    rsx! {
        div { class: "space-y-8",
            section {
                class: "{theme::PANEL} p-6",
                h2 { class: "{theme::SECTION_TITLE}", "Session Data" }
                if let Some(name) = source {
                    ul {
                        class: "mt-3 space-y-2 text-sm {theme::TEXT_SECONDARY}",
                        li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            span { "{name}" }
                            span { class: "text-xs {theme::TEXT_MUTED}",
                                if let Some(age) = loaded_age {
                                    "{row_count} rows · loaded {age}"
                                } else {
                                    "{row_count} rows"
                                }
                            }
                        }
                    }
                } else {
                    p { class: "mt-3 text-sm text-slate-400", "No cost sheet loaded this session." }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "{theme::BTN_GHOST}", onclick: on_clear_sheet, "Clear Loaded Sheet" }
                    button { class: "{theme::BTN_GHOST}", onclick: on_reset_selection, "Reset Selection" }
                }
                p { class: "mt-3 text-xs {theme::TEXT_MUTED}",
                    "The sheet lives in memory only; your product and route selection is what persists between launches."
                }
            }

            section {
                class: "{theme::PANEL} p-6",
                h2 { class: "{theme::SECTION_TITLE}", "Updates" }
                p { class: "mt-2 text-sm {theme::TEXT_SECONDARY}", "Current version: {current_label}" }
                if let Some(message) = status {
                    p { class: "mt-2 text-sm text-slate-400", "{message}" }
                }
                button { class: "mt-4 {theme::BTN_GHOST}", onclick: on_check_updates, "Check for Updates" }
            }

            section {
                class: "flex flex-col items-center gap-2 {theme::PANEL} p-6 text-center text-slate-400",
                h2 { class: "{theme::SECTION_TITLE}", "About" }
                p { class: "text-sm", "{APP_NAME}, a landed-cost calculator for export shipments." }
                p { class: "text-xs {theme::TEXT_MUTED}", "Maintained by {APP_AUTHOR}" }
                a {
                    href: APP_REPO_URL,
                    target: "_blank",
                    rel: "noreferrer",
                    class: "text-xs font-semibold uppercase tracking-wide text-sky-300 hover:text-sky-100",
                    "Source Repository"
                }
            }
        }
    }
}
