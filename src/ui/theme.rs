//! Shared class strings so pages and components stay visually consistent.

pub const BTN_PRIMARY: &str =
    "rounded-lg bg-sky-500 px-4 py-2 text-sm font-semibold text-white hover:bg-sky-400";

pub const BTN_GHOST: &str =
    "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800";

pub const BTN_DOWNLOAD: &str =
    "rounded-lg border border-emerald-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-emerald-200 hover:bg-emerald-500/10";

pub const NAV_ACTIVE: &str =
    "min-w-[5.5rem] rounded-lg border border-sky-500/60 bg-sky-500/15 px-4 py-2 font-semibold text-sky-300";

pub const NAV_INACTIVE: &str =
    "min-w-[5.5rem] rounded-lg border border-slate-700 px-4 py-2 text-slate-400 transition hover:border-sky-700 hover:bg-sky-900/20 hover:text-sky-300";

pub const INPUT: &str =
    "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-sky-500 focus:outline-none";

pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";

pub const PANEL: &str = "rounded-xl border border-slate-800 bg-slate-900/40";

pub const TABLE_CONTAINER: &str =
    "rounded-xl border border-sky-900/40 bg-slate-900/40 overflow-hidden";

pub const TABLE_HEADER: &str =
    "border-b border-sky-900/40 bg-sky-950/30 text-xs uppercase text-sky-400/70";

pub const TABLE_DIVIDER: &str = "divide-y divide-sky-900/30";

pub const TEXT_SECONDARY: &str = "text-slate-300";

pub const TEXT_MUTED: &str = "text-slate-500";

pub const SECTION_TITLE: &str = "text-sm font-semibold uppercase tracking-wide text-slate-500";
