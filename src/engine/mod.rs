// ==========================================
// DURATA BI - Capa de análisis
// ==========================================
// Funciones puras sobre la tabla canónica:
// filtro, agregación por dimensión, KPIs
// ==========================================

pub mod aggregator;
pub mod filter;
pub mod kpi;

pub use aggregator::{conversion_pct, group_by, search, top_n, DimensionSummary};
pub use filter::{filter, Selection};
pub use kpi::{format_currency, summarize, Funnel, FunnelStage, KpiSummary};
