// ==========================================
// DURATA BI - Capa de dominio
// ==========================================
// Responsabilidad: entidades y tipos; sin lógica de carga ni de agregación
// ==========================================

pub mod quotation;
pub mod types;

// Reexportación de tipos principales
pub use quotation::{
    CanonicalTable, LoadReport, QuotationRecord, RawQuotationRecord, TableColumns,
};
pub use types::{compare_month_labels, Dimension, GroupKey, Metric, Month};
