// ==========================================
// DURATA BI - Indicadores y embudo
// ==========================================
// KPIs de la tabla filtrada + embudo de conversión
// ==========================================

use crate::domain::quotation::CanonicalTable;
use crate::engine::aggregator::conversion_pct;
use crate::i18n::t;
use serde::{Deserialize, Serialize};

/// Totales de la selección actual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub quotations: usize,
    pub awarded: usize,
    pub conversion_pct: f64,
    pub quoted_value: f64,
    pub awarded_value: f64,
    /// Promedio de DIAS; `None` si ninguna fila trae el dato
    pub avg_days: Option<f64>,
}

/// Calcula los KPIs de una tabla (normalmente ya filtrada)
pub fn summarize(table: &CanonicalTable) -> KpiSummary {
    let records = table.records();
    let awarded = records.iter().filter(|r| r.is_awarded).count();
    let quoted_value = records.iter().map(|r| r.quoted_value).sum();
    let awarded_value = records.iter().map(|r| r.awarded_value).sum();

    let days: Vec<f64> = records.iter().filter_map(|r| r.days).collect();
    let avg_days = if days.is_empty() {
        None
    } else {
        Some(days.iter().sum::<f64>() / days.len() as f64)
    };

    KpiSummary {
        quotations: records.len(),
        awarded,
        conversion_pct: conversion_pct(awarded, records.len()),
        quoted_value,
        awarded_value,
        avg_days,
    }
}

/// Embudo: Cotizaciones -> En proceso -> Adjudicadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funnel {
    pub quoted: usize,
    pub in_progress: usize,
    pub awarded: usize,
}

/// Etapa del embudo lista para graficar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub label: String,
    pub value: usize,
}

impl Funnel {
    pub fn from_kpis(kpis: &KpiSummary) -> Self {
        Self {
            quoted: kpis.quotations,
            in_progress: kpis.quotations.saturating_sub(kpis.awarded),
            awarded: kpis.awarded,
        }
    }

    /// Etapas con etiquetas en el idioma activo
    pub fn stages(&self) -> Vec<FunnelStage> {
        vec![
            FunnelStage {
                label: t("kpi.quotations"),
                value: self.quoted,
            },
            FunnelStage {
                label: t("kpi.in_progress"),
                value: self.in_progress,
            },
            FunnelStage {
                label: t("kpi.awarded"),
                value: self.awarded,
            },
        ]
    }
}

/// Formato monetario compacto: `$1.2B`, `$3.4M` o `$1,234`
pub fn format_currency(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else {
        format!("${}", group_thousands(value.round()))
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotation::QuotationRecord;
    use std::collections::BTreeMap;

    fn record(awarded: bool, quoted: f64, days: Option<f64>) -> QuotationRecord {
        QuotationRecord {
            client: "ACME".to_string(),
            date: None,
            preparer: "ANA".to_string(),
            quote_number: String::new(),
            quoted_value: quoted,
            awarded_value: if awarded { quoted } else { 0.0 },
            status: String::new(),
            is_awarded: awarded,
            year: 2023,
            month: None,
            days,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_summarize() {
        let table = CanonicalTable::from_records(vec![
            record(true, 1000.0, Some(4.0)),
            record(false, 2000.0, None),
            record(false, 500.0, Some(8.0)),
        ]);
        let kpis = summarize(&table);
        assert_eq!(kpis.quotations, 3);
        assert_eq!(kpis.awarded, 1);
        assert_eq!(kpis.conversion_pct, 33.3);
        assert_eq!(kpis.quoted_value, 3500.0);
        assert_eq!(kpis.awarded_value, 1000.0);
        assert_eq!(kpis.avg_days, Some(6.0));
    }

    #[test]
    fn test_summarize_empty() {
        let kpis = summarize(&CanonicalTable::from_records(Vec::new()));
        assert_eq!(kpis.quotations, 0);
        assert_eq!(kpis.conversion_pct, 0.0);
        assert_eq!(kpis.avg_days, None);
    }

    #[test]
    fn test_funnel() {
        let table = CanonicalTable::from_records(vec![
            record(true, 1.0, None),
            record(false, 1.0, None),
            record(false, 1.0, None),
        ]);
        let funnel = Funnel::from_kpis(&summarize(&table));
        assert_eq!(funnel.quoted, 3);
        assert_eq!(funnel.in_progress, 2);
        assert_eq!(funnel.awarded, 1);

        let values: Vec<usize> = funnel.stages().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2_500_000_000.0), "$2.5B");
        assert_eq!(format_currency(3_400_000.0), "$3.4M");
        assert_eq!(format_currency(1234.4), "$1,234");
        assert_eq!(format_currency(999_999.0), "$999,999");
        assert_eq!(format_currency(12.0), "$12");
        assert_eq!(format_currency(0.0), "$0");
    }
}
