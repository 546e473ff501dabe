// ==========================================
// DURATA BI - Agregación por dimensión
// ==========================================
// Por partición: Cotizaciones, Adjudicadas, Σ valor cotizado,
// Σ valor adjudicado, Conversión % (1 decimal; 0 si no hay filas)
// ==========================================

use crate::domain::quotation::{CanonicalTable, QuotationRecord};
use crate::domain::types::{compare_month_labels, Dimension, GroupKey, Metric};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Resumen de una partición
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub key: GroupKey,
    pub quotations: usize,   // Cotizaciones
    pub awarded: usize,      // Adjudicadas
    pub quoted_value: f64,   // Valor cotizado
    pub awarded_value: f64,  // Valor adjudicado
    pub conversion_pct: f64, // Conversión %
}

impl DimensionSummary {
    /// Valor de la métrica usada en rankings
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Quotations => self.quotations as f64,
            Metric::Awarded => self.awarded as f64,
            Metric::QuotedValue => self.quoted_value,
            Metric::AwardedValue => self.awarded_value,
            Metric::Conversion => self.conversion_pct,
        }
    }
}

/// Adjudicadas / Cotizaciones × 100, redondeado a un decimal
/// (mitades al par: 6.25 -> 6.2). Sin cotizaciones el resultado es 0.
pub fn conversion_pct(awarded: usize, quotations: usize) -> f64 {
    if quotations == 0 {
        return 0.0;
    }
    let pct = awarded as f64 / quotations as f64 * 100.0;
    (pct * 10.0).round_ties_even() / 10.0
}

#[derive(Default)]
struct Accumulator {
    quotations: usize,
    awarded: usize,
    quoted_value: f64,
    awarded_value: f64,
}

impl Accumulator {
    fn add(&mut self, record: &QuotationRecord) {
        self.quotations += 1;
        if record.is_awarded {
            self.awarded += 1;
        }
        self.quoted_value += record.quoted_value;
        self.awarded_value += record.awarded_value;
    }

    fn into_summary(self, key: GroupKey) -> DimensionSummary {
        DimensionSummary {
            key,
            quotations: self.quotations,
            awarded: self.awarded,
            quoted_value: self.quoted_value,
            awarded_value: self.awarded_value,
            conversion_pct: conversion_pct(self.awarded, self.quotations),
        }
    }
}

fn key_for(record: &QuotationRecord, dimension: Dimension) -> Option<GroupKey> {
    match dimension {
        Dimension::Year => Some(GroupKey::Year(record.year)),
        Dimension::Preparer => Some(GroupKey::Label(record.preparer.clone())),
        Dimension::Client => Some(GroupKey::Label(record.client.clone())),
        Dimension::Month => record.month.clone().map(GroupKey::Label),
    }
}

fn compare_keys(dimension: Dimension, a: &GroupKey, b: &GroupKey) -> Ordering {
    match (a, b) {
        (GroupKey::Year(x), GroupKey::Year(y)) => x.cmp(y),
        (GroupKey::Label(x), GroupKey::Label(y)) if dimension == Dimension::Month => {
            compare_month_labels(x, y)
        }
        (GroupKey::Label(x), GroupKey::Label(y)) => x.cmp(y),
        (GroupKey::Year(_), GroupKey::Label(_)) => Ordering::Less,
        (GroupKey::Label(_), GroupKey::Year(_)) => Ordering::Greater,
    }
}

/// Agrupa la tabla por una dimensión.
///
/// Orden: AÑO ascendente; COTIZADOR/CLIENTE por etiqueta; MES en orden de
/// calendario con las etiquetas no reconocidas al final. Las filas sin MES
/// no participan en la agrupación por mes.
pub fn group_by(table: &CanonicalTable, dimension: Dimension) -> Vec<DimensionSummary> {
    let mut groups: HashMap<GroupKey, Accumulator> = HashMap::new();
    for record in table.records() {
        if let Some(key) = key_for(record, dimension) {
            groups.entry(key).or_default().add(record);
        }
    }

    let mut summaries: Vec<DimensionSummary> = groups
        .into_iter()
        .map(|(key, acc)| acc.into_summary(key))
        .collect();
    summaries.sort_by(|a, b| compare_keys(dimension, &a.key, &b.key));
    summaries
}

/// Las N particiones con mayor métrica.
///
/// Orden estable: en empate se conserva el orden de entrada.
/// El reordenamiento ascendente para barras horizontales queda
/// a cargo de quien presenta.
pub fn top_n(summaries: &[DimensionSummary], n: usize, metric: Metric) -> Vec<DimensionSummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
    ranked.truncate(n);
    ranked
}

/// Particiones cuya etiqueta contiene el texto buscado (sin distinguir mayúsculas).
/// Búsqueda vacía -> sin resultados.
pub fn search(summaries: &[DimensionSummary], query: &str) -> Vec<DimensionSummary> {
    let needle = query.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }
    summaries
        .iter()
        .filter(|s| s.key.label().to_uppercase().contains(&needle))
        .cloned()
        .collect()
}
