// ==========================================
// DURATA BI - Tipos del dominio
// ==========================================
// Dimensiones de agrupación, métricas de ranking y orden canónico de meses
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// Mes (Month)
// ==========================================
// Secuencia canónica en el idioma de origen (ENERO..DICIEMBRE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Month {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Enero,
        Month::Febrero,
        Month::Marzo,
        Month::Abril,
        Month::Mayo,
        Month::Junio,
        Month::Julio,
        Month::Agosto,
        Month::Septiembre,
        Month::Octubre,
        Month::Noviembre,
        Month::Diciembre,
    ];

    /// Reconoce una etiqueta de mes (sin distinguir mayúsculas).
    ///
    /// Devuelve None para etiquetas fuera de la secuencia canónica.
    pub fn parse(label: &str) -> Option<Month> {
        let upper = label.trim().to_uppercase();
        let month = match upper.as_str() {
            "ENERO" => Month::Enero,
            "FEBRERO" => Month::Febrero,
            "MARZO" => Month::Marzo,
            "ABRIL" => Month::Abril,
            "MAYO" => Month::Mayo,
            "JUNIO" => Month::Junio,
            "JULIO" => Month::Julio,
            "AGOSTO" => Month::Agosto,
            "SEPTIEMBRE" | "SETIEMBRE" => Month::Septiembre,
            "OCTUBRE" => Month::Octubre,
            "NOVIEMBRE" => Month::Noviembre,
            "DICIEMBRE" => Month::Diciembre,
            _ => return None,
        };
        Some(month)
    }

    /// Número de mes (1-12)
    pub fn number(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Month::Enero => "ENERO",
            Month::Febrero => "FEBRERO",
            Month::Marzo => "MARZO",
            Month::Abril => "ABRIL",
            Month::Mayo => "MAYO",
            Month::Junio => "JUNIO",
            Month::Julio => "JULIO",
            Month::Agosto => "AGOSTO",
            Month::Septiembre => "SEPTIEMBRE",
            Month::Octubre => "OCTUBRE",
            Month::Noviembre => "NOVIEMBRE",
            Month::Diciembre => "DICIEMBRE",
        };
        write!(f, "{}", name)
    }
}

/// Compara etiquetas de mes: primero las canónicas en orden de calendario,
/// después las no reconocidas en orden alfabético.
pub fn compare_month_labels(a: &str, b: &str) -> Ordering {
    match (Month::parse(a), Month::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// ==========================================
// Dimensión de agrupación (Dimension)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Year,     // AÑO
    Preparer, // COTIZADOR
    Client,   // CLIENTE
    Month,    // MES
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Year => write!(f, "AÑO"),
            Dimension::Preparer => write!(f, "COTIZADOR"),
            Dimension::Client => write!(f, "CLIENTE"),
            Dimension::Month => write!(f, "MES"),
        }
    }
}

// ==========================================
// Métrica de ranking (Metric)
// ==========================================
// Usada por las vistas Top-N
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    Quotations,   // Cotizaciones
    Awarded,      // Adjudicadas
    QuotedValue,  // Valor cotizado
    AwardedValue, // Valor adjudicado
    Conversion,   // Conversión %
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Quotations => write!(f, "QUOTATIONS"),
            Metric::Awarded => write!(f, "AWARDED"),
            Metric::QuotedValue => write!(f, "QUOTED_VALUE"),
            Metric::AwardedValue => write!(f, "AWARDED_VALUE"),
            Metric::Conversion => write!(f, "CONVERSION"),
        }
    }
}

// ==========================================
// Clave de partición (GroupKey)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Year(i32),
    Label(String),
}

impl GroupKey {
    /// Etiqueta textual de la clave
    pub fn label(&self) -> String {
        match self {
            GroupKey::Year(year) => year.to_string(),
            GroupKey::Label(label) => label.clone(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(year) => write!(f, "{}", year),
            GroupKey::Label(label) => write!(f, "{}", label),
        }
    }
}
