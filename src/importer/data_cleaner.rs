// ==========================================
// DURATA BI - Limpieza y coerción de celdas
// ==========================================
// Responsabilidad: TRIM / UPPER / NULL + coerción numérica y de fechas
// Política: fallo abierto, cada campo tiene un valor por defecto explícito
// ==========================================

use crate::importer::quotation_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{NaiveDate, NaiveDateTime};

// Formatos aceptados para FECHA, en orden de prueba
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%Y%m%d"];

pub struct DataCleaner;

impl DataCleaner {
    /// Interpretación estricta de un número (sin defecto)
    pub fn parse_number(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Indica si una celda presente sería anulada por coerce_amount
    pub fn is_amount_defect(&self, value: Option<&str>) -> bool {
        match self.normalize_null(value) {
            None => false,
            Some(v) => !matches!(self.parse_number(&v), Some(n) if n >= 0.0),
        }
    }
}

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn coerce_amount(&self, value: Option<&str>) -> f64 {
        value
            .and_then(|v| self.parse_number(v))
            .filter(|v| *v >= 0.0)
            .unwrap_or(0.0)
    }

    fn parse_year(&self, value: Option<&str>) -> Option<i32> {
        let number = self.parse_number(value?)?;
        if number.fract() != 0.0 || number < i32::MIN as f64 || number > i32::MAX as f64 {
            return None;
        }
        Some(number as i32)
    }

    fn parse_date(&self, value: Option<&str>) -> Option<NaiveDate> {
        let value = self.normalize_null(value)?;

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&value, format) {
                return Some(dt.date());
            }
        }
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&value, format).ok())
    }

    fn parse_days(&self, value: Option<&str>) -> Option<f64> {
        self.parse_number(value?)
    }

    fn clean_status(&self, value: Option<&str>) -> String {
        value
            .map(|v| self.clean_text(v, true))
            .unwrap_or_default()
    }

    fn is_awarded(&self, status: &str, marker: &str) -> bool {
        status.to_uppercase().contains(&marker.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  hola  ", false), "hola");
        assert_eq!(cleaner.clean_text("  adjudicada parcial ", true), "ADJUDICADA PARCIAL");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(Some("")), None);
        assert_eq!(cleaner.normalize_null(Some("  valor ")), Some("valor".to_string()));
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_coerce_amount_fail_open() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_amount(Some("1000")), 1000.0);
        assert_eq!(cleaner.coerce_amount(Some(" 2500.75 ")), 2500.75);
        assert_eq!(cleaner.coerce_amount(Some("N/A")), 0.0);
        assert_eq!(cleaner.coerce_amount(Some("-")), 0.0);
        assert_eq!(cleaner.coerce_amount(Some("")), 0.0);
        assert_eq!(cleaner.coerce_amount(Some("NaN")), 0.0);
        assert_eq!(cleaner.coerce_amount(Some("inf")), 0.0);
        assert_eq!(cleaner.coerce_amount(Some("-50")), 0.0);
        assert_eq!(cleaner.coerce_amount(None), 0.0);
    }

    #[test]
    fn test_is_amount_defect() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_amount_defect(Some("N/A")));
        assert!(cleaner.is_amount_defect(Some("-50")));
        assert!(!cleaner.is_amount_defect(Some("10")));
        assert!(!cleaner.is_amount_defect(Some("  ")));
        assert!(!cleaner.is_amount_defect(None));
    }

    #[test]
    fn test_parse_year() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_year(Some("2023")), Some(2023));
        assert_eq!(cleaner.parse_year(Some("2023.0")), Some(2023));
        assert_eq!(cleaner.parse_year(Some(" 2019 ")), Some(2019));
        assert_eq!(cleaner.parse_year(Some("2023.5")), None);
        assert_eq!(cleaner.parse_year(Some("dos mil")), None);
        assert_eq!(cleaner.parse_year(Some("")), None);
        assert_eq!(cleaner.parse_year(None), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(cleaner.parse_date(Some("2024-03-15")), Some(expected));
        assert_eq!(cleaner.parse_date(Some("2024-03-15 00:00:00")), Some(expected));
        assert_eq!(cleaner.parse_date(Some("15/03/2024")), Some(expected));
        assert_eq!(cleaner.parse_date(Some("20240315")), Some(expected));
        assert_eq!(cleaner.parse_date(Some("2024-03-15T08:30:00")), Some(expected));
    }

    #[test]
    fn test_parse_date_unparsable_is_none() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date(Some("pendiente")), None);
        assert_eq!(cleaner.parse_date(Some("2024-13-40")), None);
        assert_eq!(cleaner.parse_date(Some("")), None);
        assert_eq!(cleaner.parse_date(None), None);
    }

    #[test]
    fn test_parse_days() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_days(Some("12")), Some(12.0));
        assert_eq!(cleaner.parse_days(Some("N/A")), None);
        assert_eq!(cleaner.parse_days(None), None);
    }

    #[test]
    fn test_clean_status_and_awarded() {
        let cleaner = DataCleaner;
        let status = cleaner.clean_status(Some(" adjudicada parcial "));
        assert_eq!(status, "ADJUDICADA PARCIAL");
        assert!(cleaner.is_awarded(&status, "ADJUDICADA"));
        assert!(!cleaner.is_awarded("PENDIENTE", "ADJUDICADA"));
        assert_eq!(cleaner.clean_status(None), "");
        assert!(!cleaner.is_awarded("", "ADJUDICADA"));
    }

    #[test]
    fn test_is_awarded_idempotent() {
        let cleaner = DataCleaner;
        for raw in ["Adjudicada", "no adjudicada", "en proceso", "ADJUDICADA TOTAL"] {
            let status = cleaner.clean_status(Some(raw));
            let first = cleaner.is_awarded(&status, "ADJUDICADA");
            let again = cleaner.is_awarded(&cleaner.clean_status(Some(&status)), "ADJUDICADA");
            assert_eq!(first, again);
            assert_eq!(first, raw.to_uppercase().contains("ADJUDICADA"));
        }
    }
}
