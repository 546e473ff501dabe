// ==========================================
// DURATA BI - Filtro de la tabla canónica
// ==========================================
// Selección explícita (reemplaza el estado de los widgets de la página)
// Conjunción (AND) entre los conjuntos poblados
// ==========================================

use crate::domain::quotation::{CanonicalTable, QuotationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selección de filtros
///
/// - `years`, `preparers`, `months`: `None` = sin restricción,
///   `Some(vacío)` = no pasa ninguna fila.
/// - `clients`: vacío = sin restricción por cliente.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub years: Option<BTreeSet<i32>>,
    pub preparers: Option<BTreeSet<String>>,
    pub clients: BTreeSet<String>,
    pub months: Option<BTreeSet<String>>,
}

impl Selection {
    /// Selección sin restricciones
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Selecciona todos los valores presentes en la tabla.
    ///
    /// Los meses solo se pueblan cuando toda fila tiene MES;
    /// así el filtro resultante siempre es la identidad.
    pub fn all_values(table: &CanonicalTable) -> Self {
        let records = table.records();
        let months = if !records.is_empty() && records.iter().all(|r| r.month.is_some()) {
            Some(records.iter().filter_map(|r| r.month.clone()).collect())
        } else {
            None
        };

        Self {
            years: Some(records.iter().map(|r| r.year).collect()),
            preparers: Some(records.iter().map(|r| r.preparer.clone()).collect()),
            clients: records.iter().map(|r| r.client.clone()).collect(),
            months,
        }
    }

    pub fn with_years<I: IntoIterator<Item = i32>>(mut self, years: I) -> Self {
        self.years = Some(years.into_iter().collect());
        self
    }

    pub fn with_preparers<I, S>(mut self, preparers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preparers = Some(preparers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_clients<I, S>(mut self, clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clients = clients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_months<I, S>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.months = Some(months.into_iter().map(Into::into).collect());
        self
    }

    /// Indica si una fila pasa la selección
    pub fn matches(&self, record: &QuotationRecord) -> bool {
        if let Some(years) = &self.years {
            if !years.contains(&record.year) {
                return false;
            }
        }
        if let Some(preparers) = &self.preparers {
            if !preparers.contains(&record.preparer) {
                return false;
            }
        }
        if !self.clients.is_empty() && !self.clients.contains(&record.client) {
            return false;
        }
        if let Some(months) = &self.months {
            match &record.month {
                Some(month) if months.contains(month) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Aplica la selección; devuelve una tabla nueva (la original no cambia)
pub fn filter(table: &CanonicalTable, selection: &Selection) -> CanonicalTable {
    let records = table
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();
    table.derive(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(client: &str, preparer: &str, year: i32, month: Option<&str>) -> QuotationRecord {
        QuotationRecord {
            client: client.to_string(),
            date: None,
            preparer: preparer.to_string(),
            quote_number: String::new(),
            quoted_value: 0.0,
            awarded_value: 0.0,
            status: String::new(),
            is_awarded: false,
            year,
            month: month.map(str::to_string),
            days: None,
            extra: BTreeMap::new(),
        }
    }

    fn sample() -> CanonicalTable {
        CanonicalTable::from_records(vec![
            record("ACME", "ANA", 2023, Some("ENERO")),
            record("ACME", "LUIS", 2024, Some("MARZO")),
            record("BETA", "ANA", 2024, None),
            record("GAMMA", "", 2022, Some("ENERO")),
        ])
    }

    #[test]
    fn test_unrestricted_is_identity() {
        let table = sample();
        assert_eq!(filter(&table, &Selection::unrestricted()), table);
    }

    #[test]
    fn test_all_values_is_identity() {
        let table = sample();
        let selection = Selection::all_values(&table);
        assert!(selection.months.is_none()); // BETA no tiene mes
        assert_eq!(filter(&table, &selection), table);
    }

    #[test]
    fn test_empty_clients_means_no_restriction() {
        let table = sample();
        let selection = Selection::unrestricted().with_clients(Vec::<String>::new());
        assert_eq!(filter(&table, &selection).len(), table.len());
    }

    #[test]
    fn test_client_restriction() {
        let table = sample();
        let filtered = filter(&table, &Selection::unrestricted().with_clients(["ACME"]));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.records().iter().all(|r| r.client == "ACME"));
    }

    #[test]
    fn test_empty_year_set_filters_everything() {
        let table = sample();
        let filtered = filter(&table, &Selection::unrestricted().with_years(Vec::new()));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_conjunction_across_sets() {
        let table = sample();
        let selection = Selection::unrestricted()
            .with_years([2024])
            .with_preparers(["ANA"]);
        let filtered = filter(&table, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].client, "BETA");
    }

    #[test]
    fn test_month_restriction_excludes_rows_without_month() {
        let table = sample();
        let filtered = filter(&table, &Selection::unrestricted().with_months(["ENERO", "MARZO"]));
        assert_eq!(filtered.len(), 3);
        assert!(filtered.records().iter().all(|r| r.month.is_some()));
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let table = sample();
        let before = table.clone();
        let _ = filter(&table, &Selection::unrestricted().with_years([2023]));
        assert_eq!(table, before);
    }

    #[test]
    fn test_selection_deserializes_with_defaults() {
        let selection: Selection = serde_json::from_str(r#"{"years": [2023]}"#).unwrap();
        assert_eq!(selection.years, Some([2023].into_iter().collect()));
        assert!(selection.preparers.is_none());
        assert!(selection.clients.is_empty());
    }
}
