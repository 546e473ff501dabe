// ==========================================
// DURATA BI - Modelo de cotizaciones
// ==========================================
// Registro canónico (post-normalización) y tabla canónica inmutable
// Ciclo de vida: una tabla por archivo cargado, se descarta al cargar otro
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

use crate::domain::types::compare_month_labels;

// ==========================================
// QuotationRecord - registro canónico de cotización
// ==========================================
// Nombres serializados = nombres canónicos consumidos por la capa de presentación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationRecord {
    #[serde(rename = "CLIENTE")]
    pub client: String, // NOMBRE O RAZON SOCIAL (literal)

    #[serde(rename = "FECHA")]
    pub date: Option<NaiveDate>, // FECHA FINALIZACION (None si no se pudo interpretar)

    #[serde(rename = "COTIZADOR")]
    pub preparer: String, // NOMBRE COTIZADOR (recortado)

    #[serde(rename = "NUM_COT")]
    pub quote_number: String, // NUMERO COTIZACION

    #[serde(rename = "VALOR_COTIZADO")]
    pub quoted_value: f64, // siempre finito y >= 0

    #[serde(rename = "VALOR_ADJUDICADO")]
    pub awarded_value: f64, // siempre finito y >= 0

    #[serde(rename = "ESTADO")]
    pub status: String, // COTIZADA (recortado, mayúsculas)

    #[serde(rename = "ES_ADJUDICADA")]
    pub is_awarded: bool, // derivado de ESTADO

    #[serde(rename = "AÑO")]
    pub year: i32,

    #[serde(rename = "MES")]
    pub month: Option<String>,

    #[serde(rename = "DIAS")]
    pub days: Option<f64>,

    // Columnas sin mapeo (encabezado normalizado -> texto de celda)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

// ==========================================
// RawQuotationRecord - estructura intermedia de carga
// ==========================================
// Uso: archivo -> mapeo de columnas -> esta estructura -> limpieza
// Ciclo de vida: solo dentro de la carga
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuotationRecord {
    pub client: Option<String>,
    pub date: Option<String>,
    pub preparer: Option<String>,
    pub quote_number: Option<String>,
    pub quoted_value: Option<String>,
    pub awarded_value: Option<String>,
    pub status: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub days: Option<String>,
    pub extra: BTreeMap<String, String>,

    // Metadatos
    pub row_number: usize,
}

// ==========================================
// TableColumns - columnas opcionales presentes
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableColumns {
    pub has_month: bool,
    pub has_days: bool,
    pub passthrough: Vec<String>,
}

// ==========================================
// CanonicalTable - tabla canónica inmutable
// ==========================================
// Todo filtrado produce una tabla nueva; nunca se muta in situ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalTable {
    load_id: Uuid,
    source_name: Option<String>,
    columns: TableColumns,
    records: Vec<QuotationRecord>,
}

impl CanonicalTable {
    pub fn new(
        load_id: Uuid,
        source_name: Option<String>,
        columns: TableColumns,
        records: Vec<QuotationRecord>,
    ) -> Self {
        Self {
            load_id,
            source_name,
            columns,
            records,
        }
    }

    /// Construye una tabla a partir de registros ya canónicos,
    /// infiriendo las columnas opcionales de los valores presentes.
    pub fn from_records(records: Vec<QuotationRecord>) -> Self {
        let passthrough: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.extra.keys().cloned())
            .collect();
        let columns = TableColumns {
            has_month: records.iter().any(|r| r.month.is_some()),
            has_days: records.iter().any(|r| r.days.is_some()),
            passthrough: passthrough.into_iter().collect(),
        };
        Self::new(Uuid::new_v4(), None, columns, records)
    }

    /// Vista derivada: mismos metadatos, otro subconjunto de filas
    pub fn derive(&self, records: Vec<QuotationRecord>) -> Self {
        Self {
            load_id: self.load_id,
            source_name: self.source_name.clone(),
            columns: self.columns.clone(),
            records,
        }
    }

    pub fn load_id(&self) -> Uuid {
        self.load_id
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn columns(&self) -> &TableColumns {
        &self.columns
    }

    pub fn records(&self) -> &[QuotationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_month(&self) -> bool {
        self.columns.has_month
    }

    pub fn has_days(&self) -> bool {
        self.columns.has_days
    }

    // ==========================================
    // Opciones de filtro
    // ==========================================

    /// Años presentes, ascendente
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Cotizadores presentes (sin vacíos), ascendente
    pub fn preparers(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.preparer.as_str())
            .filter(|p| !p.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Clientes presentes, ascendente
    pub fn clients(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.client.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Los N clientes con más cotizaciones (empates: orden de aparición)
    pub fn top_clients(&self, n: usize) -> Vec<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, record) in self.records.iter().enumerate() {
            let entry = counts.entry(record.client.as_str()).or_insert((0, idx));
            entry.0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(client, (count, first_seen))| (client, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(n)
            .map(|(client, _, _)| client.to_string())
            .collect()
    }

    /// Meses presentes en orden canónico
    pub fn months(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.month.as_deref())
            .collect();
        let mut months: Vec<String> = set.into_iter().map(str::to_string).collect();
        months.sort_by(|a, b| compare_month_labels(a, b));
        months
    }

    /// Serializa la tabla como arreglo JSON de registros
    /// (entrega al widget de exploración)
    pub fn to_json_records(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}

// ==========================================
// LoadReport - resumen de una carga
// ==========================================
// Los defectos recuperables se cuentan aquí, nunca se propagan como error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub load_id: Uuid,
    pub source_name: Option<String>,
    pub total_rows: usize,                   // filas leídas (sin filas vacías)
    pub kept_rows: usize,                    // filas en la tabla canónica
    pub dropped_by_year: usize,              // año ausente, inválido o fuera de rango
    pub dropped_placeholder_preparer: usize, // cotizador = marcador "0"
    pub zeroed_amounts: usize,               // celdas de valor no numéricas -> 0
    pub nulled_dates: usize,                 // fechas no interpretables -> None
    pub passthrough_columns: Vec<String>,
    pub elapsed_ms: u64,
}
