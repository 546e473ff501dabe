// ==========================================
// DURATA BI - Mapeo de columnas
// ==========================================
// Etapa 1: normalizar encabezados -> tabla de renombre -> campos canónicos
// Columnas fuera de la tabla de renombre pasan sin cambios
// ==========================================

use crate::domain::quotation::RawQuotationRecord;
use crate::importer::quotation_importer_trait::FieldMapper as FieldMapperTrait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ==========================================
// Field - campo canónico
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    Client,
    Date,
    Preparer,
    QuoteNumber,
    QuotedValue,
    AwardedValue,
    Status,
    Year,
    Month,
    Days,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Client,
        Field::Date,
        Field::Preparer,
        Field::QuoteNumber,
        Field::QuotedValue,
        Field::AwardedValue,
        Field::Status,
        Field::Year,
        Field::Month,
        Field::Days,
    ];

    /// Encabezado de origen (ya normalizado)
    pub fn source_header(self) -> &'static str {
        match self {
            Field::Client => "NOMBRE O RAZON SOCIAL",
            Field::Date => "FECHA FINALIZACION",
            Field::Preparer => "NOMBRE COTIZADOR",
            Field::QuoteNumber => "NUMERO COTIZACION",
            Field::QuotedValue => "VALOR COTIZACIÓN ANTES DE IVA",
            Field::AwardedValue => "VALOR ADJUDICADO",
            Field::Status => "COTIZADA",
            Field::Year => "AÑO",
            Field::Month => "MES",
            Field::Days => "DIAS",
        }
    }

    /// Nombre canónico tras el renombre
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Client => "CLIENTE",
            Field::Date => "FECHA",
            Field::Preparer => "COTIZADOR",
            Field::QuoteNumber => "NUM_COT",
            Field::QuotedValue => "VALOR_COTIZADO",
            Field::AwardedValue => "VALOR_ADJUDICADO",
            Field::Status => "ESTADO",
            Field::Year => "AÑO",
            Field::Month => "MES",
            Field::Days => "DIAS",
        }
    }

    /// Columnas sobre las que opera la propia carga; su ausencia es fatal
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::Year | Field::Status | Field::QuotedValue | Field::AwardedValue
        )
    }

    /// Reconoce un encabezado normalizado (origen o nombre canónico)
    pub fn from_header(header: &str) -> Option<Field> {
        let upper = header.to_uppercase();
        Field::ALL
            .into_iter()
            .find(|f| f.source_header() == upper || f.canonical_name() == upper)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Normaliza un encabezado: sin BOM, saltos de línea como espacio,
/// espacios internos colapsados y extremos recortados
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Columnas calculadas por la carga; no existen como encabezado de origen
pub const DERIVED_COLUMNS: [&str; 1] = ["ES_ADJUDICADA"];

/// Sufijo para columnas de origen que chocan con un nombre calculado
pub const SOURCE_COPY_SUFFIX: &str = "_ORIGEN";

/// Nombre con que viaja una columna sin mapeo.
/// Si coincide con una columna calculada se le agrega el sufijo de origen,
/// así nunca pisa el valor calculado en la tabla exportada.
fn passthrough_name(header: &str) -> String {
    let upper = header.to_uppercase();
    if DERIVED_COLUMNS.contains(&upper.as_str()) {
        format!("{}{}", header, SOURCE_COPY_SUFFIX)
    } else {
        header.to_string()
    }
}

// ==========================================
// ColumnMapping - resultado del renombre
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    headers: Vec<String>,             // encabezados normalizados, en orden
    field_index: HashMap<Field, usize>, // campo canónico -> posición (primera aparición)
    passthrough: Vec<(String, usize)>, // columnas sin mapeo
}

impl ColumnMapping {
    pub fn from_headers(raw_headers: &[String]) -> Self {
        let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();

        let mut field_index = HashMap::new();
        let mut passthrough = Vec::new();
        let mut seen_passthrough = HashSet::new();

        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            match Field::from_header(header) {
                Some(field) => {
                    field_index.entry(field).or_insert(idx);
                }
                None => {
                    let name = passthrough_name(header);
                    if seen_passthrough.insert(name.clone()) {
                        passthrough.push((name, idx));
                    }
                }
            }
        }

        Self {
            headers,
            field_index,
            passthrough,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.field_index.get(&field).copied()
    }

    pub fn has(&self, field: Field) -> bool {
        self.field_index.contains_key(&field)
    }

    /// Encabezados de origen de las columnas obligatorias ausentes
    pub fn missing_required(&self) -> Vec<String> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && !self.has(*f))
            .map(|f| f.source_header().to_string())
            .collect()
    }

    pub fn passthrough_names(&self) -> Vec<String> {
        self.passthrough.iter().map(|(name, _)| name.clone()).collect()
    }
}

// ==========================================
// FieldMapper
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    fn cell(&self, mapping: &ColumnMapping, row: &[String], field: Field) -> Option<String> {
        mapping
            .index_of(field)
            .and_then(|idx| row.get(idx))
            .cloned()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_row(
        &self,
        mapping: &ColumnMapping,
        row: &[String],
        row_number: usize,
    ) -> RawQuotationRecord {
        let extra = mapping
            .passthrough
            .iter()
            .map(|(name, idx)| (name.clone(), row.get(*idx).cloned().unwrap_or_default()))
            .collect();

        RawQuotationRecord {
            client: self.cell(mapping, row, Field::Client),
            date: self.cell(mapping, row, Field::Date),
            preparer: self.cell(mapping, row, Field::Preparer),
            quote_number: self.cell(mapping, row, Field::QuoteNumber),
            quoted_value: self.cell(mapping, row, Field::QuotedValue),
            awarded_value: self.cell(mapping, row, Field::AwardedValue),
            status: self.cell(mapping, row, Field::Status),
            year: self.cell(mapping, row, Field::Year),
            month: self.cell(mapping, row, Field::Month),
            days: self.cell(mapping, row, Field::Days),
            extra,
            row_number,
        }
    }
}
