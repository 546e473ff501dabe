// ==========================================
// DURATA BI - Traits de la carga de cotizaciones
// ==========================================
// Responsabilidad: interfaces de cada etapa (sin implementación)
// Etapas: lectura -> mapeo de columnas -> limpieza/coerción -> filtrado
// ==========================================

use crate::domain::quotation::RawQuotationRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ColumnMapping;
use crate::importer::file_parser::RawSheet;
use crate::importer::quotation_loader::LoadOutcome;
use chrono::NaiveDate;
use std::path::Path;

// ==========================================
// QuotationImporter Trait
// ==========================================
// Implementación: QuotationLoader
pub trait QuotationImporter {
    /// Carga una planilla desde disco
    ///
    /// # Retorno
    /// - Ok(LoadOutcome): tabla canónica + resumen de la carga
    /// - Err: archivo ilegible o columna obligatoria ausente
    fn load_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<LoadOutcome>;

    /// Carga una planilla recibida como bytes (archivo subido)
    ///
    /// # Parámetros
    /// - file_name: nombre original, su extensión decide el formato
    /// - bytes: contenido del archivo
    fn load_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<LoadOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// Implementaciones: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// Lee un archivo a encabezados + filas de texto
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet>;

    /// Lee un contenido en memoria a encabezados + filas de texto
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// Implementación: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// Proyecta una fila posicional sobre los campos canónicos
    ///
    /// # Parámetros
    /// - mapping: resultado de normalizar y renombrar los encabezados
    /// - row: celdas de la fila, en el orden de los encabezados
    /// - row_number: número de fila (1 = primera fila de datos)
    fn map_row(
        &self,
        mapping: &ColumnMapping,
        row: &[String],
        row_number: usize,
    ) -> RawQuotationRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// Política de fallo abierto: ninguna función de este trait falla.
// Cada una devuelve su valor por defecto documentado.
pub trait DataCleaner: Send + Sync {
    /// TRIM (+ UPPER opcional)
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// Cadena vacía / solo espacios -> None
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// Valor monetario.
    ///
    /// # Defecto
    /// - 0.0 si la celda falta, no es numérica, no es finita o es negativa
    fn coerce_amount(&self, value: Option<&str>) -> f64;

    /// Año entero.
    ///
    /// # Defecto
    /// - None si falta, no es numérico o no es entero (la fila se descarta)
    fn parse_year(&self, value: Option<&str>) -> Option<i32>;

    /// Fecha de finalización.
    ///
    /// # Defecto
    /// - None si falta o ningún formato conocido la interpreta
    fn parse_date(&self, value: Option<&str>) -> Option<NaiveDate>;

    /// Días de respuesta.
    ///
    /// # Defecto
    /// - None si falta o no es numérico
    fn parse_days(&self, value: Option<&str>) -> Option<f64>;

    /// ESTADO: TRIM + UPPER; celda ausente -> ""
    fn clean_status(&self, value: Option<&str>) -> String;

    /// ES_ADJUDICADA: el estado contiene el marcador
    fn is_awarded(&self, status: &str, marker: &str) -> bool;
}
