// ==========================================
// DURATA BI - Cargador de cotizaciones
// ==========================================
// Flujo: lectura -> mapeo de columnas -> verificación de obligatorias
//        -> limpieza/coerción -> filtro de año y cotizador -> tabla canónica
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::quotation::{
    CanonicalTable, LoadReport, QuotationRecord, RawQuotationRecord, TableColumns,
};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{ColumnMapping, Field, FieldMapper};
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::quotation_importer_trait::{
    DataCleaner as _, FieldMapper as FieldMapperTrait, QuotationImporter,
};
use crate::perf::PerfGuard;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Resultado de una carga exitosa
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: CanonicalTable,
    pub report: LoadReport,
}

// ==========================================
// QuotationLoader
// ==========================================
pub struct QuotationLoader<C>
where
    C: ImportConfigReader,
{
    // Configuración
    config: C,

    // Etapas
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapperTrait>,
    data_cleaner: DataCleaner,
}

impl<C> QuotationLoader<C>
where
    C: ImportConfigReader,
{
    /// Crea un cargador con las etapas por defecto
    pub fn new(config: C) -> Self {
        Self::with_field_mapper(config, Box::new(FieldMapper))
    }

    /// Crea un cargador con un mapeador de columnas propio
    pub fn with_field_mapper(config: C, field_mapper: Box<dyn FieldMapperTrait>) -> Self {
        Self {
            config,
            file_parser: UniversalFileParser,
            field_mapper,
            data_cleaner: DataCleaner,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Convierte una hoja ya leída en la tabla canónica
    ///
    /// # Errores
    /// - MissingColumns: falta alguna columna obligatoria
    pub fn load_sheet(
        &self,
        sheet: RawSheet,
        source_name: Option<String>,
    ) -> ImportResult<LoadOutcome> {
        let _perf = PerfGuard::new("load_sheet");
        let start_time = Instant::now();
        let load_id = Uuid::new_v4();

        // === Paso 1: mapeo de columnas ===
        let mapping = ColumnMapping::from_headers(&sheet.headers);
        let missing = mapping.missing_required();
        if !missing.is_empty() {
            error!(missing = ?missing, "faltan columnas obligatorias");
            return Err(ImportError::MissingColumns(missing));
        }
        debug!(headers = ?mapping.headers(), "encabezados normalizados");

        let mut report = LoadReport {
            load_id,
            source_name: source_name.clone(),
            total_rows: sheet.rows.len(),
            passthrough_columns: mapping.passthrough_names(),
            ..LoadReport::default()
        };

        // === Paso 2: mapeo + limpieza por fila ===
        let mut records = Vec::with_capacity(sheet.rows.len());
        for (idx, row) in sheet.rows.iter().enumerate() {
            let raw = self.field_mapper.map_row(&mapping, row, idx + 1);
            if let Some(record) = self.build_record(raw, &mut report) {
                records.push(record);
            }
        }
        report.kept_rows = records.len();
        report.elapsed_ms = start_time.elapsed().as_millis() as u64;

        let columns = TableColumns {
            has_month: mapping.has(Field::Month),
            has_days: mapping.has(Field::Days),
            passthrough: report.passthrough_columns.clone(),
        };

        info!(
            load_id = %load_id,
            total = report.total_rows,
            kept = report.kept_rows,
            dropped_by_year = report.dropped_by_year,
            dropped_placeholder_preparer = report.dropped_placeholder_preparer,
            zeroed_amounts = report.zeroed_amounts,
            nulled_dates = report.nulled_dates,
            elapsed_ms = report.elapsed_ms,
            "carga de cotizaciones completada"
        );

        Ok(LoadOutcome {
            table: CanonicalTable::new(load_id, source_name, columns, records),
            report,
        })
    }

    /// Limpia una fila; None si la fila se descarta
    fn build_record(
        &self,
        raw: RawQuotationRecord,
        report: &mut LoadReport,
    ) -> Option<QuotationRecord> {
        let cleaner = &self.data_cleaner;

        // Año: ausente, inválido o fuera de rango -> fila descartada
        let year = match cleaner.parse_year(raw.year.as_deref()) {
            Some(year) if self.config.year_in_range(year) => year,
            _ => {
                debug!(row = raw.row_number, year = ?raw.year, "fila descartada por año");
                report.dropped_by_year += 1;
                return None;
            }
        };

        // Cotizador marcador "sin asignar" -> fila descartada
        let preparer = cleaner.clean_text(raw.preparer.as_deref().unwrap_or(""), false);
        if self.config.drop_placeholder_preparer()
            && preparer == self.config.preparer_placeholder()
        {
            debug!(row = raw.row_number, "fila descartada por cotizador sin asignar");
            report.dropped_placeholder_preparer += 1;
            return None;
        }

        // Valores: fallo abierto a 0
        for value in [&raw.quoted_value, &raw.awarded_value] {
            if cleaner.is_amount_defect(value.as_deref()) {
                report.zeroed_amounts += 1;
            }
        }
        let quoted_value = cleaner.coerce_amount(raw.quoted_value.as_deref());
        let awarded_value = cleaner.coerce_amount(raw.awarded_value.as_deref());

        // Fecha: fallo abierto a None
        let date = cleaner.parse_date(raw.date.as_deref());
        if date.is_none() && cleaner.normalize_null(raw.date.as_deref()).is_some() {
            report.nulled_dates += 1;
        }

        let status = cleaner.clean_status(raw.status.as_deref());
        let is_awarded = cleaner.is_awarded(&status, self.config.awarded_marker());

        Some(QuotationRecord {
            client: raw.client.unwrap_or_default(),
            date,
            preparer,
            quote_number: raw.quote_number.unwrap_or_default(),
            quoted_value,
            awarded_value,
            status,
            is_awarded,
            year,
            month: cleaner.normalize_null(raw.month.as_deref()),
            days: cleaner.parse_days(raw.days.as_deref()),
            extra: raw.extra,
        })
    }
}

impl<C> QuotationImporter for QuotationLoader<C>
where
    C: ImportConfigReader,
{
    #[instrument(skip_all)]
    fn load_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<LoadOutcome> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "inicio de carga");

        let sheet = self.file_parser.parse(path).map_err(|e| {
            error!(error = %e, "lectura de archivo fallida");
            e
        })?;

        let source_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        self.load_sheet(sheet, source_name)
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn load_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<LoadOutcome> {
        info!("inicio de carga");

        let sheet = self.file_parser.parse_bytes(file_name, bytes).map_err(|e| {
            error!(error = %e, "lectura de archivo fallida");
            e
        })?;

        self.load_sheet(sheet, Some(file_name.to_string()))
    }
}
