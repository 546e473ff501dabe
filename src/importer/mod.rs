// ==========================================
// DURATA BI - Capa de carga
// ==========================================
// Responsabilidad: planilla subida -> tabla canónica de cotizaciones
// Soporta: Excel, ODS, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod quotation_importer_trait;
pub mod quotation_loader;

// Reexportación de tipos principales
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{normalize_header, ColumnMapping, Field, FieldMapper as FieldMapperImpl};
pub use file_parser::{CsvParser, ExcelParser, RawSheet, UniversalFileParser};
pub use quotation_loader::{LoadOutcome, QuotationLoader};

// Reexportación de traits
pub use quotation_importer_trait::{DataCleaner, FieldMapper, FileParser, QuotationImporter};
