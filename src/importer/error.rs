// ==========================================
// DURATA BI - Errores de la carga
// ==========================================
// Solo errores fatales: archivo ilegible o columna obligatoria ausente.
// Los defectos de celda se absorben en DataCleaner (ver LoadReport)
// ==========================================

use thiserror::Error;

/// Errores fatales de carga; la tabla se descarta
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Archivo =====
    #[error("archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("formato no soportado: {0} (solo .xlsx/.xlsm/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("error de lectura del archivo: {0}")]
    FileReadError(String),

    #[error("error al interpretar Excel: {0}")]
    ExcelParseError(String),

    #[error("error al interpretar CSV: {0}")]
    CsvParseError(String),

    #[error("el libro no tiene hojas")]
    NoWorksheet,

    #[error("la hoja no tiene fila de encabezados")]
    MissingHeaderRow,

    // ===== Columnas =====
    #[error("faltan columnas obligatorias: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl ImportError {
    /// Clave i18n del mensaje para el usuario
    pub fn message_key(&self) -> &'static str {
        match self {
            ImportError::FileNotFound(_) => "import.file_not_found",
            ImportError::UnsupportedFormat(_) => "import.unsupported_format",
            ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_) => "import.unreadable",
            ImportError::NoWorksheet | ImportError::MissingHeaderRow => "import.empty_file",
            ImportError::MissingColumns(_) => "import.missing_columns",
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Alias de Result para la carga
pub type ImportResult<T> = Result<T, ImportError>;
