// ==========================================
// DURATA BI - Errores de la capa API
// ==========================================
// Convierte errores de carga/configuración en un único
// mensaje legible para el usuario (es / en)
// ==========================================

use crate::config::ConfigError;
use crate::i18n::{t, t_with_args};
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    /// Se pidió una vista antes de cargar una planilla
    #[error("no hay datos cargados")]
    NoData,

    #[error("carga fallida: {0}")]
    Import(#[from] ImportError),

    #[error("configuración inválida: {0}")]
    Config(#[from] ConfigError),

    #[error("error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Mensaje único para mostrar al usuario, en el idioma activo
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidInput(detail) => {
                t_with_args("api.invalid_input", &[("detail", detail)])
            }
            ApiError::NoData => t("api.no_data"),
            ApiError::Import(err) => import_message(err),
            ApiError::Config(err) => {
                t_with_args("api.invalid_config", &[("detail", &err.to_string())])
            }
            ApiError::Serialization(err) => {
                t_with_args("api.serialization", &[("detail", &err.to_string())])
            }
        }
    }
}

fn import_message(err: &ImportError) -> String {
    let key = err.message_key();
    match err {
        ImportError::FileNotFound(path) => t_with_args(key, &[("path", path)]),
        ImportError::MissingColumns(columns) => {
            t_with_args(key, &[("columns", &columns.join(", "))])
        }
        ImportError::UnsupportedFormat(detail)
        | ImportError::FileReadError(detail)
        | ImportError::ExcelParseError(detail)
        | ImportError::CsvParseError(detail) => t_with_args(key, &[("detail", detail)]),
        ImportError::NoWorksheet | ImportError::MissingHeaderRow => t(key),
    }
}

/// Alias de Result para la capa API
pub type ApiResult<T> = Result<T, ApiError>;
