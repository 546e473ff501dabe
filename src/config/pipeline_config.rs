// ==========================================
// DURATA BI - Configuración del pipeline
// ==========================================
// Fuente: archivo JSON opcional; toda clave ausente toma su valor por defecto
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Claves del archivo de configuración
pub mod config_keys {
    pub const MIN_YEAR: &str = "min_year";
    pub const MAX_YEAR: &str = "max_year";
    pub const DROP_PLACEHOLDER_PREPARER: &str = "drop_placeholder_preparer";
    pub const PREPARER_PLACEHOLDER: &str = "preparer_placeholder";
    pub const AWARDED_MARKER: &str = "awarded_marker";
    pub const TOP_CLIENTS_FILTER: &str = "top_clients_filter";
    pub const TOP_N_CHART: &str = "top_n_chart";
}

/// Errores de configuración
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no se pudo leer la configuración: {0}")]
    Read(#[from] std::io::Error),

    #[error("configuración JSON inválida: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("valor de configuración inválido (clave: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_year: i32,
    pub max_year: i32,
    pub drop_placeholder_preparer: bool,
    pub preparer_placeholder: String,
    pub awarded_marker: String,
    pub top_clients_filter: usize,
    pub top_n_chart: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_year: 2019,
            max_year: 2026,
            drop_placeholder_preparer: true,
            preparer_placeholder: "0".to_string(),
            awarded_marker: "ADJUDICADA".to_string(),
            top_clients_filter: 30,
            top_n_chart: 15,
        }
    }
}

impl PipelineConfig {
    /// Lee la configuración desde texto JSON y la valida
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Lee la configuración desde un archivo JSON y la valida
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.as_ref().display(), "configuración cargada");
        Ok(config)
    }

    /// Valida coherencia de los valores
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvalidValue {
                key: config_keys::MIN_YEAR.to_string(),
                message: format!(
                    "min_year ({}) mayor que max_year ({})",
                    self.min_year, self.max_year
                ),
            });
        }
        if self.awarded_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::AWARDED_MARKER.to_string(),
                message: "el marcador no puede estar vacío".to_string(),
            });
        }
        if self.top_clients_filter == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::TOP_CLIENTS_FILTER.to_string(),
                message: "debe ser mayor que 0".to_string(),
            });
        }
        if self.top_n_chart == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::TOP_N_CHART.to_string(),
                message: "debe ser mayor que 0".to_string(),
            });
        }
        Ok(())
    }
}

impl ImportConfigReader for PipelineConfig {
    fn min_year(&self) -> i32 {
        self.min_year
    }

    fn max_year(&self) -> i32 {
        self.max_year
    }

    fn drop_placeholder_preparer(&self) -> bool {
        self.drop_placeholder_preparer
    }

    fn preparer_placeholder(&self) -> &str {
        &self.preparer_placeholder
    }

    fn awarded_marker(&self) -> &str {
        &self.awarded_marker
    }

    fn top_clients_filter(&self) -> usize {
        self.top_clients_filter
    }

    fn top_n_chart(&self) -> usize {
        self.top_n_chart
    }
}
