// ==========================================
// DURATA BI - Capa de configuración
// ==========================================
// Responsabilidad: parámetros de carga y de vistas, con valores por defecto
// ==========================================

pub mod import_config_trait;
pub mod pipeline_config;

pub use import_config_trait::ImportConfigReader;
pub use pipeline_config::{config_keys, ConfigError, PipelineConfig};
