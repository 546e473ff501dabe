// ==========================================
// DURATA BI - Biblioteca principal
// ==========================================
// Carga y agregación de cotizaciones comerciales
// Planilla (Excel/ODS/CSV) -> tabla canónica -> filtros, KPIs, rankings
// ==========================================

//! DURATA BI: carga y agregación de cotizaciones comerciales.
//!
//! # Idioma
//! Los mensajes para el usuario están en español e inglés. rust-i18n arranca
//! en su propio idioma por defecto ("en"), así que la aplicación que embebe
//! la biblioteca debe llamar una vez a [`i18n::init_from_env`] al iniciar
//! (español salvo que `DURATA_BI_LOCALE` indique otro) o a
//! [`i18n::set_locale`].
//!
//! ```no_run
//! durata_bi::logging::init();
//! durata_bi::i18n::init_from_env();
//! ```

// Inicializa la internacionalización
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// Declaración de módulos
// ==========================================

// Dominio - entidades y tipos
pub mod domain;

// Configuración - parámetros de carga y de vistas
pub mod config;

// Carga - planilla -> tabla canónica
pub mod importer;

// Análisis - filtro, agregación, KPIs
pub mod engine;

// API - fachada de sesión
pub mod api;

// Logs
pub mod logging;

// Medición de tiempos
pub mod perf;

// Internacionalización
pub mod i18n;

// ==========================================
// Reexportación de tipos principales
// ==========================================

pub use domain::{CanonicalTable, Dimension, GroupKey, LoadReport, Metric, QuotationRecord};

pub use config::{ImportConfigReader, PipelineConfig};

pub use importer::{ImportError, LoadOutcome, QuotationImporter, QuotationLoader};

pub use engine::{
    filter, format_currency, group_by, summarize, top_n, DimensionSummary, Funnel, KpiSummary,
    Selection,
};

pub use api::{ApiError, ApiResult, DashboardApi, DashboardOverview, FilterOptions};

// ==========================================
// Constantes
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "DURATA BI";
