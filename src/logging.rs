// ==========================================
// Inicialización de logs
// ==========================================
// tracing + tracing-subscriber
// Nivel configurable por variable de entorno
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa los logs para la aplicación que embebe el pipeline
///
/// # Variables de entorno
/// - RUST_LOG: filtro de nivel (por defecto: info)
///   por ejemplo: RUST_LOG=debug o RUST_LOG=durata_bi=trace,perf=debug
///
/// # Ejemplo
/// ```no_run
/// use durata_bi::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Logs para pruebas: nivel debug, salida capturada por el runner
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
