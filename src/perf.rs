use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static SLOW_OP_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

/// Umbral (ms) a partir del cual una operación se registra como lenta.
///
/// Se lee una vez de `DURATA_BI_SLOW_OP_MS`; por defecto 500 ms
/// (50 ms en compilaciones debug).
fn slow_threshold_ms() -> u64 {
    let cached = SLOW_OP_THRESHOLD_MS.load(Ordering::Relaxed);
    if cached > 0 {
        return cached;
    }

    let ms = std::env::var("DURATA_BI_SLOW_OP_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 500 });
    SLOW_OP_THRESHOLD_MS.store(ms, Ordering::Relaxed);
    ms
}

/// Guard de medición: registra elapsed_ms al salir del ámbito
///
/// Uso:
/// ```ignore
/// let _perf = durata_bi::perf::PerfGuard::new("load_sheet");
/// // trabajo...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        if elapsed_ms >= slow_threshold_ms() {
            tracing::warn!(target: "perf", op = self.op, elapsed_ms, "slow op");
        } else {
            tracing::debug!(target: "perf", op = self.op, elapsed_ms, "done");
        }
    }
}
