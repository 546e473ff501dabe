// ==========================================
// DURATA BI - Capa API
// ==========================================
// Fachada de sesión para la capa de presentación
// ==========================================

pub mod dashboard_api;
pub mod error;

pub use dashboard_api::{DashboardApi, DashboardOverview, FilterOptions};
pub use error::{ApiError, ApiResult};
