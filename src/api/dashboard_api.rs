// ==========================================
// DURATA BI - API del tablero
// ==========================================
// Una instancia = una sesión: conserva la última tabla cargada
// y expone las vistas (KPIs, embudo, agregaciones, búsqueda)
// sobre la selección de filtros que envía la presentación
// ==========================================

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ImportConfigReader, PipelineConfig};
use crate::domain::quotation::{CanonicalTable, LoadReport};
use crate::domain::types::{Dimension, Metric};
use crate::engine::aggregator::{group_by, search, top_n, DimensionSummary};
use crate::engine::filter::{filter, Selection};
use crate::engine::kpi::{summarize, Funnel, KpiSummary};
use crate::importer::{LoadOutcome, QuotationImporter, QuotationLoader};

/// Valores disponibles para los controles de filtro
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub preparers: Vec<String>,
    /// Clientes más frecuentes (el control no lista todos)
    pub top_clients: Vec<String>,
    /// Vacío si la planilla no trae MES
    pub months: Vec<String>,
}

/// Vista completa del tablero para una selección
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub kpis: KpiSummary,
    pub funnel: Funnel,
    pub by_year: Vec<DimensionSummary>,
    pub by_preparer: Vec<DimensionSummary>,
    pub by_month: Option<Vec<DimensionSummary>>,
    pub top_clients_by_count: Vec<DimensionSummary>,
    pub top_clients_by_value: Vec<DimensionSummary>,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi<C>
where
    C: ImportConfigReader,
{
    loader: QuotationLoader<C>,
    table: Option<Arc<CanonicalTable>>,
    last_report: Option<LoadReport>,
}

impl<C> DashboardApi<C>
where
    C: ImportConfigReader,
{
    pub fn new(config: C) -> Self {
        Self::with_loader(QuotationLoader::new(config))
    }

    pub fn with_loader(loader: QuotationLoader<C>) -> Self {
        Self {
            loader,
            table: None,
            last_report: None,
        }
    }

    // ==========================================
    // Carga
    // ==========================================

    /// Carga una planilla desde disco y reemplaza la tabla de la sesión.
    /// Si la carga falla, la tabla anterior se conserva.
    #[instrument(skip_all)]
    pub fn load_path<P: AsRef<Path>>(&mut self, file_path: P) -> ApiResult<LoadReport> {
        let outcome = self.loader.load_path(file_path).map_err(|e| {
            warn!(error = %e, "carga rechazada");
            ApiError::from(e)
        })?;
        Ok(self.install(outcome))
    }

    /// Carga un archivo subido (nombre + bytes) y reemplaza la tabla de la sesión
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub fn load_bytes(&mut self, file_name: &str, bytes: &[u8]) -> ApiResult<LoadReport> {
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("nombre de archivo vacío".to_string()));
        }
        let outcome = self.loader.load_bytes(file_name, bytes).map_err(|e| {
            warn!(error = %e, "carga rechazada");
            ApiError::from(e)
        })?;
        Ok(self.install(outcome))
    }

    fn install(&mut self, outcome: LoadOutcome) -> LoadReport {
        let LoadOutcome { table, report } = outcome;
        info!(
            load_id = %report.load_id,
            rows = table.len(),
            "tabla de sesión reemplazada"
        );
        self.table = Some(Arc::new(table));
        self.last_report = Some(report.clone());
        report
    }

    // ==========================================
    // Consultas
    // ==========================================

    /// Tabla canónica completa de la sesión
    pub fn table(&self) -> ApiResult<Arc<CanonicalTable>> {
        self.table.clone().ok_or(ApiError::NoData)
    }

    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    pub fn filter_options(&self) -> ApiResult<FilterOptions> {
        let table = self.table()?;
        Ok(FilterOptions {
            years: table.years(),
            preparers: table.preparers(),
            top_clients: table.top_clients(self.loader.config().top_clients_filter()),
            months: table.months(),
        })
    }

    /// KPIs, embudo y agregaciones de la selección
    #[instrument(skip_all)]
    pub fn overview(&self, selection: &Selection) -> ApiResult<DashboardOverview> {
        let table = self.table()?;
        let filtered = filter(&table, selection);
        debug!(rows = filtered.len(), "selección aplicada");

        let kpis = summarize(&filtered);
        let funnel = Funnel::from_kpis(&kpis);
        let by_client = group_by(&filtered, Dimension::Client);
        let top = self.loader.config().top_n_chart();

        Ok(DashboardOverview {
            funnel,
            by_year: group_by(&filtered, Dimension::Year),
            by_preparer: group_by(&filtered, Dimension::Preparer),
            by_month: filtered
                .has_month()
                .then(|| group_by(&filtered, Dimension::Month)),
            top_clients_by_count: top_n(&by_client, top, Metric::Quotations),
            top_clients_by_value: top_n(&by_client, top, Metric::QuotedValue),
            kpis,
        })
    }

    /// Agregación de la selección por una dimensión
    pub fn group(
        &self,
        selection: &Selection,
        dimension: Dimension,
    ) -> ApiResult<Vec<DimensionSummary>> {
        let table = self.table()?;
        if dimension == Dimension::Month && !table.has_month() {
            return Err(ApiError::InvalidInput(
                "la planilla no tiene columna MES".to_string(),
            ));
        }
        Ok(group_by(&filter(&table, selection), dimension))
    }

    /// Clientes de la selección cuyo nombre contiene `query`
    pub fn search_clients(
        &self,
        selection: &Selection,
        query: &str,
    ) -> ApiResult<Vec<DimensionSummary>> {
        let table = self.table()?;
        let by_client = group_by(&filter(&table, selection), Dimension::Client);
        Ok(search(&by_client, query))
    }

    /// Tabla filtrada como arreglo JSON (widget de exploración)
    pub fn export_json(&self, selection: &Selection) -> ApiResult<String> {
        let table = self.table()?;
        Ok(filter(&table, selection).to_json_records()?)
    }
}

impl DashboardApi<PipelineConfig> {
    /// Crea la sesión leyendo la configuración desde un archivo JSON
    pub fn from_config_file<P: AsRef<Path>>(config_path: P) -> ApiResult<Self> {
        let config = PipelineConfig::from_json_file(config_path)?;
        Ok(Self::new(config))
    }
}
