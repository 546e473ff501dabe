// ==========================================
// DURATA BI - Trait de lectura de configuración de carga
// ==========================================
// Usado por: QuotationLoader, DashboardApi
// Implementaciones: PipelineConfig (archivo JSON / valores por defecto)
// ==========================================

/// Lectura de parámetros de la carga y de las vistas del tablero
pub trait ImportConfigReader: Send + Sync {
    /// Año mínimo admitido (inclusive)
    ///
    /// # Valor por defecto
    /// - 2019
    fn min_year(&self) -> i32;

    /// Año máximo admitido (inclusive)
    ///
    /// # Valor por defecto
    /// - 2026
    fn max_year(&self) -> i32;

    /// Si se descartan las filas cuyo cotizador es el marcador de "sin asignar"
    ///
    /// # Valor por defecto
    /// - true
    fn drop_placeholder_preparer(&self) -> bool;

    /// Marcador de cotizador sin asignar
    ///
    /// # Valor por defecto
    /// - "0"
    fn preparer_placeholder(&self) -> &str;

    /// Subcadena de ESTADO que marca una cotización adjudicada
    ///
    /// # Valor por defecto
    /// - "ADJUDICADA"
    fn awarded_marker(&self) -> &str;

    /// Número de clientes ofrecidos en el filtro de clientes
    ///
    /// # Valor por defecto
    /// - 30
    fn top_clients_filter(&self) -> usize;

    /// Número de particiones en las vistas Top-N
    ///
    /// # Valor por defecto
    /// - 15
    fn top_n_chart(&self) -> usize;

    /// Indica si un año cae dentro del rango admitido
    fn year_in_range(&self, year: i32) -> bool {
        (self.min_year()..=self.max_year()).contains(&year)
    }
}
