// ==========================================
// DashboardApi - pruebas de integración
// ==========================================
// Objetivo: sesión completa (carga -> opciones -> vistas -> exportación)
// ==========================================


use durata_bi::api::{ApiError, DashboardApi};
use durata_bi::config::PipelineConfig;
use durata_bi::domain::{Dimension, GroupKey};
use durata_bi::engine::Selection;
use durata_bi::logging;
use test_helpers::{write_csv, write_sample_csv, MockConfig, QUOTATION_HEADER, SAMPLE_ROWS};

fn loaded_api() -> DashboardApi<PipelineConfig> {
    logging::init_test();
    let file = write_sample_csv().expect("no se pudo escribir el CSV");
    let mut api = DashboardApi::new(PipelineConfig::default());
    api.load_path(file.path()).expect("la carga debería funcionar");
    api
}

#[test]
fn test_load_report_is_kept_for_session() {
    let api = loaded_api();
    let report = api.last_report().expect("debería existir un reporte");
    assert_eq!(report.kept_rows, 6);
    assert_eq!(api.table().unwrap().load_id(), report.load_id);
    assert!(report
        .source_name
        .as_deref()
        .is_some_and(|name| name.ends_with(".csv")));
}

#[test]
fn test_filter_options() {
    let api = loaded_api();
    let options = api.filter_options().unwrap();
    assert_eq!(options.years, vec![2023, 2024, 2025]);
    assert_eq!(options.preparers, vec!["ANA", "LUIS", "MARTA"]);
    assert_eq!(options.top_clients[0], "ACME");
    assert_eq!(options.top_clients.len(), 4);
    assert_eq!(
        options.months,
        vec!["ENERO", "FEBRERO", "MARZO", "MAYO", "JUNIO"]
    );
}

#[test]
fn test_overview_unrestricted() {
    let api = loaded_api();
    let overview = api.overview(&Selection::unrestricted()).unwrap();

    assert_eq!(overview.kpis.quotations, 6);
    assert_eq!(overview.kpis.awarded, 3);
    assert_eq!(overview.kpis.conversion_pct, 50.0);
    assert_eq!(overview.kpis.quoted_value, 5_006_750.0);
    assert_eq!(overview.kpis.awarded_value, 4_001_750.0);
    assert_eq!(overview.kpis.avg_days, Some(6.4));
    assert_eq!(overview.funnel.in_progress, 3);

    let years: Vec<GroupKey> = overview.by_year.iter().map(|s| s.key.clone()).collect();
    assert_eq!(
        years,
        vec![GroupKey::Year(2023), GroupKey::Year(2024), GroupKey::Year(2025)]
    );
    assert_eq!(overview.by_year[1].conversion_pct, 33.3);
    assert_eq!(overview.by_month.as_ref().map(Vec::len), Some(5));

    assert_eq!(overview.top_clients_by_count[0].key.label(), "ACME");
    assert_eq!(overview.top_clients_by_count[0].quotations, 3);
    assert_eq!(overview.top_clients_by_value[0].key.label(), "BETA LTDA");
}

#[test]
fn test_overview_respects_selection() {
    let api = loaded_api();
    let selection = Selection::unrestricted()
        .with_preparers(["ANA"])
        .with_clients(["ACME"]);
    let overview = api.overview(&selection).unwrap();

    assert_eq!(overview.kpis.quotations, 2);
    assert_eq!(overview.kpis.awarded, 1);
    assert_eq!(overview.by_preparer.len(), 1);
}

#[test]
fn test_top_n_from_config() {
    let file = write_sample_csv().unwrap();
    let mut api = DashboardApi::new(MockConfig::with_top_n(2));
    api.load_path(file.path()).unwrap();

    let overview = api.overview(&Selection::unrestricted()).unwrap();
    assert_eq!(overview.top_clients_by_count.len(), 2);
    assert_eq!(overview.top_clients_by_value.len(), 2);
}

#[test]
fn test_group_and_search() {
    let api = loaded_api();
    let by_preparer = api
        .group(&Selection::unrestricted(), Dimension::Preparer)
        .unwrap();
    let labels: Vec<String> = by_preparer.iter().map(|s| s.key.label()).collect();
    assert_eq!(labels, vec!["ANA", "LUIS", "MARTA"]);

    let found = api.search_clients(&Selection::unrestricted(), "ltda").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].key.label(), "BETA LTDA");
}

#[test]
fn test_export_json_of_selection() {
    let api = loaded_api();
    let json = api
        .export_json(&Selection::unrestricted().with_years([2025]))
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["CLIENTE"], "DELTA");
}

#[test]
fn test_reload_replaces_session_table() {
    let mut api = loaded_api();
    let first_id = api.table().unwrap().load_id();

    let file = write_csv(QUOTATION_HEADER, &SAMPLE_ROWS.lines().take(2).collect::<Vec<_>>().join("\n"))
        .unwrap();
    api.load_path(file.path()).unwrap();

    let table = api.table().unwrap();
    assert_eq!(table.len(), 2);
    assert_ne!(table.load_id(), first_id);
}

#[test]
fn test_views_before_load_report_no_data() {
    let api = DashboardApi::new(PipelineConfig::default());
    assert!(matches!(
        api.group(&Selection::unrestricted(), Dimension::Year),
        Err(ApiError::NoData)
    ));
    assert!(matches!(
        api.export_json(&Selection::unrestricted()),
        Err(ApiError::NoData)
    ));
}

#[test]
fn test_unsupported_upload_is_rejected() {
    let mut api = DashboardApi::new(PipelineConfig::default());
    let err = api.load_bytes("cotizaciones.pdf", b"%PDF").unwrap_err();
    assert!(matches!(err, ApiError::Import(_)));
    assert!(api.table().is_err());
}
