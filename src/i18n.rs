// ==========================================
// Internacionalización (i18n)
// ==========================================
// rust-i18n: español (por defecto) e inglés
// El macro rust_i18n::i18n! se inicializa en lib.rs
// ==========================================

pub const DEFAULT_LOCALE: &str = "es";
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

/// Fija el idioma desde `DURATA_BI_LOCALE` (por defecto "es").
/// Valores no soportados caen al idioma por defecto.
pub fn init_from_env() {
    let requested = std::env::var("DURATA_BI_LOCALE").unwrap_or_default();
    let locale = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(requested.trim()))
        .unwrap_or(DEFAULT_LOCALE);
    set_locale(locale);
}

/// Idioma activo
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Cambia el idioma ("es" o "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Traduce una clave sin parámetros
///
/// # Ejemplo
/// ```no_run
/// use durata_bi::i18n::t;
/// let msg = t("kpi.quotations");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Traduce una clave reemplazando `%{nombre}` por cada argumento
///
/// # Ejemplo
/// ```no_run
/// use durata_bi::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/cotizaciones.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // El idioma es estado global y las pruebas corren en paralelo
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("es");
        assert_eq!(current_locale(), "es");
    }

    #[test]
    fn test_init_from_env() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        std::env::set_var("DURATA_BI_LOCALE", "EN");
        init_from_env();
        assert_eq!(current_locale(), "en");

        std::env::set_var("DURATA_BI_LOCALE", "fr");
        init_from_env();
        assert_eq!(current_locale(), DEFAULT_LOCALE);

        std::env::remove_var("DURATA_BI_LOCALE");
        init_from_env();
        assert_eq!(current_locale(), "es");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("es");
        assert_eq!(t("kpi.in_progress"), "En proceso");

        set_locale("en");
        assert_eq!(t("kpi.in_progress"), "In progress");

        set_locale("es");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("es");
        let msg = t_with_args("import.missing_columns", &[("columns", "AÑO, COTIZADA")]);
        assert_eq!(msg, "Faltan columnas obligatorias: AÑO, COTIZADA");

        set_locale("en");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/a.csv")]);
        assert!(msg.contains("/tmp/a.csv"));
        assert!(msg.contains("File not found"));

        set_locale("es");
    }
}
