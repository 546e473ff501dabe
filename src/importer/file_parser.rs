// ==========================================
// DURATA BI - Lectura de archivos
// ==========================================
// Etapa 0: archivo -> encabezados + filas de texto
// Soporta: Excel (.xlsx/.xlsm/.xlsb/.xls), ODS (.ods), CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::quotation_importer_trait::FileParser;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{Duration, NaiveDate, Timelike};
use csv::ReaderBuilder;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

// ==========================================
// RawSheet - hoja leída sin interpretar
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>, // encabezados tal como vienen en el archivo
    pub rows: Vec<Vec<String>>, // celdas como texto, sin recortar
}

impl RawSheet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Agrega una fila; las filas completamente vacías se omiten
    fn push_row(&mut self, cells: Vec<String>) {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return;
        }
        self.rows.push(cells);
    }
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    fn parse_text(&self, text: &str) -> ImportResult<RawSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // filas de largo irregular
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeaderRow);
        }

        let mut sheet = RawSheet::new(headers);
        for result in reader.records() {
            let record = result?;
            sheet.push_row(record.iter().map(str::to_string).collect());
        }

        Ok(sheet)
    }
}

impl FileParser for CsvParser {
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let bytes = std::fs::read(file_path)?;
        self.parse_bytes(&bytes)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        self.parse_text(&decode_text(bytes))
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// Toma la primera hoja del libro
    fn first_sheet<RS: Read + Seek>(&self, workbook: &mut Sheets<RS>) -> ImportResult<Range<Data>> {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ImportError::NoWorksheet)?;

        Ok(workbook.worksheet_range(&sheet_name)?)
    }

    fn range_to_sheet(&self, range: &Range<Data>) -> ImportResult<RawSheet> {
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::MissingHeaderRow)?;

        let headers: Vec<String> = header_row.iter().map(cell_to_text).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeaderRow);
        }

        let mut sheet = RawSheet::new(headers);
        for data_row in rows {
            sheet.push_row(data_row.iter().map(cell_to_text).collect());
        }

        Ok(sheet)
    }
}

impl FileParser for ExcelParser {
    fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let range = self.first_sheet(&mut workbook)?;
        self.range_to_sheet(&range)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let range = self.first_sheet(&mut workbook)?;
        self.range_to_sheet(&range)
    }
}

// ==========================================
// Parser universal (según extensión)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// Elige el parser adecuado para un nombre de archivo
    pub fn parser_for(&self, file_name: &str) -> ImportResult<Box<dyn FileParser>> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Box::new(CsvParser)),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(ExcelParser)),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        let parser = self.parser_for(&path.to_string_lossy())?;
        parser.parse_path(path)
    }

    pub fn parse_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawSheet> {
        let parser = self.parser_for(file_name)?;
        parser.parse_bytes(bytes)
    }
}

// ==========================================
// Conversión de celdas
// ==========================================

/// Texto de una celda de Excel. Las fechas se emiten en ISO,
/// las celdas con error se tratan como vacías.
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::DateTime(dt) => excel_serial_to_text(dt.as_f64()).unwrap_or_default(),
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Número de serie de Excel (sistema 1900) -> "YYYY-MM-DD[ HH:MM:SS]"
fn excel_serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    let datetime = epoch.checked_add_signed(Duration::seconds(seconds))?;

    if datetime.num_seconds_from_midnight() == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// UTF-8 si es válido; si no, ISO-8859-1 (exportaciones CSV de Excel en español)
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
