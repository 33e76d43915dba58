mod export;
mod parser;
mod workbook;

pub use export::write_catalog;
pub use workbook::write_workbook;

use super::catalog::{ProcessCatalog, ValidationError};
use super::domain::ProcessRecord;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::info;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, thiserror::Error)]
pub enum ProcessImportError {
    #[error("failed to read process table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid process CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid process workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
    #[error("process workbook has no worksheet")]
    NoWorksheet,
    #[error("unsupported process table format '{0}' (expected .csv or .xlsx)")]
    UnsupportedFormat(String),
    #[error("process table rejected: {0}")]
    Validation(#[from] ValidationError),
}

/// File formats accepted for process uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, ProcessImportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(ProcessImportError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    /// Missing or unrecognised content types are read as CSV.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some(XLSX_CONTENT_TYPE) => Self::Xlsx,
            _ => Self::Csv,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => CSV_CONTENT_TYPE,
            Self::Xlsx => XLSX_CONTENT_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Reads uploaded process tables into catalog rows.
pub struct ProcessTableImporter;

impl ProcessTableImporter {
    /// The format follows the file extension.
    pub fn records_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ProcessRecord>, ProcessImportError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        match format {
            TableFormat::Csv => Self::records_from_reader(file),
            TableFormat::Xlsx => Self::records_from_workbook(std::io::BufReader::new(file)),
        }
    }

    pub fn records_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ProcessRecord>, ProcessImportError> {
        parser::parse_records(reader)
    }

    pub fn records_from_workbook<R: Read + Seek>(
        reader: R,
    ) -> Result<Vec<ProcessRecord>, ProcessImportError> {
        workbook::parse_workbook(reader)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProcessCatalog, ProcessImportError> {
        let path = path.as_ref();
        let catalog = ProcessCatalog::from_records(Self::records_from_path(path)?)?;
        info!(path = %path.display(), processes = catalog.len(), "imported process table");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProcessCatalog, ProcessImportError> {
        Ok(ProcessCatalog::from_records(Self::records_from_reader(
            reader,
        )?)?)
    }

    pub fn from_workbook<R: Read + Seek>(reader: R) -> Result<ProcessCatalog, ProcessImportError> {
        Ok(ProcessCatalog::from_records(Self::records_from_workbook(
            reader,
        )?)?)
    }

    /// Upload bodies whose format was decided by the caller.
    pub fn from_bytes(
        format: TableFormat,
        bytes: &[u8],
    ) -> Result<ProcessCatalog, ProcessImportError> {
        match format {
            TableFormat::Csv => Self::from_reader(bytes),
            TableFormat::Xlsx => Self::from_workbook(std::io::Cursor::new(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::{CommunicationLevel, Potential};
    use std::io::Cursor;

    #[test]
    fn importer_reads_required_columns_and_ignores_extras() {
        let csv = "Process_Name,Owner,Potential,Communication,Vacancy\n\
 Sales Team ,Dana, Sales ,Very Good,4\n\
Helpdesk,Lee,Support,Good,0\n";
        let catalog = ProcessTableImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let processes = catalog.list_all();
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].name, "Sales Team");
        assert_eq!(processes[0].potential, Potential::Sales);
        assert_eq!(processes[0].communication, CommunicationLevel::VeryGood);
        assert_eq!(processes[1].vacancy, 0);
    }

    #[test]
    fn importer_lists_every_missing_column() {
        let csv = "Process_Name,Potential\nSales Team,Sales\n";
        match ProcessTableImporter::from_reader(Cursor::new(csv)) {
            Err(ProcessImportError::Validation(ValidationError::MissingColumns(missing))) => {
                assert_eq!(missing, vec!["Communication", "Vacancy"]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_fractional_or_text_vacancy() {
        let csv = "Process_Name,Potential,Communication,Vacancy\nA,Sales,Good,2\nB,Sales,Good,2.5\n";
        match ProcessTableImporter::from_reader(Cursor::new(csv)) {
            Err(ProcessImportError::Validation(ValidationError::InvalidVacancy { row, value })) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2.5");
            }
            other => panic!("expected invalid vacancy, got {other:?}"),
        }
    }

    #[test]
    fn importer_surfaces_negative_vacancy_from_catalog() {
        let csv = "Process_Name,Potential,Communication,Vacancy\nA,Sales,Good,-1\n";
        match ProcessTableImporter::from_reader(Cursor::new(csv)) {
            Err(ProcessImportError::Validation(ValidationError::NegativeVacancy {
                row: 1,
                value: -1,
            })) => {}
            other => panic!("expected negative vacancy, got {other:?}"),
        }
    }

    #[test]
    fn importer_handles_byte_order_mark() {
        let csv = "\u{feff}Process_Name,Potential,Communication,Vacancy\nA,Sales,Good,1\n";
        let catalog = ProcessTableImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn vacancy_parsing_accepts_whole_floats_only() {
        assert_eq!(parser::parse_vacancy_for_tests("5"), Some(5));
        assert_eq!(parser::parse_vacancy_for_tests("5.0"), Some(5));
        assert_eq!(parser::parse_vacancy_for_tests("-1"), Some(-1));
        assert_eq!(parser::parse_vacancy_for_tests("5.5"), None);
        assert_eq!(parser::parse_vacancy_for_tests("five"), None);
        assert_eq!(parser::parse_vacancy_for_tests(""), None);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        match ProcessTableImporter::from_path("./does-not-exist.csv") {
            Err(ProcessImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn export_round_trips_through_importer() {
        let source = "Process_Name,Potential,Communication,Vacancy\n\
Customer Service,Service,Very Good,3\n\
Account Management,Consultation,Excellent,2\n";
        let catalog = ProcessTableImporter::from_reader(Cursor::new(source)).expect("import");

        let mut buffer = Vec::new();
        write_catalog(&catalog, &mut buffer).expect("export");
        let exported = String::from_utf8(buffer).expect("utf8");
        assert_eq!(exported, source);
    }

    #[test]
    fn workbook_export_reads_back_as_the_same_catalog() {
        let source = "Process_Name,Potential,Communication,Vacancy\n\
Customer Service,Service,Very Good,3\n\
Account Management,Consultation,Excellent,0\n";
        let catalog = ProcessTableImporter::from_reader(Cursor::new(source)).expect("import");

        let bytes = write_workbook(&catalog).expect("workbook export");
        let reloaded = ProcessTableImporter::from_bytes(TableFormat::Xlsx, &bytes)
            .expect("workbook import");
        assert_eq!(reloaded.list_all(), catalog.list_all());
    }

    #[test]
    fn workbook_rows_go_through_row_validation() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in (0u16..).zip(["Process_Name", "Potential", "Communication", "Vacancy"]) {
            sheet.write_string(0, col, header).expect("header cell");
        }
        sheet.write_string(1, 0, " Helpdesk ").expect("name cell");
        sheet.write_string(1, 1, "Support").expect("potential cell");
        sheet.write_string(1, 2, "Good").expect("communication cell");
        sheet.write_number(1, 3, 2.5).expect("vacancy cell");
        let bytes = workbook.save_to_buffer().expect("workbook bytes");

        match ProcessTableImporter::from_bytes(TableFormat::Xlsx, &bytes) {
            Err(ProcessImportError::Validation(ValidationError::InvalidVacancy { row, value })) => {
                assert_eq!(row, 1);
                assert_eq!(value, "2.5");
            }
            other => panic!("expected invalid vacancy, got {other:?}"),
        }
    }

    #[test]
    fn workbook_without_required_columns_lists_them() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Process_Name").expect("header cell");
        sheet.write_string(1, 0, "Helpdesk").expect("name cell");
        let bytes = workbook.save_to_buffer().expect("workbook bytes");

        match ProcessTableImporter::from_bytes(TableFormat::Xlsx, &bytes) {
            Err(ProcessImportError::Validation(ValidationError::MissingColumns(missing))) => {
                assert_eq!(missing, vec!["Potential", "Communication", "Vacancy"]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_workbook_is_a_workbook_error() {
        match ProcessTableImporter::from_bytes(TableFormat::Xlsx, b"not a zip archive") {
            Err(ProcessImportError::Workbook(_)) => {}
            other => panic!("expected workbook error, got {other:?}"),
        }
    }

    #[test]
    fn format_follows_extension_and_content_type() {
        assert_eq!(
            TableFormat::from_path(Path::new("data/Processes.XLSX")).expect("xlsx"),
            TableFormat::Xlsx
        );
        assert_eq!(
            TableFormat::from_path(Path::new("data/processes.csv")).expect("csv"),
            TableFormat::Csv
        );
        assert!(matches!(
            TableFormat::from_path(Path::new("data/processes.json")),
            Err(ProcessImportError::UnsupportedFormat(_))
        ));

        assert_eq!(
            TableFormat::from_content_type(Some(XLSX_CONTENT_TYPE)),
            TableFormat::Xlsx
        );
        assert_eq!(
            TableFormat::from_content_type(Some("text/csv; charset=utf-8")),
            TableFormat::Csv
        );
        assert_eq!(TableFormat::from_content_type(None), TableFormat::Csv);
    }
}
