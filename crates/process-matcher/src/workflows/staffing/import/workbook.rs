use super::parser::{parse_rows, REQUIRED_COLUMNS};
use super::ProcessImportError;
use crate::workflows::staffing::catalog::ProcessCatalog;
use crate::workflows::staffing::domain::ProcessRecord;
use calamine::{Data, Reader, Xlsx};
use csv::StringRecord;
use rust_xlsxwriter::Workbook;
use std::io::{Read, Seek};

/// Read the first worksheet. The first row holds the column names; fully
/// blank rows are skipped.
pub(crate) fn parse_workbook<R: Read + Seek>(
    reader: R,
) -> Result<Vec<ProcessRecord>, ProcessImportError> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ProcessImportError::NoWorksheet)??;

    let mut rows = range.rows().map(cells_to_record);
    let headers = rows.next().unwrap_or_default();
    let body: Vec<StringRecord> = rows
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    parse_rows(&headers, body)
}

fn cells_to_record(cells: &[Data]) -> StringRecord {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Write the catalog as a single-sheet workbook in the upload schema.
pub fn write_workbook(catalog: &ProcessCatalog) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Processes")?;

    for (col, column) in (0u16..).zip(REQUIRED_COLUMNS) {
        sheet.write_string(0, col, column)?;
    }
    for (row, process) in (1u32..).zip(catalog.list_all()) {
        sheet.write_string(row, 0, process.name.as_str())?;
        sheet.write_string(row, 1, process.potential.label())?;
        sheet.write_string(row, 2, process.communication.label())?;
        sheet.write_number(row, 3, f64::from(process.vacancy))?;
    }

    workbook.save_to_buffer()
}
