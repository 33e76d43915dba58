use super::ProcessImportError;
use crate::workflows::staffing::catalog::ValidationError;
use crate::workflows::staffing::domain::ProcessRecord;
use csv::StringRecord;
use serde::Deserialize;
use std::io::Read;

pub(crate) const REQUIRED_COLUMNS: [&str; 4] =
    ["Process_Name", "Potential", "Communication", "Vacancy"];

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ProcessRecord>, ProcessImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = checked_headers(csv_reader.headers()?)?;
    csv_reader.set_headers(headers);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<ProcessRow>().enumerate() {
        let row = row?;
        records.push(row.into_record(index + 1)?);
    }

    Ok(records)
}

/// Rows that were already split into cells, e.g. from a worksheet.
pub(crate) fn parse_rows<I>(
    headers: &StringRecord,
    rows: I,
) -> Result<Vec<ProcessRecord>, ProcessImportError>
where
    I: IntoIterator<Item = StringRecord>,
{
    let headers = checked_headers(headers)?;

    let mut records = Vec::new();
    for (index, mut row) in rows.into_iter().enumerate() {
        row.trim();
        let row: ProcessRow = row.deserialize(Some(&headers))?;
        records.push(row.into_record(index + 1)?);
    }

    Ok(records)
}

fn checked_headers(raw: &StringRecord) -> Result<StringRecord, ValidationError> {
    let headers: StringRecord = raw.iter().map(strip_bom).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns(missing));
    }
    Ok(headers)
}

#[derive(Debug, Deserialize)]
struct ProcessRow {
    #[serde(rename = "Process_Name")]
    process_name: String,
    #[serde(rename = "Potential")]
    potential: String,
    #[serde(rename = "Communication")]
    communication: String,
    #[serde(rename = "Vacancy")]
    vacancy: String,
}

impl ProcessRow {
    fn into_record(self, row: usize) -> Result<ProcessRecord, ValidationError> {
        let vacancy = parse_vacancy(&self.vacancy).ok_or_else(|| {
            ValidationError::InvalidVacancy {
                row,
                value: self.vacancy.clone(),
            }
        })?;

        Ok(ProcessRecord {
            process_name: self.process_name,
            potential: self.potential,
            communication: self.communication,
            vacancy,
        })
    }
}

/// Spreadsheet exports often write whole numbers as `5.0`; accept those but
/// nothing with a fractional part.
fn parse_vacancy(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }

    let (whole, fraction) = trimmed.split_once('.')?;
    if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
        whole.parse::<i64>().ok()
    } else {
        None
    }
}

fn strip_bom(value: &str) -> &str {
    value.trim_start_matches('\u{feff}').trim()
}

#[cfg(test)]
pub(crate) fn parse_vacancy_for_tests(value: &str) -> Option<i64> {
    parse_vacancy(value)
}
