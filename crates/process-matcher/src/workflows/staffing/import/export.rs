use super::parser::REQUIRED_COLUMNS;
use crate::workflows::staffing::catalog::ProcessCatalog;
use std::io::Write;

/// Write the catalog back out in the upload schema, preserving load order.
pub fn write_catalog<W: Write>(catalog: &ProcessCatalog, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REQUIRED_COLUMNS)?;

    for process in catalog.list_all() {
        let vacancy = process.vacancy.to_string();
        csv_writer.write_record([
            process.name.as_str(),
            process.potential.label(),
            process.communication.label(),
            vacancy.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
